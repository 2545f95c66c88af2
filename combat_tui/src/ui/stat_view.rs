//! Character tab: base vs effective stats and progression

use crate::app::App;
use crate::ui::{bar, header, stat_line, stat_line_with_computed};
use combat_core::prelude::*;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_stats(f, app, chunks[0]);
    draw_progression(f, app, chunks[1]);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let base = app.player.base_stats();
    let eff = app.player.stats();

    let lines = vec![
        header("Resources"),
        stat_line_with_computed("Max HP", base.max_hp as f64, eff.max_hp as f64),
        stat_line_with_computed("Max Mana", base.max_mana as f64, eff.max_mana as f64),
        stat_line("HP Regen", eff.hp_regen),
        stat_line("Mana Regen", eff.mana_regen),
        Line::from(""),
        header("Offense"),
        stat_line_with_computed("Attack Damage", base.attack_damage, eff.attack_damage),
        stat_line_with_computed("Magic Damage", base.magic_damage, eff.magic_damage),
        stat_line_with_computed("Attack Speed", base.attack_speed, eff.attack_speed),
        stat_line("Attack Range", eff.attack_range),
        stat_line_with_computed("Crit Chance", base.critical_chance, eff.critical_chance),
        stat_line("Crit Multiplier", eff.critical_multiplier),
        stat_line("Expected Hit", eff.expected_hit_damage()),
        Line::from(""),
        header("Defense"),
        stat_line_with_computed(
            "Physical Armor",
            base.physical_armor as f64,
            eff.physical_armor as f64,
        ),
        stat_line_with_computed("Magic Armor", base.magic_armor as f64, eff.magic_armor as f64),
        stat_line("Dodge Chance", eff.dodge_chance),
        stat_line("Block Chance", eff.block_chance),
        Line::from(""),
        header("Movement"),
        stat_line_with_computed("Move Speed", base.move_speed, eff.move_speed),
        stat_line("Jump Force", eff.jump_force),
        stat_line("Dash Speed", eff.dash_speed),
        stat_line("Dash Cooldown", eff.dash_cooldown),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ({}) ", app.player.name(), app.player.class())),
        )
        .scroll((app.stats_scroll as u16, 0));

    f.render_widget(paragraph, area);
}

fn draw_progression(f: &mut Frame, app: &App, area: Rect) {
    let progression = app.player.progression();
    let width = area.width.saturating_sub(4) as usize;

    let mut lines = vec![
        header("Progression"),
        stat_line("Level", app.player.level() as f64),
        Line::from(vec![
            Span::styled(format!("{:20}", "Experience"), Style::default().fg(Color::Gray)),
            Span::styled(
                format!(
                    "{} / {}",
                    progression.experience(),
                    progression.experience_to_next_level()
                ),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(Span::styled(
            bar(progression.progress(), width),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        header("Modifier Total"),
    ];

    let eff = app.player.stats();
    let base = app.player.base_stats();
    let diff = [
        ("Attack Damage", eff.attack_damage - base.attack_damage),
        ("Magic Damage", eff.magic_damage - base.magic_damage),
        ("Attack Speed", eff.attack_speed - base.attack_speed),
        ("Physical Armor", (eff.physical_armor - base.physical_armor) as f64),
        ("Magic Armor", (eff.magic_armor - base.magic_armor) as f64),
        ("Crit Chance", eff.critical_chance - base.critical_chance),
        ("Move Speed", eff.move_speed - base.move_speed),
    ];
    let mut any = false;
    for (name, delta) in diff {
        if delta.abs() > f64::EPSILON {
            any = true;
            let color = if delta > 0.0 { Color::Green } else { Color::Red };
            lines.push(Line::from(vec![
                Span::styled(format!("{:20}", name), Style::default().fg(Color::Gray)),
                Span::styled(format!("{:+.2}", delta), Style::default().fg(color)),
            ]));
        }
    }
    if !any {
        lines.push(Line::from(Span::styled(
            "No modifiers",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Growth "));
    f.render_widget(paragraph, area);
}
