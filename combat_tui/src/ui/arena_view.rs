//! Arena tab: both fighters and the combat log

use crate::app::App;
use crate::ui::bar;
use combat_core::prelude::*;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let fighters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    draw_fighter(f, &app.player, " You ", fighters[0]);
    draw_fighter(f, &app.enemy, " Enemy ", fighters[1]);
    draw_combat_log(f, app, rows[1]);
}

fn health_color(fraction: f64) -> Color {
    if fraction > 0.5 {
        Color::Green
    } else if fraction > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn draw_fighter(f: &mut Frame, character: &Character, title: &str, area: Rect) {
    let stats = character.stats();
    let width = area.width.saturating_sub(16) as usize;
    let hp_fraction = stats.health_percentage();

    let state_style = match character.current_state() {
        CharacterState::Dead => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        CharacterState::Stunned => Style::default().fg(Color::Magenta),
        CharacterState::Idle => Style::default().fg(Color::Gray),
        _ => Style::default().fg(Color::Yellow),
    };

    let buffs: Vec<String> = character
        .active_buffs()
        .iter()
        .map(|b| match b.remaining {
            Some(t) => format!("{}×{} {:.1}s", b.id(), b.stacks(), t),
            None => format!("{}×{}", b.id(), b.stacks()),
        })
        .collect();

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", character.name()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("Lv {}  ", stats.level), Style::default().fg(Color::Cyan)),
            Span::styled(character.current_state().to_string(), state_style),
        ]),
        Line::from(vec![
            Span::styled(format!("HP {:>4}/{:<4} ", stats.hp, stats.max_hp), Style::default().fg(Color::Gray)),
            Span::styled(bar(hp_fraction, width), Style::default().fg(health_color(hp_fraction))),
        ]),
        Line::from(vec![
            Span::styled(format!("MP {:>4}/{:<4} ", stats.mana, stats.max_mana), Style::default().fg(Color::Gray)),
            Span::styled(bar(stats.mana_percentage(), width), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled("XP ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", character.experience(), character.experience_to_next_level()),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                if character.is_invulnerable() { "  (invulnerable)" } else { "" },
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(Span::styled(
            if buffs.is_empty() { "No buffs".to_string() } else { buffs.join("  ") },
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            format!("Pending hits: {}", character.pending_strikes().len()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);
}

fn draw_combat_log(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .combat_log
        .iter()
        .skip(app.log_scroll)
        .take(visible)
        .map(|line| {
            let style = if line.starts_with("━━━") {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if line.contains('✗') {
                Style::default().fg(Color::DarkGray)
            } else if line.contains('💀') || line.contains('◀') {
                Style::default().fg(Color::Red)
            } else if line.contains('★') {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(line.clone(), style)))
        })
        .collect();

    let title = format!(
        " Combat Log  [{:.1}s, {} kill{}] ",
        app.time_elapsed,
        app.kills,
        if app.kills == 1 { "" } else { "s" }
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}
