//! Abilities tab: slots, costs and readiness

use crate::app::App;
use combat_core::prelude::*;
use combat_core::AbilityKind;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Key", "Ability", "Kind", "Mana", "Cooldown", "Damage", "Status"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let caster = app.player.stats();
    let rows: Vec<Row> = app
        .player
        .abilities()
        .iter()
        .enumerate()
        .map(|(i, ability)| {
            let (status, color) = match app.player.can_use_ability(&ability.id) {
                Ok(()) => ("Ready".to_string(), Color::Green),
                Err(CombatError::OnCooldown { remaining, .. }) => {
                    (format!("{:.1}s", remaining), Color::Yellow)
                }
                Err(err) => (err.code().replace('_', " "), Color::DarkGray),
            };
            let damage = match ability.kind {
                AbilityKind::Attack => format!(
                    "{:.0}{}",
                    ability.effective_damage(caster),
                    if ability.hit_count > 1 {
                        format!(" ×{}", ability.hit_count)
                    } else {
                        String::new()
                    }
                ),
                AbilityKind::Heal => format!("+{} hp", ability.heal_amount),
                AbilityKind::Buff => ability.buff.clone().unwrap_or_default(),
            };

            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(ability.name.clone()),
                Cell::from(format!("{:?}", ability.kind)),
                Cell::from(ability.mana_cost.to_string()),
                Cell::from(format!("{:.1}s", ability.cooldown)),
                Cell::from(damage),
                Cell::from(status).style(Style::default().fg(color)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(18),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Abilities  (mana {}/{}) ", caster.mana, caster.max_mana)),
    );

    f.render_widget(table, area);
}
