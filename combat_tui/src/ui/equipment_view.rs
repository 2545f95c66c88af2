//! Equipment tab: worn gear and the item catalogue

use crate::app::App;
use combat_core::prelude::*;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_slots(f, app, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(chunks[1]);

    draw_catalogue(f, app, right[0]);
    draw_details(f, app, right[1]);
}

fn draw_slots(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = EquipmentSlot::all()
        .iter()
        .map(|slot| {
            let (text, style) = match app.player.equipped(*slot) {
                Some(item) => (item.name.clone(), Style::default().fg(Color::White)),
                None => ("(empty)".to_string(), Style::default().fg(Color::DarkGray)),
            };
            Line::from(vec![
                Span::styled(format!("{:12}", slot.name()), Style::default().fg(Color::Gray)),
                Span::styled(text, style),
            ])
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Equipped "));
    f.render_widget(paragraph, area);
}

fn draw_catalogue(f: &mut Frame, app: &App, area: Rect) {
    let class = app.player.class();
    let level = app.player.level();

    let items: Vec<ListItem> = app
        .data
        .all_equipment()
        .enumerate()
        .map(|(i, item)| {
            let worn = app
                .player
                .equipped(item.slot)
                .is_some_and(|e| e.id == item.id);
            let marker = if i == app.selected_item { "▶ " } else { "  " };
            let mut style = if !item.can_equip(class, level) {
                Style::default().fg(Color::DarkGray)
            } else if worn {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            if i == app.selected_item {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(Span::styled(
                format!("{}{:20} [{}]{}", marker, item.name, item.slot, if worn { " ✓" } else { "" }),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Catalogue "));
    f.render_widget(list, area);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.selected_equipment() else {
        f.render_widget(Block::default().borders(Borders::ALL).title(" Details "), area);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        item.description.clone(),
        Style::default().fg(Color::Gray),
    ))];

    if !item.bonus.is_zero() {
        lines.push(Line::from(Span::styled(
            item.bonus.describe(),
            Style::default().fg(Color::Green),
        )));
    }
    for buff in &item.passive_buffs {
        lines.push(Line::from(Span::styled(
            format!("Passive: {}", buff),
            Style::default().fg(Color::Cyan),
        )));
    }
    if let Some(set) = item.set_id.as_deref().and_then(|id| app.data.set(id)) {
        lines.push(Line::from(Span::styled(
            format!("Set: {} ({} pieces)", set.name, set.pieces.len()),
            Style::default().fg(Color::Magenta),
        )));
    }
    if let Err(err) = item.check_requirements(app.player.class(), app.player.level()) {
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", item.name)),
    );
    f.render_widget(paragraph, area);
}
