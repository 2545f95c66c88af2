//! Help tab view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let constants = app.player.constants();

    let lines = vec![
        super::header("Navigation"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("F1-F5", "Jump to tab"),
        key_line("↑/k  ↓/j", "Navigate lists / scroll"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        super::header("Arena"),
        key_line("a / Space", "Basic attack"),
        key_line("1-3", "Use ability in slot"),
        key_line("←/h  →/l", "Move left/right"),
        key_line("s", "Stop moving"),
        key_line("w", "Jump"),
        key_line("d", "Dash in facing direction"),
        key_line("t", "Advance time by 1 second"),
        key_line("r", "Respawn, or bring in the next enemy"),
        key_line("p", "Forecast a duel against the current enemy"),
        Line::from(""),
        super::header("Equipment"),
        key_line("Enter / e", "Equip selected item"),
        key_line("u", "Unequip the selected item's slot"),
        Line::from(""),
        super::header("Rules"),
        rule("Armor", "subtracted from each hit"),
        rule("Dodge", "a dodged hit deals nothing"),
        rule("Critical", "multiplies damage after armor"),
        rule("Floor", "a landed hit deals at least 1"),
        rule(
            "Invulnerable",
            &format!("{:.1}s after taking damage", constants.invulnerability_window),
        ),
        rule(
            "Regeneration",
            &format!(
                "starts {:.1}s after the last hit, every {:.1}s",
                constants.regen_delay, constants.regen_interval
            ),
        ),
        rule(
            "Experience",
            &format!("next level needs × {:.2}", constants.experience_growth),
        ),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help & Rules "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}

fn rule(name: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", name), Style::default().fg(Color::Magenta)),
        Span::styled(desc.to_string(), Style::default().fg(Color::Gray)),
    ])
}
