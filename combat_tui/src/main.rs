//! combat_tui - Interactive arena for driving combat_core characters

mod app;
mod simulation;
mod ui;

use app::{App, AppError, Tab};
use combat_core::Direction;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "combat_tui.log";
const FRAME: f64 = 0.1;

/// Log to a file; the terminal belongs to the UI
fn init_logging() -> Result<(), AppError> {
    let file = File::create(LOG_FILE)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("combat_core=debug,combat_tui=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), AppError> {
    init_logging()?;

    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), AppError> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_secs_f64(FRAME))? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Tab, _) => app.next_tab(),
                    (KeyCode::F(n), _) => app.set_tab(usize::from(n).saturating_sub(1)),
                    (KeyCode::BackTab, _) => app.prev_tab(),
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.move_player(Direction::LEFT),
                    (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
                        app.move_player(Direction::RIGHT)
                    }
                    (KeyCode::Char('s'), _) => app.move_player(Direction::ZERO),
                    (KeyCode::Char('w'), _) => app.jump(),
                    (KeyCode::Char('d'), _) => app.dash(),
                    (KeyCode::Char('a'), _) | (KeyCode::Char(' '), _) => app.attack(),
                    (KeyCode::Char('1'), _) => app.use_ability(0),
                    (KeyCode::Char('2'), _) => app.use_ability(1),
                    (KeyCode::Char('3'), _) => app.use_ability(2),
                    (KeyCode::Enter, _) | (KeyCode::Char('e'), _)
                        if app.current_tab == Tab::Equipment =>
                    {
                        app.equip_selected()
                    }
                    (KeyCode::Char('u'), _) if app.current_tab == Tab::Equipment => {
                        app.unequip_selected()
                    }
                    (KeyCode::Char('p'), _) => app.predict(),
                    (KeyCode::Char('t'), _) => app.tick_time(1.0),
                    (KeyCode::Char('r'), _) => app.respawn(),
                    (KeyCode::Char('?'), _) => app.toggle_help(),
                    _ => {}
                }
            }
        }

        app.tick(FRAME);
    }
    Ok(())
}
