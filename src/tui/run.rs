//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Kept minimal — all intelligence lives in the pure layers.
//!
//! The loop is strictly turn-based: render, block on the next terminal
//! event, update, repeat. There are no background producers and no ticks.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::save::{save_path, write_save, SaveGame};
use crate::world::World;

use super::state::{Action, App, Effect, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Cardinal movement
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),

        // Diagonal movement
        KeyCode::Char('y') => Some(Action::MoveUpLeft),
        KeyCode::Char('u') => Some(Action::MoveUpRight),
        KeyCode::Char('b') => Some(Action::MoveDownLeft),
        KeyCode::Char('n') => Some(Action::MoveDownRight),

        // Shard actions
        KeyCode::Char('g') => Some(Action::Grab),
        KeyCode::Char('d') => Some(Action::Drop),
        KeyCode::Char('c') => Some(Action::Connect),
        KeyCode::Char('a') => Some(Action::Activate),

        // Meta (capital S — deliberate)
        KeyCode::Char('S') => Some(Action::Save),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Esc | KeyCode::Enter => Some(Action::Back),
        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the game until the player quits.
///
/// Sets up the terminal, runs the event loop over the given world, and
/// restores the terminal whether or not the loop failed.
pub fn run(world: World) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(world);

    let result = event_loop(&mut terminal, &mut app);

    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // Render
        terminal.draw(|frame| render(app, frame))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Block on the next terminal event
        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = map_key(key) {
                    match update(app.screen, &action, &mut app.world) {
                        Transition::Screen(next) => {
                            app.screen = next;
                        }
                        Transition::Quit => {
                            app.should_quit = true;
                        }
                        Transition::Effect(effect) => {
                            handle_effect(effect, app);
                        }
                    }
                }
            }
            _ => {} // resize redraws on the next pass; mouse etc. ignored
        }
    }

    Ok(())
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a pure transition. Outcomes are
/// reported through the world's message log, never as loop errors.
fn handle_effect(effect: Effect, app: &mut App) {
    match effect {
        Effect::Save => {
            let path = save_path();
            let snapshot = SaveGame::from_world(&app.world);
            match write_save(&snapshot, &path) {
                Ok(()) => {
                    app.world.push_message(format!("Saved to {}", path.display()));
                }
                Err(e) => {
                    log::error!("save failed: {}", e);
                    app.world.push_message(format!("Save failed: {}", e));
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
