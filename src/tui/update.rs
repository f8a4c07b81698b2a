//! Pure state transitions: (Screen, Action, World) → Transition.
//!
//! This is the game's update function. Fully testable without a terminal.
//! Each screen defines which actions it accepts; unhandled actions return
//! the current screen unchanged (no-op). Quit ends the app from anywhere.

use crate::world::World;

use super::state::{Action, Effect, Screen, Transition};

/// Pure state transition function.
///
/// Applies the action to the world where the screen accepts it and
/// produces the next transition for the effects boundary to interpret.
pub fn update(screen: Screen, action: &Action, world: &mut World) -> Transition {
    match screen {
        Screen::Playing => update_playing(action, world),
        Screen::Help => update_help(action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Playing: movement and shard actions mutate the world; every applied
/// action is followed by connection resolution (active pairs etch lines).
fn update_playing(action: &Action, world: &mut World) -> Transition {
    if let Some((dx, dy)) = move_delta(action) {
        world.move_player(dx, dy);
        world.resolve_connections();
        return Transition::Screen(Screen::Playing);
    }

    match action {
        Action::Grab => world.grab(),
        Action::Drop => world.drop_carried(),
        Action::Connect => world.connect(),
        Action::Activate => world.activate(),
        Action::Save => return Transition::Effect(Effect::Save),
        Action::Help => return Transition::Screen(Screen::Help),
        Action::Quit => return Transition::Quit,
        _ => return Transition::Screen(Screen::Playing),
    }

    world.resolve_connections();
    Transition::Screen(Screen::Playing)
}

/// Help: dismiss back to the game. Game actions are ignored.
fn update_help(action: &Action) -> Transition {
    match action {
        Action::Help | Action::Back => Transition::Screen(Screen::Playing),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Help),
    }
}

/// Movement delta for movement actions, None for everything else.
fn move_delta(action: &Action) -> Option<(i32, i32)> {
    match action {
        Action::MoveUp => Some((0, -1)),
        Action::MoveDown => Some((0, 1)),
        Action::MoveLeft => Some((-1, 0)),
        Action::MoveRight => Some((1, 0)),
        Action::MoveUpLeft => Some((-1, -1)),
        Action::MoveUpRight => Some((1, -1)),
        Action::MoveDownLeft => Some((-1, 1)),
        Action::MoveDownRight => Some((1, 1)),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================
