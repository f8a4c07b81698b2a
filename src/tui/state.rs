//! TUI state algebra: pure types, zero effects.
//!
//! Screen variants carry only per-screen transient state; the game itself
//! (player, shards, connections, messages) lives in [`App::world`].

use crate::world::World;

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
///
/// Owns the game world and the current screen. The effects layer reads
/// this to know what to render.
#[derive(Debug)]
pub struct App {
    /// Current screen.
    pub screen: Screen,

    /// The game world, mutated by the update layer.
    pub world: World,

    /// Set to true when the app should exit on the next tick.
    /// Set exactly once; never cleared.
    pub should_quit: bool,
}

impl App {
    /// An App on the Playing screen over the given world.
    pub fn new(world: World) -> Self {
        App {
            screen: Screen::Playing,
            world,
            should_quit: false,
        }
    }
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// The game itself.
    #[default]
    Playing,

    /// Keybinding reference overlay.
    Help,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions; keys with no mapping
/// produce no Action at all. The transition function decides what each
/// Action means per Screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Step one tile in a cardinal direction.
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Step one tile diagonally.
    MoveUpLeft,
    MoveUpRight,
    MoveDownLeft,
    MoveDownRight,
    /// Pick up shards on the player's tile.
    Grab,
    /// Drop a carried shard.
    Drop,
    /// Connect shards on the player's tile to the player.
    Connect,
    /// Activate shards connected to the player.
    Activate,
    /// Save the game.
    Save,
    /// Open the keybinding reference.
    Help,
    /// Close an overlay / dismiss.
    Back,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// The update function returns this. The effects boundary inspects it
/// to decide what to render and which side effects to execute.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Execute a side effect. The effects layer handles it
    /// and reports back through the world's message log.
    Effect(Effect),
}

/// Side effect requested by a pure transition.
///
/// Pure code never executes these — it only describes them.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Snapshot the world to the save file.
    Save,
}

// ============================================================================
// TESTS
// ============================================================================
