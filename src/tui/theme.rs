//! Style constants and descriptor resolution.
//!
//! [`resolve`] maps the abstract per-cell style keys to concrete terminal
//! styles. Keys without a specific mapping share the fixed default,
//! white on black.

use ratatui::style::{Color, Modifier, Style};

use crate::grid::StyleKey;

// ============================================================================
// CELL STYLES
// ============================================================================

/// Fixed default: white foreground, black background.
pub const STYLE_DEFAULT: Style = Style::new().fg(Color::White).bg(Color::Black);

/// Floor tiles — dim, so entities read at a glance.
pub const STYLE_FLOOR: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);

/// Message log text — terminal default colors.
pub const STYLE_MESSAGE: Style = Style::new();

/// Resolve an abstract style key to a concrete terminal style.
///
/// Total over all keys; every key without a specific mapping resolves
/// to [`STYLE_DEFAULT`].
pub fn resolve(key: StyleKey) -> Style {
    match key {
        StyleKey::Floor => STYLE_FLOOR,
        StyleKey::Message => STYLE_MESSAGE,
        _ => STYLE_DEFAULT,
    }
}

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Keybinding hint.
pub const STYLE_KEY: Style = Style::new().fg(Color::Cyan);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
