//! Pure rendering: map App state to ratatui widget trees.
//!
//! The main `render()` dispatches on the current Screen. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::grid::{Grid, StyleKey};

use super::state::{App, Screen};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar, content, message line, help line
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // latest message
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(app.screen), chunks[0]);

    match app.screen {
        Screen::Playing => render_map(app, frame, chunks[1]),
        Screen::Help => render_help_screen(frame, chunks[1]),
    }

    frame.render_widget(render_message(app), chunks[2]);
    frame.render_widget(render_help_line(app.screen), chunks[3]);
}

// ============================================================================
// SHARED CHROME
// ============================================================================

/// Title bar showing the app name and screen context.
fn render_title(screen: Screen) -> Paragraph<'static> {
    let title_text = match screen {
        Screen::Playing => "ciphershards",
        Screen::Help => "ciphershards — keys",
    };
    Paragraph::new(Span::styled(title_text, theme::STYLE_TITLE))
}

/// Most recent world message, if any.
fn render_message(app: &App) -> Paragraph<'_> {
    let text = app.world.latest_message().unwrap_or("");
    Paragraph::new(Span::styled(text, theme::resolve(StyleKey::Message)))
}

/// Footer showing available keybindings for the current screen.
fn render_help_line(screen: Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Playing => {
            "[hjkl/yubn] move  [g] grab  [d] drop  [c] connect  [a] activate  [S] save  [?] keys  [q] quit"
        }
        Screen::Help => "[Esc] back  [q] quit",
    };
    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// SCREEN: PLAYING
// ============================================================================

fn render_map(app: &App, frame: &mut Frame, area: Rect) {
    let grid = app.world.draw();
    let paragraph = Paragraph::new(grid_lines(&grid));
    frame.render_widget(paragraph, area);
}

/// One Line per grid row, merging runs of equally-styled cells into
/// single spans.
fn grid_lines(grid: &Grid) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(grid.height().max(0) as usize);

    for row in grid.rows() {
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_style: Option<StyleKey> = None;

        for cell in row {
            match run_style {
                Some(style) if style == cell.style => run.push(cell.glyph),
                Some(style) => {
                    spans.push(Span::styled(std::mem::take(&mut run), theme::resolve(style)));
                    run.push(cell.glyph);
                    run_style = Some(cell.style);
                }
                None => {
                    run.push(cell.glyph);
                    run_style = Some(cell.style);
                }
            }
        }
        if let Some(style) = run_style {
            spans.push(Span::styled(run, theme::resolve(style)));
        }

        lines.push(Line::from(spans));
    }

    lines
}

// ============================================================================
// SCREEN: HELP
// ============================================================================

fn render_help_screen(frame: &mut Frame, area: Rect) {
    let bindings = [
        ("h/j/k/l, arrows", "move"),
        ("y/u/b/n", "move diagonally"),
        ("g", "grab the shards you stand on"),
        ("d", "drop a carried shard"),
        ("c", "connect shards you stand on to yourself"),
        ("a", "activate your connected shards"),
        ("S", "save the game"),
        ("?", "toggle this screen"),
        ("q", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (keys, what) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", keys), theme::STYLE_KEY),
            Span::raw(what),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Two active shards etch a line between them.",
        theme::STYLE_HELP,
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

// ============================================================================
// TESTS
// ============================================================================
