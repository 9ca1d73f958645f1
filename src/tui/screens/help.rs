//! Keybinding help screen.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table};

use crate::tui::action::Action;
use crate::tui::app::Screen;

/// Keybindings shown on the help screen.
const KEYBINDINGS: &[(&str, &str)] = &[
    ("Tab / Down", "next field"),
    ("Shift+Tab / Up", "previous field"),
    ("Enter", "save (opens confirmation)"),
    ("Enter / y", "confirm save"),
    ("Esc / n", "cancel confirmation"),
    ("Ctrl+L", "clear the form"),
    ("F1", "this help"),
    ("Esc", "quit"),
];

/// Any key returns to the entry screen.
pub fn handle_help_key(_key: KeyEvent) -> Action {
    Action::Navigate(Screen::Entry)
}

/// Renders the help screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_help(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let header = Row::new(vec!["Key", "Action"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = KEYBINDINGS
        .iter()
        .map(|(key, action)| Row::new(vec![*key, *action]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(20)])
        .header(header)
        .block(block);

    frame.render_widget(table, area);
}
