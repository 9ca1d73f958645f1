//! Actions returned by screen event handlers.

use crate::model::Record;

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update global state and navigate between
/// screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Submit the given record to the QC server.
    Submit(Record),
    /// Quit the application.
    Quit,
}
