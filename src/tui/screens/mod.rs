//! Screens of the application.

pub mod entry;
pub mod help;

pub use entry::{EntryState, SaveFlow, draw_entry};
pub use help::{draw_help, handle_help_key};
