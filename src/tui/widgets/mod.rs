//! Reusable TUI widgets.

pub mod form;
pub mod notice;

pub use form::{EntryForm, TRACEABILITY, draw_entry_form};
pub use notice::{Notice, NoticeKind, draw_notice};
