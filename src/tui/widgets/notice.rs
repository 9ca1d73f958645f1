//! Transient success/failure notice bar.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// How long a notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Outcome category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A one-line transient message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    text: String,
    raised_at: Instant,
}

impl Notice {
    /// Creates a success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self::raise(NoticeKind::Success, text)
    }

    /// Creates a failure notice.
    pub fn failure(text: impl Into<String>) -> Self {
        Self::raise(NoticeKind::Failure, text)
    }

    fn raise(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            raised_at: Instant::now(),
        }
    }

    /// Returns the notice category.
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` once the notice has outlived its display window.
    pub fn is_expired(&self) -> bool {
        self.raised_at.elapsed() >= NOTICE_TTL
    }

    /// Builds a notice that was raised in the past, for expiry tests.
    #[cfg(test)]
    pub(crate) fn raised_ago(kind: NoticeKind, text: &str, age: Duration) -> Self {
        Self {
            kind,
            text: text.to_string(),
            raised_at: Instant::now() - age,
        }
    }
}

/// Renders the notice line, or nothing when no notice is active.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_notice(notice: Option<&Notice>, frame: &mut Frame, area: Rect) {
    let Some(notice) = notice else {
        return;
    };
    let color = match notice.kind() {
        NoticeKind::Success => Color::Green,
        NoticeKind::Failure => Color::Red,
    };
    let line = Line::from(Span::styled(notice.text(), Style::default().fg(color)));
    frame.render_widget(Paragraph::new(line), area);
}
