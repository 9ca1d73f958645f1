//! Measurement entry screen — the data entry form and its save flow.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::Record;
use crate::tui::action::Action;
use crate::tui::widgets::{EntryForm, Notice, draw_entry_form, draw_notice};

/// Where the save flow currently stands.
///
/// `Idle → ConfirmPending` on Save; `ConfirmPending → Submitting` on confirm
/// or back to `Idle` on cancel; `Submitting → Idle` on either outcome. Save
/// is ignored while `Submitting`, so rapid re-confirmation cannot fire a
/// duplicate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFlow {
    /// Normal editing.
    Idle,
    /// Confirmation modal is open.
    ConfirmPending,
    /// A submission is in flight.
    Submitting,
}

/// State for the entry screen.
#[derive(Debug, Clone)]
pub struct EntryState {
    form: EntryForm,
    flow: SaveFlow,
    notice: Option<Notice>,
}

impl EntryState {
    /// Creates an entry screen editing `record`, focused on the traceability
    /// field.
    pub fn new(record: Record) -> Self {
        Self {
            form: EntryForm::new(record),
            flow: SaveFlow::Idle,
            notice: None,
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.flow == SaveFlow::ConfirmPending {
            return self.handle_confirm_key(key);
        }

        if key.modifiers == KeyModifiers::CONTROL {
            if let KeyCode::Char('l') = key.code {
                self.clear();
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::Enter => {
                // No re-entry while a submission is in flight.
                if self.flow == SaveFlow::Idle {
                    self.flow = SaveFlow::ConfirmPending;
                }
                Action::None
            }
            KeyCode::Esc => {
                if self.flow == SaveFlow::Idle {
                    Action::Quit
                } else {
                    Action::None
                }
            }
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Key handling while the confirmation modal is open.
    fn handle_confirm_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.flow = SaveFlow::Submitting;
                Action::Submit(self.form.record().clone())
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.flow = SaveFlow::Idle;
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Clears the form. The snapshot cache and the server are not touched.
    fn clear(&mut self) {
        self.form.reset();
    }

    /// Applies the success side effects: blank form, success notice, focus
    /// back on the traceability field.
    pub fn submission_succeeded(&mut self) {
        self.flow = SaveFlow::Idle;
        self.form.reset();
        self.notice = Some(Notice::success("Measurements saved successfully"));
    }

    /// Applies the failure side effects: the entered values stay put so the
    /// inspector can retry without re-typing.
    pub fn submission_failed(&mut self) {
        self.flow = SaveFlow::Idle;
        self.notice = Some(Notice::failure("Failed to save measurements"));
    }

    /// Drops the notice once it has expired. Called every event-loop tick.
    pub fn tick(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    /// Returns the form.
    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    /// Returns the working record.
    pub fn record(&self) -> &Record {
        self.form.record()
    }

    /// Returns the save flow state.
    pub fn flow(&self) -> SaveFlow {
        self.flow
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.flow == SaveFlow::Submitting
    }

    /// Returns the active notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

/// Renders the entry screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_entry(state: &EntryState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" dimlog ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [notice_area, form_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(12),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_notice(state.notice(), frame, notice_area);
    draw_entry_form(state.form(), frame, form_area);

    let footer_text = match state.flow() {
        SaveFlow::Submitting => "Submitting\u{2026}",
        _ => "Enter: save  Ctrl+L: clear  Tab: next field  F1: help  Esc: quit",
    };
    let footer =
        Paragraph::new(Line::from(footer_text)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);

    if state.flow() == SaveFlow::ConfirmPending {
        draw_confirm_modal(frame, area);
    }
}

/// Renders the centered save confirmation modal.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_confirm_modal(frame: &mut Frame, area: Rect) {
    let [popup] = Layout::horizontal([Constraint::Length(46)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(popup);

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Confirm Save ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let lines = vec![
        Line::from("Save these measurements to the QC server?"),
        Line::from(""),
        Line::from("Enter/y: confirm   Esc/n: cancel"),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::tui::widgets::NoticeKind;
    use crate::tui::widgets::form::{D1_BASE, TRACEABILITY};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(state: &mut EntryState, s: &str) {
        for ch in s.chars() {
            state.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn filled_state() -> EntryState {
        let mut state = EntryState::new(Record::blank());
        type_str(&mut state, "TC-100");
        state.handle_key(press(KeyCode::Tab));
        type_str(&mut state, "Nok");
        state
    }

    #[test]
    fn typing_edits_focused_field() {
        let state = filled_state();
        assert_eq!(state.record().traceability_code, "TC-100");
        assert_eq!(state.record().inspector_name, "Nok");
    }

    #[test]
    fn invalid_reading_keystrokes_are_dropped() {
        let mut state = EntryState::new(Record::blank());
        for _ in 0..D1_BASE {
            state.handle_key(press(KeyCode::Tab));
        }
        type_str(&mut state, "1a.5.");
        assert_eq!(state.record().d1[0], "1.5");
    }

    #[test]
    fn enter_opens_confirmation() {
        let mut state = filled_state();
        assert_eq!(state.flow(), SaveFlow::Idle);
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(state.flow(), SaveFlow::ConfirmPending);
    }

    #[test]
    fn cancel_closes_confirmation_and_keeps_record() {
        let mut state = filled_state();
        state.handle_key(press(KeyCode::Enter));
        let action = state.handle_key(press(KeyCode::Esc));
        assert_eq!(action, Action::None);
        assert_eq!(state.flow(), SaveFlow::Idle);
        assert_eq!(state.record().traceability_code, "TC-100");
    }

    #[test]
    fn n_also_cancels() {
        let mut state = filled_state();
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Char('n')));
        assert_eq!(state.flow(), SaveFlow::Idle);
    }

    #[test]
    fn confirm_returns_submit_with_working_record() {
        let mut state = filled_state();
        state.handle_key(press(KeyCode::Enter));
        let action = state.handle_key(press(KeyCode::Enter));
        match action {
            Action::Submit(record) => assert_eq!(record.traceability_code, "TC-100"),
            other => panic!("expected Submit, got {other:?}"),
        }
        assert_eq!(state.flow(), SaveFlow::Submitting);
    }

    #[test]
    fn typing_into_confirmation_does_nothing() {
        let mut state = filled_state();
        state.handle_key(press(KeyCode::Enter));
        let action = state.handle_key(press(KeyCode::Char('x')));
        assert_eq!(action, Action::None);
        assert_eq!(state.flow(), SaveFlow::ConfirmPending);
        assert_eq!(state.record().traceability_code, "TC-100");
    }

    #[test]
    fn save_is_ignored_while_submitting() {
        let mut state = filled_state();
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Enter));
        assert!(state.is_submitting());

        // A second Enter must not reopen the modal or emit another Submit.
        let action = state.handle_key(press(KeyCode::Enter));
        assert_eq!(action, Action::None);
        assert_eq!(state.flow(), SaveFlow::Submitting);
    }

    #[test]
    fn editing_is_still_possible_while_submitting() {
        let mut state = filled_state();
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Enter));
        type_str(&mut state, "X");
        assert_eq!(state.record().inspector_name, "NokX");
    }

    #[test]
    fn esc_quits_only_when_idle() {
        let mut state = filled_state();
        assert_eq!(state.handle_key(press(KeyCode::Esc)), Action::Quit);

        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(state.handle_key(press(KeyCode::Esc)), Action::None);
    }

    #[test]
    fn ctrl_l_clears_form_only() {
        let mut state = filled_state();
        state.handle_key(ctrl('l'));
        assert!(state.record().is_blank());
        assert_eq!(state.form().focus(), TRACEABILITY);
        assert_eq!(state.flow(), SaveFlow::Idle);
    }

    #[test]
    fn success_resets_form_and_raises_notice() {
        let mut state = filled_state();
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Enter));

        state.submission_succeeded();
        assert!(state.record().is_blank());
        assert_eq!(state.form().focus(), TRACEABILITY);
        assert_eq!(state.flow(), SaveFlow::Idle);
        assert_eq!(state.notice().unwrap().kind(), NoticeKind::Success);
    }

    #[test]
    fn failure_keeps_record_and_raises_notice() {
        let mut state = filled_state();
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Enter));

        state.submission_failed();
        assert_eq!(state.record().traceability_code, "TC-100");
        assert_eq!(state.flow(), SaveFlow::Idle);
        assert_eq!(state.notice().unwrap().kind(), NoticeKind::Failure);
    }

    #[test]
    fn tick_drops_expired_notice() {
        use std::time::Duration;

        let mut state = EntryState::new(Record::blank());
        state.notice = Some(Notice::raised_ago(
            NoticeKind::Success,
            "old",
            Duration::from_secs(10),
        ));
        state.tick();
        assert!(state.notice().is_none());

        state.notice = Some(Notice::success("fresh"));
        state.tick();
        assert!(state.notice().is_some());
    }

    #[test]
    fn navigation_keys_do_not_leak_into_record() {
        let mut state = EntryState::new(Record::blank());
        state.handle_key(press(KeyCode::Tab));
        state.handle_key(press(KeyCode::Down));
        state.handle_key(press(KeyCode::Up));
        state.handle_key(press(KeyCode::BackTab));
        assert!(state.record().is_blank());
        assert_eq!(state.form().focus(), TRACEABILITY);
    }

    #[test]
    fn draw_renders_confirmation_modal() {
        let mut state = filled_state();
        state.handle_key(press(KeyCode::Enter));

        let backend = TestBackend::new(70, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_entry(&state, frame, frame.area()))
            .unwrap();

        let buf = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
        }
        assert!(text.contains("Confirm Save"));
        assert!(text.contains("QC server"));
    }
}
