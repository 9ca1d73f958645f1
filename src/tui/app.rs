use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Frame, Terminal};

use crate::model::Record;
use crate::remote::{SubmissionGateway, SubmitError};
use crate::storage::SnapshotCache;

use super::action::Action;
use super::error::AppError;
use super::screens::{EntryState, draw_entry, draw_help, handle_help_key};

/// How long one event-loop tick waits for input before draining submissions.
const TICK: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The measurement entry form.
    Entry,
    /// Keybinding help.
    Help,
}

/// Result of one submission, delivered back to the event loop.
type SubmitOutcome = Result<serde_json::Value, SubmitError>;

/// Top-level application state.
///
/// Owns the snapshot cache, the submission gateway, and a small tokio
/// runtime. Submissions are spawned onto the runtime and their outcomes come
/// back over a channel, so the event loop never blocks on the network.
pub struct App {
    screen: Screen,
    cache: SnapshotCache,
    gateway: Arc<dyn SubmissionGateway>,
    runtime: tokio::runtime::Runtime,
    outcome_tx: Sender<SubmitOutcome>,
    outcome_rx: Receiver<SubmitOutcome>,
    /// The record of the in-flight submission, written to the cache on success.
    in_flight: Option<Record>,
    entry: EntryState,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the entry screen, pre-populated from the
    /// snapshot cache.
    pub fn new(
        mut cache: SnapshotCache,
        gateway: Arc<dyn SubmissionGateway>,
    ) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (outcome_tx, outcome_rx) = std::sync::mpsc::channel();
        let entry = EntryState::new(cache.load());

        Ok(Self {
            screen: Screen::Entry,
            cache,
            gateway,
            runtime,
            outcome_tx,
            outcome_rx,
            in_flight: None,
            entry,
            should_quit: false,
        })
    }

    /// Main event loop: draw → poll for input → drain submission outcomes.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            self.pump_submissions();
            self.entry.tick();
        }
        Ok(())
    }

    /// Renders the current screen.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        match self.screen {
            Screen::Entry => draw_entry(&self.entry, frame, frame.area()),
            Screen::Help => draw_help(frame, frame.area()),
        }
    }

    /// Handles a key event: screen dispatch, then action application.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = match self.screen {
            Screen::Entry => {
                if key.code == crossterm::event::KeyCode::F(1) {
                    Action::Navigate(Screen::Help)
                } else {
                    self.entry.handle_key(key)
                }
            }
            Screen::Help => handle_help_key(key),
        };
        self.apply(action);
    }

    /// Applies an action returned by a screen handler.
    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.screen = screen,
            Action::Submit(record) => self.start_submission(record),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Spawns a submission onto the runtime.
    fn start_submission(&mut self, record: Record) {
        if self.in_flight.is_some() {
            return;
        }
        let future = self.gateway.submit(record.clone());
        self.in_flight = Some(record);
        let tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(future.await);
        });
    }

    /// Drains completed submissions from the channel. Called every tick.
    pub fn pump_submissions(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.finish_submission(outcome);
        }
    }

    /// Applies the side effects of a finished submission.
    ///
    /// Success: the submitted record becomes the new snapshot, the cache memo
    /// is invalidated, the form resets. Failure: nothing is written and the
    /// form keeps the entered values; detail goes to the diagnostic log only.
    fn finish_submission(&mut self, outcome: SubmitOutcome) {
        let Some(record) = self.in_flight.take() else {
            return;
        };
        match outcome {
            Ok(_response) => {
                if let Err(e) = self.cache.store(&record) {
                    tracing::warn!(error = %e, "snapshot write failed after successful submission");
                }
                self.cache.invalidate();
                tracing::info!(
                    traceability_code = %record.traceability_code,
                    "measurements submitted"
                );
                self.entry.submission_succeeded();
            }
            Err(e) => {
                tracing::error!(error = %e, "measurement submission failed");
                self.entry.submission_failed();
            }
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns the entry screen state.
    pub fn entry(&self) -> &EntryState {
        &self.entry
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
