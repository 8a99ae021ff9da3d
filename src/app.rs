use crate::error::StoreError;
use crate::intake::IntakeState;
use crate::models::{AppState, Navigation};
use crate::quiz::QuizRunner;
use crate::results::ResultsReport;
use crate::store::{KeyValueStore, SessionStore};
use std::path::PathBuf;
use tracing::{debug, error, warn};

/// Screen state plus the store every screen reads from and writes to.
pub struct App<S> {
    pub state: AppState,
    pub store: SessionStore<S>,
    pub intake: IntakeState,
    pub runner: Option<QuizRunner>,
    pub report: Option<ResultsReport>,
    /// Last failed operation, shown until the next successful navigation.
    pub status: Option<String>,
    pub results_scroll: u16,
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: SessionStore<S>, word_files: Vec<PathBuf>) -> Self {
        Self {
            state: AppState::Intake,
            store,
            intake: IntakeState::new(word_files),
            runner: None,
            report: None,
            status: None,
            results_scroll: 0,
            should_quit: false,
        }
    }

    /// Moves to another screen, loading what it needs from the store.
    /// Missing or corrupt state sends the user back to intake.
    pub fn navigate(&mut self, navigation: Navigation) {
        debug!(?navigation, "navigating");
        match navigation {
            Navigation::Intake => self.show_intake(),
            Navigation::Quiz(direction) => match QuizRunner::start(direction, &mut self.store) {
                Ok(runner) => {
                    self.runner = Some(runner);
                    self.report = None;
                    self.status = None;
                    self.state = AppState::Quiz;
                }
                Err(err) => self.fail(err),
            },
            Navigation::Results => match ResultsReport::load(&self.store) {
                Ok(report) => {
                    self.report = Some(report);
                    self.runner = None;
                    self.status = None;
                    self.results_scroll = 0;
                    self.state = AppState::Results;
                }
                Err(err) => self.fail(err),
            },
        }
    }

    /// Applies the outcome of a flow operation.
    pub fn apply(&mut self, outcome: Result<Option<Navigation>, StoreError>) {
        match outcome {
            Ok(Some(navigation)) => self.navigate(navigation),
            Ok(None) => {}
            Err(err) => self.fail(err),
        }
    }

    /// Returns to a blank intake screen, as after clearing all data.
    pub fn reset_intake(&mut self) {
        let files = std::mem::take(&mut self.intake.files);
        self.intake = IntakeState::new(files);
        self.show_intake();
    }

    fn show_intake(&mut self) {
        self.runner = None;
        self.report = None;
        self.state = AppState::Intake;
    }

    fn fail(&mut self, err: StoreError) {
        if err.is_recoverable() {
            warn!(%err, "no active session, returning to intake");
            self.status = None;
            self.show_intake();
        } else if self.has_screen_data() {
            error!(%err, "store operation failed");
            self.status = Some(err.to_string());
        } else {
            error!(%err, "store operation failed, screen has nothing to show");
            self.status = None;
            self.show_intake();
            self.intake.error = Some(err.to_string());
        }
    }

    /// Whether the current screen still has the data it draws.
    fn has_screen_data(&self) -> bool {
        match self.state {
            AppState::Intake => true,
            AppState::Quiz => self.runner.is_some(),
            AppState::Results | AppState::ClearConfirm => self.report.is_some(),
        }
    }
}
