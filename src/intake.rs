use crate::error::{FormatError, StoreError};
use crate::models::{DEFAULT_TARGET_MINUTES, Direction, Navigation, StudySession, Word};
use crate::parser::{load_word_list, parse_word_list};
use crate::store::{KeyValueStore, SessionStore};
use std::path::PathBuf;
use tracing::{info, warn};

pub const NO_WORDS_MESSAGE: &str = "Paste a word list first.";

/// The first screen: the parsed word list waiting to be quizzed.
#[derive(Debug, Clone)]
pub struct IntakeState {
    pub words: Vec<Word>,
    pub target_time: u32,
    pub error: Option<String>,
    pub files: Vec<PathBuf>,
    pub selected_file: usize,
}

impl Default for IntakeState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl IntakeState {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            words: Vec::new(),
            target_time: DEFAULT_TARGET_MINUTES,
            error: None,
            files,
            selected_file: 0,
        }
    }

    fn accept(&mut self, parsed: Result<Vec<Word>, FormatError>) {
        match parsed {
            Ok(words) => {
                info!(words = words.len(), "word list parsed");
                self.words = words;
                self.error = None;
            }
            Err(err) => {
                warn!(%err, "word list rejected");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Replaces the word list with pasted text, or keeps the previous list
    /// and shows the error.
    pub fn handle_paste(&mut self, text: &str) {
        self.accept(parse_word_list(text));
    }

    pub fn load_selected_file(&mut self) {
        let Some(path) = self.files.get(self.selected_file).cloned() else {
            return;
        };
        self.accept(load_word_list(&path));
    }

    pub fn select_previous_file(&mut self) {
        self.selected_file = self.selected_file.saturating_sub(1);
    }

    pub fn select_next_file(&mut self) {
        if self.selected_file < self.files.len().saturating_sub(1) {
            self.selected_file += 1;
        }
    }

    /// Target time in minutes, never below one.
    pub fn adjust_target_time(&mut self, delta: i64) {
        let next = (i64::from(self.target_time) + delta).max(1);
        self.target_time = u32::try_from(next).unwrap_or(u32::MAX);
    }

    /// Stores a new session and its start time, then heads to the forward
    /// quiz. With no words it only sets the inline error.
    pub fn start_quiz<S: KeyValueStore>(
        &mut self,
        store: &mut SessionStore<S>,
    ) -> Result<Option<Navigation>, StoreError> {
        if self.words.is_empty() {
            self.error = Some(NO_WORDS_MESSAGE.to_string());
            return Ok(None);
        }

        let session = StudySession::new(self.words.clone(), self.target_time, store.clock().now());
        store.save_session(&session)?;
        store.record_start_time()?;

        info!(session = %session.id, words = session.words.len(), "quiz started");
        Ok(Some(Navigation::Quiz(Direction::EngToKor)))
    }
}
