use crate::error::StoreError;
use crate::models::{Direction, Navigation, QuizAnswer, Word};
use crate::store::{KeyValueStore, SessionStore};
use std::collections::HashMap;
use tracing::{debug, error, info};

/// Compares a typed answer against the expected translation.
///
/// Both sides are trimmed. English targets (`KorToEng`) are also compared
/// case-insensitively; Korean targets are compared exactly.
pub fn grade(direction: Direction, expected: &str, user_answer: &str) -> bool {
    match direction {
        Direction::EngToKor => user_answer.trim() == expected.trim(),
        Direction::KorToEng => {
            user_answer.trim().to_lowercase() == expected.trim().to_lowercase()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Loading,
    Active,
    Submitting,
    Done,
}

/// One quiz direction: collects an answer per word, grades on submit and
/// stores the graded sequence.
#[derive(Debug)]
pub struct QuizRunner {
    direction: Direction,
    state: RunnerState,
    words: Vec<Word>,
    answers: HashMap<String, String>,
    focus: usize,
    cursor: usize,
    is_review: bool,
    target_time: u32,
}

impl QuizRunner {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            state: RunnerState::Loading,
            words: Vec::new(),
            answers: HashMap::new(),
            focus: 0,
            cursor: 0,
            is_review: false,
            target_time: 0,
        }
    }

    /// Loads the current session and records a fresh start time.
    pub fn start<S: KeyValueStore>(
        direction: Direction,
        store: &mut SessionStore<S>,
    ) -> Result<Self, StoreError> {
        let mut runner = Self::new(direction);
        runner.load(store)?;
        Ok(runner)
    }

    /// `Loading -> Active`. On error the runner stays in `Loading` and the
    /// caller is expected to send the user back to intake.
    pub fn load<S: KeyValueStore>(&mut self, store: &mut SessionStore<S>) -> Result<(), StoreError> {
        if self.state != RunnerState::Loading {
            return Ok(());
        }

        let session = store.load_session()?;
        self.words = session.words_for(self.direction);
        self.is_review = session.is_review;
        self.target_time = session.target_time;
        store.record_start_time()?;

        debug!(
            direction = ?self.direction,
            words = self.words.len(),
            review = self.is_review,
            "quiz runner active"
        );
        self.state = RunnerState::Active;
        Ok(())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn is_review(&self) -> bool {
        self.is_review
    }

    pub fn target_time(&self) -> u32 {
        self.target_time
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Cursor position in characters within the focused answer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused_word(&self) -> Option<&Word> {
        self.words.get(self.focus)
    }

    pub fn answer(&self, word_id: &str) -> &str {
        self.answers.get(word_id).map(String::as_str).unwrap_or("")
    }

    /// (answered, total) where blank answers do not count.
    pub fn progress(&self) -> (usize, usize) {
        let answered = self
            .words
            .iter()
            .filter(|w| !self.answer(&w.id).trim().is_empty())
            .count();
        (answered, self.words.len())
    }

    pub fn set_answer(&mut self, word_id: &str, value: &str) {
        if self.state != RunnerState::Active {
            return;
        }
        self.answers.insert(word_id.to_string(), value.to_string());
        if self.focused_word().is_some_and(|w| w.id == word_id) {
            self.cursor = value.chars().count();
        }
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < self.words.len() {
            self.focus = index;
            self.cursor = self.focused_answer().chars().count();
        }
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus + 1);
    }

    pub fn focus_previous(&mut self) {
        if self.focus > 0 {
            self.set_focus(self.focus - 1);
        }
    }

    fn focused_answer(&self) -> &str {
        match self.focused_word() {
            Some(word) => self.answer(&word.id),
            None => "",
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String, &mut usize)) {
        if self.state != RunnerState::Active {
            return;
        }
        let Some(word_id) = self.focused_word().map(|w| w.id.clone()) else {
            return;
        };
        let answer = self.answers.entry(word_id).or_default();
        edit(answer, &mut self.cursor);
    }

    pub fn insert_str(&mut self, text: &str) {
        self.edit_focused(|answer, cursor| {
            let at = byte_offset(answer, *cursor);
            answer.insert_str(at, text);
            *cursor += text.chars().count();
        });
    }

    pub fn insert_char(&mut self, c: char) {
        self.edit_focused(|answer, cursor| {
            let at = byte_offset(answer, *cursor);
            answer.insert(at, c);
            *cursor += 1;
        });
    }

    pub fn backspace(&mut self) {
        self.edit_focused(|answer, cursor| {
            if *cursor > 0 {
                let at = byte_offset(answer, *cursor - 1);
                answer.remove(at);
                *cursor -= 1;
            }
        });
    }

    pub fn delete(&mut self) {
        self.edit_focused(|answer, cursor| {
            if *cursor < answer.chars().count() {
                let at = byte_offset(answer, *cursor);
                answer.remove(at);
            }
        });
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let len = self.focused_answer().chars().count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.focused_answer().chars().count();
    }

    /// The "next" action: moves focus forward, or submits from the last word.
    pub fn next<S: KeyValueStore>(
        &mut self,
        store: &mut SessionStore<S>,
    ) -> Result<Option<Navigation>, StoreError> {
        if self.focus + 1 < self.words.len() {
            self.focus_next();
            return Ok(None);
        }
        self.submit(store)
    }

    /// Grades every word in order. Missing input counts as an empty answer.
    pub fn graded_answers(&self) -> Vec<QuizAnswer> {
        self.words
            .iter()
            .map(|word| {
                let typed = self.answer(&word.id);
                let user_answer = match self.direction {
                    Direction::EngToKor => typed.to_string(),
                    Direction::KorToEng => typed.trim().to_string(),
                };
                QuizAnswer {
                    word_id: word.id.clone(),
                    is_correct: grade(self.direction, word.expected(self.direction), typed),
                    user_answer,
                }
            })
            .collect()
    }

    /// `Active -> Submitting -> Done`. Returns the next screen, or `None` if a
    /// submission already happened.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut SessionStore<S>,
    ) -> Result<Option<Navigation>, StoreError> {
        if self.state != RunnerState::Active {
            debug!(state = ?self.state, "ignoring repeated submit");
            return Ok(None);
        }
        self.state = RunnerState::Submitting;

        let answers = self.graded_answers();
        if let Err(err) = store.save_answers(self.direction, &answers) {
            error!(direction = ?self.direction, %err, "failed to store answers");
            self.state = RunnerState::Active;
            return Err(err);
        }

        let correct = answers.iter().filter(|a| a.is_correct).count();
        info!(
            direction = ?self.direction,
            correct,
            total = answers.len(),
            "quiz submitted"
        );
        self.state = RunnerState::Done;
        Ok(Some(self.direction.next_stage()))
    }
}

fn byte_offset(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
