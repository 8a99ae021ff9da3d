//! Typed persistence of the quiz flow over a string key-value backend.
//!
//! Every screen reads what the previous one wrote through [`SessionStore`];
//! nothing else is shared between screens.

use crate::clock::Clock;
use crate::error::StoreError;
use crate::models::{Direction, QuizAnswer, SessionSnapshot, SessionSummary, StudySession};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

pub mod memory;
pub mod sqlite;
#[cfg(test)]
pub(crate) mod testing;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const CURRENT_SESSION_KEY: &str = "currentSession";
pub const ENGLISH_TO_KOREAN_KEY: &str = "englishToKorean";
pub const KOREAN_TO_ENGLISH_KEY: &str = "koreanToEnglish";
pub const START_TIME_KEY: &str = "startTime";
pub const PREVIOUS_SESSIONS_KEY: &str = "previousSessions";

/// String-keyed, string-valued storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

pub fn answers_key(direction: Direction) -> &'static str {
    match direction {
        Direction::EngToKor => ENGLISH_TO_KOREAN_KEY,
        Direction::KorToEng => KOREAN_TO_ENGLISH_KEY,
    }
}

pub fn snapshot_key(index: usize) -> String {
    format!("session_{}_data", index)
}

pub struct SessionStore<S> {
    backend: S,
    clock: Clock,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    fn read_raw(&self, key: &str) -> Result<String, StoreError> {
        self.backend
            .get(key)?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError> {
        let raw = self.read_raw(key)?;
        serde_json::from_str(&raw).map_err(|e| StoreError::serialization(key, e))
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::serialization(key, e))?;
        debug!(key, bytes = raw.len(), "writing stored value");
        self.backend.set(key, &raw)
    }

    pub fn save_session(&mut self, session: &StudySession) -> Result<(), StoreError> {
        self.write_json(CURRENT_SESSION_KEY, session)
    }

    pub fn load_session(&self) -> Result<StudySession, StoreError> {
        self.read_json(CURRENT_SESSION_KEY)
    }

    pub fn save_answers(
        &mut self,
        direction: Direction,
        answers: &[QuizAnswer],
    ) -> Result<(), StoreError> {
        self.write_json(answers_key(direction), answers)
    }

    pub fn load_answers(&self, direction: Direction) -> Result<Vec<QuizAnswer>, StoreError> {
        self.read_json(answers_key(direction))
    }

    pub fn clear_answers(&mut self) -> Result<(), StoreError> {
        for direction in Direction::ALL {
            self.backend.remove(answers_key(direction))?;
        }
        Ok(())
    }

    /// Stores the current clock time in epoch milliseconds.
    pub fn record_start_time(&mut self) -> Result<(), StoreError> {
        let millis = self.clock.now_millis();
        self.backend.set(START_TIME_KEY, &millis.to_string())
    }

    pub fn start_time(&self) -> Result<i64, StoreError> {
        let raw = self.read_raw(START_TIME_KEY)?;
        raw.trim()
            .parse::<i64>()
            .map_err(|e| StoreError::serialization(START_TIME_KEY, e))
    }

    pub fn clear_start_time(&mut self) -> Result<(), StoreError> {
        self.backend.remove(START_TIME_KEY)
    }

    /// Whole seconds since the recorded start time, never negative.
    pub fn elapsed_seconds(&self) -> Result<i64, StoreError> {
        let start = self.start_time()?;
        let elapsed_ms = (self.clock.now_millis() - start).max(0);
        Ok(elapsed_ms / 1000)
    }

    /// Summaries of every completed round. A missing list is an empty history.
    pub fn load_history(&self) -> Result<Vec<SessionSummary>, StoreError> {
        match self.read_json(PREVIOUS_SESSIONS_KEY) {
            Err(StoreError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    pub fn load_snapshot(&self, index: usize) -> Result<SessionSnapshot, StoreError> {
        self.read_json(&snapshot_key(index))
    }

    /// Appends a completed round and stores its snapshot under the new index.
    /// Returns that index.
    pub fn append_history(
        &mut self,
        summary: SessionSummary,
        snapshot: &SessionSnapshot,
    ) -> Result<usize, StoreError> {
        let mut history = self.load_history()?;
        let index = history.len();
        history.push(summary);
        self.write_json(PREVIOUS_SESSIONS_KEY, &history)?;
        self.write_json(&snapshot_key(index), snapshot)?;
        Ok(index)
    }

    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        debug!("clearing all stored quiz data");
        self.backend.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::fixed_clock;
    use crate::models::Word;

    fn store() -> SessionStore<MemoryStore> {
        SessionStore::new(MemoryStore::new()).with_clock(fixed_clock())
    }

    fn session() -> StudySession {
        StudySession::new(
            vec![Word::new(0, "cat", "고양이"), Word::new(1, "dog", "개")],
            10,
            fixed_clock().now(),
        )
    }

    fn summary(total_time: i64) -> SessionSummary {
        SessionSummary {
            total_words: 2,
            eng_to_kor_correct: 1,
            eng_to_kor_total: 2,
            kor_to_eng_correct: 2,
            kor_to_eng_total: 2,
            total_time,
            is_review: false,
        }
    }

    #[test]
    fn test_session_roundtrip() {
        let mut store = store();
        store.save_session(&session()).unwrap();
        assert_eq!(store.load_session().unwrap(), session());
    }

    #[test]
    fn test_missing_session_is_not_found() {
        let store = store();
        let err = store.load_session().unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref key) if key == CURRENT_SESSION_KEY));
    }

    #[test]
    fn test_corrupt_session_is_serialization_error() {
        let mut backend = MemoryStore::new();
        backend.set(CURRENT_SESSION_KEY, "{not json").unwrap();
        let store = SessionStore::new(backend);

        let err = store.load_session().unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_answers_are_stored_per_direction() {
        let mut store = store();
        let forward = vec![QuizAnswer {
            word_id: "word-0".to_string(),
            user_answer: "고양이".to_string(),
            is_correct: true,
        }];
        store.save_answers(Direction::EngToKor, &forward).unwrap();

        assert_eq!(store.load_answers(Direction::EngToKor).unwrap(), forward);
        assert!(matches!(
            store.load_answers(Direction::KorToEng),
            Err(StoreError::NotFound(_))
        ));
        assert!(store.backend().get(ENGLISH_TO_KOREAN_KEY).unwrap().is_some());
    }

    #[test]
    fn test_clear_answers_removes_both_directions() {
        let mut store = store();
        store.save_answers(Direction::EngToKor, &[]).unwrap();
        store.save_answers(Direction::KorToEng, &[]).unwrap();
        store.clear_answers().unwrap();

        assert!(store.load_answers(Direction::EngToKor).is_err());
        assert!(store.load_answers(Direction::KorToEng).is_err());
    }

    #[test]
    fn test_start_time_is_epoch_millis_string() {
        let mut store = store();
        store.record_start_time().unwrap();
        let raw = store.backend().get(START_TIME_KEY).unwrap().unwrap();
        assert_eq!(raw, store.clock().now_millis().to_string());
    }

    #[test]
    fn test_elapsed_seconds_floors() {
        let mut store = store();
        store.record_start_time().unwrap();
        store
            .clock_mut()
            .advance(chrono::Duration::milliseconds(61_999));
        assert_eq!(store.elapsed_seconds().unwrap(), 61);
    }

    #[test]
    fn test_elapsed_seconds_without_start_time() {
        let store = store();
        assert!(matches!(
            store.elapsed_seconds(),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_bad_start_time_is_serialization_error() {
        let mut backend = MemoryStore::new();
        backend.set(START_TIME_KEY, "yesterday").unwrap();
        let store = SessionStore::new(backend);
        assert!(matches!(
            store.start_time(),
            Err(StoreError::Serialization { .. })
        ));
    }

    #[test]
    fn test_history_starts_empty() {
        assert!(store().load_history().unwrap().is_empty());
    }

    #[test]
    fn test_append_history_indexes_snapshots() {
        let mut store = store();
        let snapshot = SessionSnapshot {
            words: session().words,
            english_to_korean: Vec::new(),
            korean_to_english: Vec::new(),
            is_review: false,
        };

        assert_eq!(store.append_history(summary(30), &snapshot).unwrap(), 0);
        assert_eq!(store.append_history(summary(45), &snapshot).unwrap(), 1);

        let history = store.load_history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].total_time, 45);
        assert_eq!(store.load_snapshot(1).unwrap(), snapshot);
        assert!(store.backend().get("session_0_data").unwrap().is_some());
        assert!(matches!(
            store.load_snapshot(2),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_clear_all() {
        let mut store = store();
        store.save_session(&session()).unwrap();
        store.record_start_time().unwrap();
        store.clear_all().unwrap();

        assert!(store.load_session().is_err());
        assert!(store.start_time().is_err());
        assert!(store.backend().is_empty());
    }
}
