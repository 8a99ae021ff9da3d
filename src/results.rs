use crate::error::StoreError;
use crate::models::{
    Direction, Navigation, QuizAnswer, SessionSnapshot, SessionSummary, StudySession, Word,
    WrongDirection,
};
use crate::store::{KeyValueStore, SessionStore};
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    pub percentage: u32,
}

impl Score {
    /// `None` for an empty sequence, which has no percentage.
    pub fn from_answers(answers: &[QuizAnswer]) -> Option<Self> {
        let correct = answers.iter().filter(|a| a.is_correct).count();
        Self::from_counts(correct, answers.len())
    }

    pub fn from_counts(correct: usize, total: usize) -> Option<Self> {
        Some(Self {
            correct,
            incorrect: total.saturating_sub(correct),
            total,
            percentage: percentage(correct, total)?,
        })
    }
}

/// `round(100 * correct / total)` with halves rounded up.
pub fn percentage(correct: usize, total: usize) -> Option<u32> {
    if total == 0 {
        return None;
    }
    let rounded = (200 * correct + total) / (2 * total);
    Some(rounded as u32)
}

/// Everything the user got wrong for one word, across both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongAnswer {
    pub word_id: String,
    pub word: Option<Word>,
    pub eng_to_kor_answer: String,
    pub kor_to_eng_answer: String,
    pub eng_to_kor_wrong: bool,
    pub kor_to_eng_wrong: bool,
}

impl WrongAnswer {
    fn empty(word_id: &str, word: Option<Word>) -> Self {
        Self {
            word_id: word_id.to_string(),
            word,
            eng_to_kor_answer: String::new(),
            kor_to_eng_answer: String::new(),
            eng_to_kor_wrong: false,
            kor_to_eng_wrong: false,
        }
    }

    pub fn is_wrong(&self, direction: Direction) -> bool {
        match direction {
            Direction::EngToKor => self.eng_to_kor_wrong,
            Direction::KorToEng => self.kor_to_eng_wrong,
        }
    }

    pub fn answer(&self, direction: Direction) -> &str {
        match direction {
            Direction::EngToKor => &self.eng_to_kor_answer,
            Direction::KorToEng => &self.kor_to_eng_answer,
        }
    }

    pub fn wrong_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.is_wrong(*d))
            .collect()
    }
}

/// One record per failed word, in first-seen order (forward pass first).
pub fn wrong_answers(
    words: &[Word],
    english_to_korean: &[QuizAnswer],
    korean_to_english: &[QuizAnswer],
) -> Vec<WrongAnswer> {
    let mut records: Vec<WrongAnswer> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();

    let passes = [
        (Direction::EngToKor, english_to_korean),
        (Direction::KorToEng, korean_to_english),
    ];
    for (direction, answers) in passes {
        for answer in answers.iter().filter(|a| !a.is_correct) {
            let index = *by_id.entry(answer.word_id.clone()).or_insert_with(|| {
                let word = words.iter().find(|w| w.id == answer.word_id).cloned();
                records.push(WrongAnswer::empty(&answer.word_id, word));
                records.len() - 1
            });
            let record = &mut records[index];
            match direction {
                Direction::EngToKor => {
                    record.eng_to_kor_wrong = true;
                    record.eng_to_kor_answer = answer.user_answer.clone();
                }
                Direction::KorToEng => {
                    record.kor_to_eng_wrong = true;
                    record.kor_to_eng_answer = answer.user_answer.clone();
                }
            }
        }
    }

    records
}

/// Totals over every stored round plus the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulativeSummary {
    pub total_time: i64,
    pub total_words: usize,
    pub total_correct: usize,
    /// Sum of the reverse-direction correct counts, as the results screen has
    /// always reported it.
    pub total_incorrect: usize,
    pub session_count: usize,
}

pub fn cumulative_summary(history: &[SessionSummary], current: &SessionSummary) -> CumulativeSummary {
    let all = history.iter().chain(std::iter::once(current));
    let mut summary = CumulativeSummary {
        total_time: 0,
        total_words: 0,
        total_correct: 0,
        total_incorrect: 0,
        session_count: 0,
    };
    for round in all {
        summary.total_time += round.total_time;
        summary.total_words += round.total_words;
        summary.total_correct += round.eng_to_kor_correct;
        summary.total_incorrect += round.kor_to_eng_correct;
        summary.session_count += 1;
    }
    summary
}

/// A word from an earlier round that was right in at least one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// 1-based round number.
    pub round: usize,
    pub is_review: bool,
    pub word: Word,
    pub eng_to_kor_correct: bool,
    pub kor_to_eng_correct: bool,
}

pub fn history_rows(round_index: usize, snapshot: &SessionSnapshot) -> Vec<HistoryRow> {
    let correct_in = |direction: Direction, word_id: &str| {
        snapshot
            .answers(direction)
            .iter()
            .find(|a| a.word_id == word_id)
            .is_some_and(|a| a.is_correct)
    };

    snapshot
        .words
        .iter()
        .filter_map(|word| {
            let eng_to_kor_correct = correct_in(Direction::EngToKor, &word.id);
            let kor_to_eng_correct = correct_in(Direction::KorToEng, &word.id);
            (eng_to_kor_correct || kor_to_eng_correct).then(|| HistoryRow {
                round: round_index + 1,
                is_review: snapshot.is_review,
                word: word.clone(),
                eng_to_kor_correct,
                kor_to_eng_correct,
            })
        })
        .collect()
}

/// The results screen's data: current round, its scores and the history.
#[derive(Debug, Clone)]
pub struct ResultsReport {
    session: StudySession,
    english_to_korean: Vec<QuizAnswer>,
    korean_to_english: Vec<QuizAnswer>,
    total_time: i64,
    history: Vec<SessionSummary>,
    history_rows: Vec<HistoryRow>,
}

impl ResultsReport {
    /// Requires the session, both answer sequences and a start time.
    pub fn load<S: KeyValueStore>(store: &SessionStore<S>) -> Result<Self, StoreError> {
        let session = store.load_session()?;
        let english_to_korean = store.load_answers(Direction::EngToKor)?;
        let korean_to_english = store.load_answers(Direction::KorToEng)?;
        let total_time = store.elapsed_seconds()?;
        let history = store.load_history()?;

        let mut rows = Vec::new();
        for index in 0..history.len() {
            match store.load_snapshot(index) {
                Ok(snapshot) => rows.extend(history_rows(index, &snapshot)),
                Err(err) => warn!(index, %err, "skipping unreadable round snapshot"),
            }
        }

        Ok(Self::new(
            session,
            english_to_korean,
            korean_to_english,
            total_time,
            history,
            rows,
        ))
    }

    pub fn new(
        session: StudySession,
        english_to_korean: Vec<QuizAnswer>,
        korean_to_english: Vec<QuizAnswer>,
        total_time: i64,
        history: Vec<SessionSummary>,
        history_rows: Vec<HistoryRow>,
    ) -> Self {
        Self {
            session,
            english_to_korean,
            korean_to_english,
            total_time,
            history,
            history_rows,
        }
    }

    pub fn session(&self) -> &StudySession {
        &self.session
    }

    pub fn total_time(&self) -> i64 {
        self.total_time
    }

    pub fn history(&self) -> &[SessionSummary] {
        &self.history
    }

    pub fn history_rows(&self) -> &[HistoryRow] {
        &self.history_rows
    }

    pub fn answers(&self, direction: Direction) -> &[QuizAnswer] {
        match direction {
            Direction::EngToKor => &self.english_to_korean,
            Direction::KorToEng => &self.korean_to_english,
        }
    }

    pub fn score(&self, direction: Direction) -> Option<Score> {
        Score::from_answers(self.answers(direction))
    }

    pub fn wrong_answers(&self) -> Vec<WrongAnswer> {
        wrong_answers(
            &self.session.words,
            &self.english_to_korean,
            &self.korean_to_english,
        )
    }

    /// Words of this round that were never answered wrongly.
    pub fn correct_words(&self) -> Vec<&Word> {
        let wrong = self.wrong_answers();
        self.session
            .words
            .iter()
            .filter(|w| !wrong.iter().any(|wa| wa.word_id == w.id))
            .collect()
    }

    pub fn current_summary(&self) -> SessionSummary {
        let count = |answers: &[QuizAnswer]| answers.iter().filter(|a| a.is_correct).count();
        SessionSummary {
            total_words: self.session.words.len(),
            eng_to_kor_correct: count(&self.english_to_korean),
            eng_to_kor_total: self.english_to_korean.len(),
            kor_to_eng_correct: count(&self.korean_to_english),
            kor_to_eng_total: self.korean_to_english.len(),
            total_time: self.total_time,
            is_review: self.session.is_review,
        }
    }

    /// Stored rounds followed by the current one.
    pub fn rounds(&self) -> Vec<SessionSummary> {
        let mut rounds = self.history.clone();
        rounds.push(self.current_summary());
        rounds
    }

    pub fn cumulative_summary(&self) -> CumulativeSummary {
        cumulative_summary(&self.history, &self.current_summary())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            words: self.session.words.clone(),
            english_to_korean: self.english_to_korean.clone(),
            korean_to_english: self.korean_to_english.clone(),
            is_review: self.session.is_review,
        }
    }

    /// Starts a review round of the wrong directions only. `None` when there
    /// is nothing to review; the store is left untouched in that case.
    pub fn start_wrong_answers_quiz<S: KeyValueStore>(
        &self,
        store: &mut SessionStore<S>,
    ) -> Result<Option<Navigation>, StoreError> {
        let wrong: Vec<WrongAnswer> = self
            .wrong_answers()
            .into_iter()
            .filter(|wa| wa.word.is_some())
            .collect();

        let wrong_directions: Vec<WrongDirection> = wrong
            .iter()
            .flat_map(|wa| {
                wa.wrong_directions()
                    .into_iter()
                    .map(|direction| WrongDirection {
                        word_id: wa.word_id.clone(),
                        direction,
                    })
            })
            .collect();

        if wrong_directions.is_empty() {
            return Ok(None);
        }

        let words: Vec<Word> = wrong.into_iter().filter_map(|wa| wa.word).collect();
        let review = StudySession::review(
            &self.session,
            words,
            wrong_directions,
            store.clock().now(),
        );

        store.clear_answers()?;
        store.clear_start_time()?;
        store.save_session(&review)?;
        store.record_start_time()?;
        let index = store.append_history(self.current_summary(), &self.snapshot())?;

        info!(
            session = %review.id,
            words = review.words.len(),
            directions = review.wrong_directions.len(),
            history_index = index,
            "review round started"
        );
        Ok(Some(Navigation::Quiz(Direction::EngToKor)))
    }

    /// Wipes every stored key and the in-memory history.
    pub fn clear_all_data<S: KeyValueStore>(
        &mut self,
        store: &mut SessionStore<S>,
    ) -> Result<Navigation, StoreError> {
        store.clear_all()?;
        self.history.clear();
        self.history_rows.clear();
        info!("all quiz data cleared");
        Ok(Navigation::Intake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::fixed_clock;
    use crate::parser::parse_word_list;
    use crate::store::{MemoryStore, snapshot_key};

    fn answer(word_id: &str, user_answer: &str, is_correct: bool) -> QuizAnswer {
        QuizAnswer {
            word_id: word_id.to_string(),
            user_answer: user_answer.to_string(),
            is_correct,
        }
    }

    fn cat_dog() -> Vec<Word> {
        parse_word_list("cat\t고양이\ndog\t개").unwrap()
    }

    fn summary(words: usize, ek: usize, ke: usize, time: i64) -> SessionSummary {
        SessionSummary {
            total_words: words,
            eng_to_kor_correct: ek,
            eng_to_kor_total: words,
            kor_to_eng_correct: ke,
            kor_to_eng_total: words,
            total_time: time,
            is_review: false,
        }
    }

    fn report(forward: Vec<QuizAnswer>, reverse: Vec<QuizAnswer>) -> ResultsReport {
        let session = StudySession::new(cat_dog(), 10, fixed_clock().now());
        ResultsReport::new(session, forward, reverse, 75, Vec::new(), Vec::new())
    }

    fn stored(report: &ResultsReport) -> SessionStore<MemoryStore> {
        let mut store = SessionStore::new(MemoryStore::new()).with_clock(fixed_clock());
        store.save_session(report.session()).unwrap();
        store
            .save_answers(Direction::EngToKor, report.answers(Direction::EngToKor))
            .unwrap();
        store
            .save_answers(Direction::KorToEng, report.answers(Direction::KorToEng))
            .unwrap();
        store.record_start_time().unwrap();
        store
    }

    #[test]
    fn test_score_half_correct() {
        let answers = vec![answer("word-0", "고양이", true), answer("word-1", "새", false)];
        assert_eq!(
            Score::from_answers(&answers),
            Some(Score {
                correct: 1,
                incorrect: 1,
                total: 2,
                percentage: 50,
            })
        );
    }

    #[test]
    fn test_score_is_idempotent() {
        let answers = vec![answer("word-0", "a", true), answer("word-1", "b", false)];
        assert_eq!(Score::from_answers(&answers), Score::from_answers(&answers));
    }

    #[test]
    fn test_score_extremes() {
        let all_right: Vec<QuizAnswer> = (0..7).map(|i| answer(&format!("word-{i}"), "x", true)).collect();
        let all_wrong: Vec<QuizAnswer> = (0..7).map(|i| answer(&format!("word-{i}"), "x", false)).collect();
        assert_eq!(Score::from_answers(&all_right).unwrap().percentage, 100);
        assert_eq!(Score::from_answers(&all_wrong).unwrap().percentage, 0);
    }

    #[test]
    fn test_score_empty_is_undefined() {
        assert_eq!(Score::from_answers(&[]), None);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), Some(13)); // 12.5
        assert_eq!(percentage(1, 3), Some(33));
        assert_eq!(percentage(2, 3), Some(67));
        assert_eq!(percentage(5, 200), Some(3)); // 2.5
        assert_eq!(percentage(0, 0), None);
    }

    #[test]
    fn test_wrong_answers_forward_only() {
        let words = cat_dog();
        let forward = vec![answer("word-0", "고양이", true), answer("word-1", "새", false)];
        let reverse = vec![answer("word-0", "cat", true), answer("word-1", "dog", true)];

        let wrong = wrong_answers(&words, &forward, &reverse);
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0].word_id, "word-1");
        assert!(wrong[0].eng_to_kor_wrong);
        assert!(!wrong[0].kor_to_eng_wrong);
        assert_eq!(wrong[0].eng_to_kor_answer, "새");
        assert_eq!(wrong[0].wrong_directions(), vec![Direction::EngToKor]);
    }

    #[test]
    fn test_word_wrong_in_both_directions_appears_once() {
        let words = cat_dog();
        let forward = vec![answer("word-0", "개", false), answer("word-1", "개", true)];
        let reverse = vec![answer("word-0", "dog", false), answer("word-1", "dog", true)];

        let wrong = wrong_answers(&words, &forward, &reverse);
        assert_eq!(wrong.len(), 1);
        let record = &wrong[0];
        assert!(record.eng_to_kor_wrong && record.kor_to_eng_wrong);
        assert_eq!(record.answer(Direction::EngToKor), "개");
        assert_eq!(record.answer(Direction::KorToEng), "dog");
        assert_eq!(record.word.as_ref().unwrap().english, "cat");
    }

    #[test]
    fn test_wrong_answers_keep_first_seen_order() {
        let words = cat_dog();
        let forward = vec![answer("word-0", "", true), answer("word-1", "", false)];
        let reverse = vec![answer("word-0", "", false), answer("word-1", "", false)];

        let ids: Vec<String> = wrong_answers(&words, &forward, &reverse)
            .into_iter()
            .map(|w| w.word_id)
            .collect();
        assert_eq!(ids, vec!["word-1", "word-0"]);
    }

    #[test]
    fn test_wrong_answer_with_unknown_word() {
        let wrong = wrong_answers(&cat_dog(), &[answer("word-9", "x", false)], &[]);
        assert_eq!(wrong.len(), 1);
        assert!(wrong[0].word.is_none());
    }

    #[test]
    fn test_cumulative_summary_sums_rounds() {
        let history = vec![summary(4, 3, 2, 100), summary(2, 1, 1, 40)];
        let current = summary(1, 1, 0, 10);

        let total = cumulative_summary(&history, &current);
        assert_eq!(total.total_time, 150);
        assert_eq!(total.total_words, 7);
        assert_eq!(total.total_correct, 5);
        assert_eq!(total.total_incorrect, 3);
        assert_eq!(total.session_count, 3);
    }

    #[test]
    fn test_current_summary_and_rounds() {
        let report = report(
            vec![answer("word-0", "고양이", true), answer("word-1", "새", false)],
            vec![answer("word-0", "cat", true), answer("word-1", "dog", true)],
        );
        let current = report.current_summary();
        assert_eq!(current, SessionSummary {
            total_words: 2,
            eng_to_kor_correct: 1,
            eng_to_kor_total: 2,
            kor_to_eng_correct: 2,
            kor_to_eng_total: 2,
            total_time: 75,
            is_review: false,
        });
        assert_eq!(report.rounds(), vec![current]);
        let ids: Vec<&str> = report.correct_words().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["word-0"]);
    }

    #[test]
    fn test_history_rows_keep_partially_correct_words() {
        let snapshot = SessionSnapshot {
            words: cat_dog(),
            english_to_korean: vec![answer("word-0", "고양이", true), answer("word-1", "x", false)],
            korean_to_english: vec![answer("word-0", "x", false), answer("word-1", "x", false)],
            is_review: true,
        };

        let rows = history_rows(2, &snapshot);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].round, 3);
        assert!(rows[0].is_review);
        assert!(rows[0].eng_to_kor_correct);
        assert!(!rows[0].kor_to_eng_correct);
    }

    #[test]
    fn test_load_requires_all_keys() {
        let full = report(vec![answer("word-0", "고양이", true)], vec![]);
        let mut store = stored(&full);
        assert!(ResultsReport::load(&store).is_ok());

        store.clear_start_time().unwrap();
        let err = ResultsReport::load(&store).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_load_skips_unreadable_snapshots() {
        let full = report(vec![answer("word-0", "고양이", true)], vec![]);
        let mut store = stored(&full);
        store
            .append_history(summary(2, 1, 0, 30), &full.snapshot())
            .unwrap();
        assert_eq!(ResultsReport::load(&store).unwrap().history_rows().len(), 1);

        store.backend_mut().set(&snapshot_key(0), "{bad").unwrap();
        let loaded = ResultsReport::load(&store).unwrap();
        assert_eq!(loaded.history().len(), 1);
        assert!(loaded.history_rows().is_empty());

        store.backend_mut().remove(&snapshot_key(0)).unwrap();
        let loaded = ResultsReport::load(&store).unwrap();
        assert_eq!(loaded.history().len(), 1);
        assert!(loaded.history_rows().is_empty());
    }

    #[test]
    fn test_load_measures_elapsed_time() {
        let full = report(vec![], vec![]);
        let mut store = stored(&full);
        store.clock_mut().advance(chrono::Duration::seconds(95));

        let loaded = ResultsReport::load(&store).unwrap();
        assert_eq!(loaded.total_time(), 95);
    }

    #[test]
    fn test_start_wrong_answers_quiz_noop_when_all_correct() {
        let report = report(
            vec![answer("word-0", "고양이", true), answer("word-1", "개", true)],
            vec![answer("word-0", "cat", true), answer("word-1", "dog", true)],
        );
        let mut store = stored(&report);
        let before = store.backend().clone();

        assert_eq!(report.start_wrong_answers_quiz(&mut store).unwrap(), None);
        assert_eq!(store.backend().keys(), before.keys());
        assert_eq!(store.load_session().unwrap(), *report.session());
        assert!(store.load_history().unwrap().is_empty());
    }

    #[test]
    fn test_start_wrong_answers_quiz_builds_review_session() {
        let report = report(
            vec![answer("word-0", "고양이", true), answer("word-1", "새", false)],
            vec![answer("word-0", "dog", false), answer("word-1", "dog", true)],
        );
        let mut store = stored(&report);

        let nav = report.start_wrong_answers_quiz(&mut store).unwrap();
        assert_eq!(nav, Some(Navigation::Quiz(Direction::EngToKor)));

        let review = store.load_session().unwrap();
        assert!(review.is_review);
        assert_eq!(review.chapter, report.session().chapter);
        assert_eq!(review.target_time, report.session().target_time);
        let ids: Vec<&str> = review.words.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["word-1", "word-0"]);
        assert_eq!(
            review.wrong_directions,
            vec![
                WrongDirection {
                    word_id: "word-1".to_string(),
                    direction: Direction::EngToKor,
                },
                WrongDirection {
                    word_id: "word-0".to_string(),
                    direction: Direction::KorToEng,
                },
            ]
        );

        assert!(store.load_answers(Direction::EngToKor).is_err());
        assert!(store.load_answers(Direction::KorToEng).is_err());
        assert!(store.start_time().is_ok());

        let history = store.load_history().unwrap();
        assert_eq!(history, vec![report.current_summary()]);
        assert_eq!(store.load_snapshot(0).unwrap(), report.snapshot());
    }

    #[test]
    fn test_clear_all_data() {
        let mut report = report(vec![answer("word-0", "x", false)], vec![]);
        let mut store = stored(&report);
        report.start_wrong_answers_quiz(&mut store).unwrap();

        let nav = report.clear_all_data(&mut store).unwrap();
        assert_eq!(nav, Navigation::Intake);
        assert!(store.backend().is_empty());
        assert!(report.history().is_empty());
    }
}
