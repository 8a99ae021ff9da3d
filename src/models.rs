use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAPTER: u32 = 1;
pub const DEFAULT_TARGET_MINUTES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub english: String,
    pub korean: String,
}

impl Word {
    pub fn new(index: usize, english: &str, korean: &str) -> Self {
        Self {
            id: format!("word-{}", index),
            english: english.trim().to_string(),
            korean: korean.trim().to_string(),
        }
    }

    /// The side shown to the user for this direction.
    pub fn prompt(&self, direction: Direction) -> &str {
        match direction {
            Direction::EngToKor => &self.english,
            Direction::KorToEng => &self.korean,
        }
    }

    /// The side the user is expected to type for this direction.
    pub fn expected(&self, direction: Direction) -> &str {
        match direction {
            Direction::EngToKor => &self.korean,
            Direction::KorToEng => &self.english,
        }
    }
}

/// Which language is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "engToKor")]
    EngToKor,
    #[serde(rename = "korToEng")]
    KorToEng,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::EngToKor, Direction::KorToEng];

    pub fn label(self) -> &'static str {
        match self {
            Direction::EngToKor => "English → Korean",
            Direction::KorToEng => "Korean → English",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Direction::EngToKor => "EN→KO",
            Direction::KorToEng => "KO→EN",
        }
    }

    /// Where the flow goes once this direction has been submitted.
    pub fn next_stage(self) -> Navigation {
        match self {
            Direction::EngToKor => Navigation::Quiz(Direction::KorToEng),
            Direction::KorToEng => Navigation::Results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongDirection {
    pub word_id: String,
    pub direction: Direction,
}

fn default_chapter() -> u32 {
    DEFAULT_CHAPTER
}

fn default_target_time() -> u32 {
    DEFAULT_TARGET_MINUTES
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub words: Vec<Word>,
    pub created_at: String,
    #[serde(default)]
    pub date: String,
    #[serde(default = "default_chapter")]
    pub chapter: u32,
    /// Target duration in minutes.
    #[serde(default = "default_target_time")]
    pub target_time: u32,
    #[serde(default)]
    pub is_review: bool,
    #[serde(default)]
    pub wrong_directions: Vec<WrongDirection>,
}

impl StudySession {
    /// A fresh first-round session built from a parsed word list.
    pub fn new(words: Vec<Word>, target_time: u32, now: DateTime<Utc>) -> Self {
        let stamp = now.to_rfc3339();
        Self {
            id: format!("session-{}", now.timestamp_millis()),
            words,
            created_at: stamp.clone(),
            date: stamp,
            chapter: DEFAULT_CHAPTER,
            target_time,
            is_review: false,
            wrong_directions: Vec::new(),
        }
    }

    /// A remediation session restricted to the given wrong directions.
    pub fn review(
        previous: &StudySession,
        words: Vec<Word>,
        wrong_directions: Vec<WrongDirection>,
        now: DateTime<Utc>,
    ) -> Self {
        let stamp = now.to_rfc3339();
        Self {
            id: now.timestamp_millis().to_string(),
            words,
            created_at: stamp.clone(),
            date: stamp,
            chapter: previous.chapter,
            target_time: previous.target_time,
            is_review: true,
            wrong_directions,
        }
    }

    /// Words quizzed in `direction`. Review sessions only keep the words that
    /// were wrong in that direction.
    pub fn words_for(&self, direction: Direction) -> Vec<Word> {
        if !self.is_review {
            return self.words.clone();
        }
        self.words
            .iter()
            .filter(|word| {
                self.wrong_directions
                    .iter()
                    .any(|wd| wd.word_id == word.id && wd.direction == direction)
            })
            .cloned()
            .collect()
    }

    pub fn word(&self, id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub word_id: String,
    pub user_answer: String,
    pub is_correct: bool,
}

/// Per-round aggregate kept in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_words: usize,
    pub eng_to_kor_correct: usize,
    pub eng_to_kor_total: usize,
    pub kor_to_eng_correct: usize,
    pub kor_to_eng_total: usize,
    /// Elapsed seconds.
    pub total_time: i64,
    pub is_review: bool,
}

/// Raw copy of a completed round, stored next to its summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub english_to_korean: Vec<QuizAnswer>,
    #[serde(default)]
    pub korean_to_english: Vec<QuizAnswer>,
    #[serde(default)]
    pub is_review: bool,
}

impl SessionSnapshot {
    pub fn answers(&self, direction: Direction) -> &[QuizAnswer] {
        match direction {
            Direction::EngToKor => &self.english_to_korean,
            Direction::KorToEng => &self.korean_to_english,
        }
    }
}

/// A request to move to another screen, produced by flow operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Intake,
    Quiz(Direction),
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Intake,
    Quiz,
    Results,
    ClearConfirm,
}
