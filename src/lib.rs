pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod intake;
pub mod logger;
pub mod models;
pub mod parser;
pub mod quiz;
pub mod results;
pub mod session;
pub mod store;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::App;
pub use clock::Clock;
pub use config::{Args, Config};
pub use error::{AppError, FormatError, StoreError};
pub use intake::IntakeState;
pub use models::{
    AppState, Direction, Navigation, QuizAnswer, SessionSnapshot, SessionSummary, StudySession,
    Word, WrongDirection,
};
pub use parser::{load_word_list, parse_word_list, word_list_files};
pub use quiz::{QuizRunner, RunnerState, grade};
pub use results::{ResultsReport, Score, WrongAnswer};
pub use session::handle_event;
pub use store::{KeyValueStore, MemoryStore, SessionStore, SqliteStore};
pub use ui::draw;
