use clap::Parser;
use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "vocab-quiz.db";
pub const LOG_FILE_NAME: &str = "vocab_quiz.log";
pub const DEFAULT_WORDS_DIR: &str = "wordlists";

#[derive(Debug, Parser)]
#[command(
    name = "vocab-quiz",
    version,
    about = "English ↔ Korean vocabulary quiz in the terminal"
)]
pub struct Args {
    /// SQLite file holding the current session and history
    #[arg(long, env = "VOCAB_QUIZ_DB")]
    pub db: Option<PathBuf>,

    /// Directory of tab-separated word lists (.tsv, .txt)
    #[arg(long, env = "VOCAB_QUIZ_WORDS_DIR")]
    pub words_dir: Option<PathBuf>,

    /// Log file path
    #[arg(long, env = "VOCAB_QUIZ_LOG")]
    pub log_file: Option<PathBuf>,

    /// Keep everything in memory; nothing survives the process
    #[arg(long)]
    pub memory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub words_dir: PathBuf,
    pub log_file: PathBuf,
    pub in_memory: bool,
}

pub fn get_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\vocab-quiz")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/vocab-quiz")
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Self {
        let data_dir = get_data_dir();
        Self {
            db_path: args.db.unwrap_or_else(|| data_dir.join(DB_FILE_NAME)),
            words_dir: args
                .words_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDS_DIR)),
            log_file: args.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE_NAME)),
            in_memory: args.memory,
        }
    }
}
