use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{error, info};
use vocab_quiz::{
    App, AppError, Config, KeyValueStore, MemoryStore, SessionStore, SqliteStore, draw,
    handle_event, logger, word_list_files,
};

fn main() -> Result<(), AppError> {
    let config = Config::load();
    logger::init(&config.log_file)?;
    info!(?config, "starting vocab-quiz");

    let word_files = word_list_files(&config.words_dir);
    let result = if config.in_memory {
        run(SessionStore::new(MemoryStore::new()), word_files)
    } else {
        let store = SqliteStore::open(&config.db_path)?;
        run(SessionStore::new(store), word_files)
    };

    if let Err(err) = &result {
        error!(%err, "exiting with error");
    }
    result
}

fn run<S: KeyValueStore>(
    store: SessionStore<S>,
    word_files: Vec<std::path::PathBuf>,
) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, word_files);
    let outcome = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    outcome
}

fn event_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), AppError> {
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;
        let event = event::read()?;
        handle_event(app, event);
    }
    info!("quit requested");
    Ok(())
}
