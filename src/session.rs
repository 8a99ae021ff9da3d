use crate::app::App;
use crate::models::{AppState, Navigation};
use crate::store::KeyValueStore;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Routes one terminal event to the current screen.
pub fn handle_event<S: KeyValueStore>(app: &mut App<S>, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => handle_paste(app, &text),
        _ => {}
    }
}

pub fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.state {
        AppState::Intake => handle_intake_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Results => handle_results_input(app, key),
        AppState::ClearConfirm => handle_clear_confirm_input(app, key),
    }
}

pub fn handle_paste<S: KeyValueStore>(app: &mut App<S>, text: &str) {
    match app.state {
        AppState::Intake => app.intake.handle_paste(text),
        AppState::Quiz => {
            if let Some(runner) = app.runner.as_mut() {
                let line: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                runner.insert_str(&line);
            }
        }
        AppState::Results | AppState::ClearConfirm => {}
    }
}

pub fn handle_intake_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Up => app.intake.select_previous_file(),
        KeyCode::Down => app.intake.select_next_file(),
        KeyCode::Enter => app.intake.load_selected_file(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.intake.adjust_target_time(1),
        KeyCode::Char('-') => app.intake.adjust_target_time(-1),
        KeyCode::Char('s') => {
            let outcome = app.intake.start_quiz(&mut app.store);
            app.apply(outcome);
        }
        _ => {}
    }
}

pub fn handle_quiz_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    let Some(runner) = app.runner.as_mut() else {
        return;
    };

    let outcome = match key.code {
        KeyCode::Esc => {
            app.navigate(Navigation::Intake);
            return;
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            runner.submit(&mut app.store)
        }
        KeyCode::Enter => runner.next(&mut app.store),
        KeyCode::Down | KeyCode::Tab => {
            runner.focus_next();
            Ok(None)
        }
        KeyCode::Up | KeyCode::BackTab => {
            runner.focus_previous();
            Ok(None)
        }
        KeyCode::Left => {
            runner.cursor_left();
            Ok(None)
        }
        KeyCode::Right => {
            runner.cursor_right();
            Ok(None)
        }
        KeyCode::Home => {
            runner.cursor_home();
            Ok(None)
        }
        KeyCode::End => {
            runner.cursor_end();
            Ok(None)
        }
        KeyCode::Backspace => {
            runner.backspace();
            Ok(None)
        }
        KeyCode::Delete => {
            runner.delete();
            Ok(None)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            runner.insert_char(c);
            Ok(None)
        }
        _ => Ok(None),
    };
    app.apply(outcome);
}

pub fn handle_results_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('r') => {
            let Some(report) = app.report.as_ref() else {
                return;
            };
            match report.start_wrong_answers_quiz(&mut app.store) {
                Ok(Some(navigation)) => {
                    // The round is now in history; this report must not start it again.
                    app.report = None;
                    app.navigate(navigation);
                }
                outcome => app.apply(outcome),
            }
        }
        KeyCode::Char('n') => app.state = AppState::ClearConfirm,
        KeyCode::Up => app.results_scroll = app.results_scroll.saturating_sub(1),
        KeyCode::Down => app.results_scroll = app.results_scroll.saturating_add(1),
        KeyCode::PageUp => app.results_scroll = app.results_scroll.saturating_sub(10),
        KeyCode::PageDown => app.results_scroll = app.results_scroll.saturating_add(10),
        _ => {}
    }
}

pub fn handle_clear_confirm_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') => {
            let outcome = match app.report.as_mut() {
                Some(report) => report.clear_all_data(&mut app.store),
                None => app
                    .store
                    .clear_all()
                    .map(|_| Navigation::Intake),
            };
            match outcome {
                Ok(_) => app.reset_intake(),
                Err(err) => app.apply(Err(err)),
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => app.state = AppState::Results,
        _ => {}
    }
}
