pub mod layout;
mod intake;
mod quiz;
mod results;

pub use intake::draw_intake;
pub use layout::{calculate_intake_chunks, calculate_quiz_chunks, calculate_results_chunks};
pub use quiz::draw_quiz;
pub use results::{draw_clear_confirmation, draw_results, results_text};

use crate::app::App;
use crate::models::AppState;
use crate::store::KeyValueStore;
use ratatui::Frame;

/// Draws whichever screen the app is on.
pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let status = app.status.as_deref();
    match app.state {
        AppState::Intake => draw_intake(f, &app.intake),
        AppState::Quiz => {
            if let Some(runner) = &app.runner {
                draw_quiz(f, runner, status);
            }
        }
        AppState::Results => {
            if let Some(report) = &app.report {
                draw_results(f, report, app.results_scroll, status);
            }
        }
        AppState::ClearConfirm => draw_clear_confirmation(f),
    }
}
