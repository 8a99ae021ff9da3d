use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct IntakeLayout {
    pub header_area: Rect,
    pub settings_area: Rect,
    pub files_area: Rect,
    pub words_area: Rect,
    pub help_area: Rect,
}

pub struct QuizLayout {
    pub header_area: Rect,
    pub answers_area: Rect,
    pub help_area: Rect,
}

pub struct ResultsLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub footer_area: Rect,
}

pub fn calculate_intake_chunks(area: Rect) -> IntakeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[2]);

    IntakeLayout {
        header_area: chunks[0],
        settings_area: chunks[1],
        files_area: body[0],
        words_area: body[1],
        help_area: chunks[3],
    }
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        answers_area: chunks[1],
        help_area: chunks[2],
    }
}

pub fn calculate_results_chunks(area: Rect) -> ResultsLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    ResultsLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        footer_area: chunks[2],
    }
}

/// First visible row so that `focus` stays on screen in a list of
/// `visible` rows.
pub fn scroll_offset(focus: usize, visible: usize) -> usize {
    if visible == 0 {
        return focus;
    }
    focus.saturating_sub(visible - 1)
}
