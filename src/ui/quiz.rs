use crate::quiz::{QuizRunner, RunnerState};
use crate::ui::layout::{calculate_quiz_chunks, scroll_offset};
use crate::utils::{cursor_column, truncate_string};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, runner: &QuizRunner, status: Option<&str>) {
    let layout = calculate_quiz_chunks(f.area());

    let (answered, total) = runner.progress();
    let mut progress = format!(
        "{} - {} / {} answered - target {} min",
        runner.direction().label(),
        answered,
        total,
        runner.target_time()
    );
    if runner.is_review() {
        progress.push_str(" (review)");
    }

    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let area = layout.answers_area;
    let visible = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(runner.focus(), visible);
    let prompt_width = (area.width.saturating_sub(2) / 2) as usize;

    let lines: Vec<Line> = if runner.words().is_empty() {
        vec![Line::from(Span::styled(
            "Nothing to review in this direction. Press Enter to continue.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        runner
            .words()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, word)| {
                let focused = i == runner.focus();
                let prompt = truncate_string(word.prompt(runner.direction()), prompt_width.saturating_sub(1));
                let pad = prompt_width.saturating_sub(unicode_width::UnicodeWidthStr::width(prompt.as_str()));
                let prompt_style = if focused {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let answer = runner.answer(&word.id);
                let answer_span = if answer.is_empty() && !focused {
                    Span::styled("…", Style::default().fg(Color::DarkGray))
                } else {
                    Span::from(answer.to_string())
                };
                Line::from(vec![
                    Span::styled(format!("{}{}", prompt, " ".repeat(pad)), prompt_style),
                    answer_span,
                ])
            })
            .collect()
    };

    let answers = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Your Answers"),
    );
    f.render_widget(answers, area);

    if runner.state() == RunnerState::Active
        && let Some(word) = runner.focused_word()
    {
        let row = u16::try_from(runner.focus().saturating_sub(offset)).unwrap_or(u16::MAX);
        let answer_width = area.width.saturating_sub(2).saturating_sub(prompt_width as u16);
        let column = cursor_column(runner.answer(&word.id), runner.cursor())
            .min(answer_width.saturating_sub(1) as usize) as u16;
        f.set_cursor_position((
            area.x
                .saturating_add(1)
                .saturating_add(prompt_width as u16)
                .saturating_add(column),
            area.y.saturating_add(1).saturating_add(row),
        ));
    }

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut help_text = vec![Line::from(vec![
        Span::styled("Enter", key_style),
        Span::from(" Next  "),
        Span::styled("↑/↓", key_style),
        Span::from(" Move  "),
        Span::styled("Ctrl+S", key_style),
        Span::from(" Submit  "),
        Span::styled("Esc", key_style),
        Span::from(" Back to Word List  "),
        Span::styled("Ctrl+C", key_style),
        Span::from(" Exit App"),
    ])];
    if let Some(status) = status {
        help_text.push(Line::from(Span::styled(
            status,
            Style::default().fg(Color::Red),
        )));
    }

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
