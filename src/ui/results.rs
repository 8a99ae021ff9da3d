use crate::models::Direction;
use crate::results::ResultsReport;
use crate::ui::layout::calculate_results_chunks;
use crate::utils::{format_duration, format_percentage, round_label, truncate_string};
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn verdict(correct: bool) -> Span<'static> {
    if correct {
        Span::styled("correct", Style::default().fg(Color::Green))
    } else {
        Span::styled("wrong", Style::default().fg(Color::Red))
    }
}

/// All sections of the results screen as one scrollable text.
pub fn results_text(report: &ResultsReport) -> Text<'static> {
    let mut text = Text::default();

    text.push_line(heading("This round"));
    text.push_line(Line::from(format!(
        "Time: {}",
        format_duration(report.total_time())
    )));
    for direction in Direction::ALL {
        let line = match report.score(direction) {
            Some(score) => format!(
                "{}: {} ({} correct, {} wrong of {})",
                direction.label(),
                format_percentage(Some(score.percentage)),
                score.correct,
                score.incorrect,
                score.total
            ),
            None => format!("{}: no questions", direction.label()),
        };
        text.push_line(Line::from(line));
    }
    text.push_line(Line::from(""));

    let rounds = report.rounds();
    text.push_line(heading("Rounds"));
    for (i, round) in rounds.iter().enumerate() {
        text.push_line(Line::from(format!(
            "{}: {}  EN→KO {} ({}/{})  KO→EN {} ({}/{})",
            round_label(i, rounds.len(), round.is_review),
            format_duration(round.total_time),
            format_percentage(crate::results::percentage(
                round.eng_to_kor_correct,
                round.eng_to_kor_total
            )),
            round.eng_to_kor_correct,
            round.eng_to_kor_total,
            format_percentage(crate::results::percentage(
                round.kor_to_eng_correct,
                round.kor_to_eng_total
            )),
            round.kor_to_eng_correct,
            round.kor_to_eng_total,
        )));
    }
    let total = report.cumulative_summary();
    text.push_line(Line::from(format!(
        "All rounds: {} rounds, {} words, {} total",
        total.session_count,
        total.total_words,
        format_duration(total.total_time)
    )));
    text.push_line(Line::from(""));

    let wrong = report.wrong_answers();
    text.push_line(heading("Wrong answers"));
    if wrong.is_empty() {
        text.push_line(Line::from(Span::styled(
            "None. Every answer was correct.",
            Style::default().fg(Color::Green),
        )));
    }
    for record in &wrong {
        let (english, korean) = record
            .word
            .as_ref()
            .map(|w| (w.english.as_str(), w.korean.as_str()))
            .unwrap_or((record.word_id.as_str(), ""));
        let directions: Vec<&str> = record
            .wrong_directions()
            .into_iter()
            .map(Direction::short_label)
            .collect();
        text.push_line(Line::from(vec![
            Span::styled(
                format!("{} / {}", truncate_string(english, 30), truncate_string(korean, 30)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}]", directions.join(", ")),
                Style::default().fg(Color::Red),
            ),
        ]));
        for direction in Direction::ALL {
            if record.is_wrong(direction) {
                let typed = record.answer(direction);
                let typed = if typed.trim().is_empty() { "(blank)" } else { typed };
                text.push_line(Line::from(format!(
                    "   {} you typed: {}",
                    direction.short_label(),
                    truncate_string(typed, 40)
                )));
            }
        }
    }
    text.push_line(Line::from(""));

    text.push_line(heading("Correct words"));
    for word in report.correct_words() {
        text.push_line(Line::from(format!(
            "{} / {}",
            truncate_string(&word.english, 30),
            truncate_string(&word.korean, 30)
        )));
    }
    for row in report.history_rows() {
        let round = if row.is_review {
            format!("Round {} (review)", row.round)
        } else {
            format!("Round {}", row.round)
        };
        text.push_line(Line::from(vec![
            Span::from(format!(
                "{} / {}  ",
                truncate_string(&row.word.english, 30),
                truncate_string(&row.word.korean, 30)
            )),
            Span::from("EN→KO "),
            verdict(row.eng_to_kor_correct),
            Span::from("  KO→EN "),
            verdict(row.kor_to_eng_correct),
            Span::styled(format!("  {}", round), Style::default().fg(Color::DarkGray)),
        ]));
    }

    text
}

pub fn draw_results(f: &mut Frame, report: &ResultsReport, scroll: u16, status: Option<&str>) {
    let layout = calculate_results_chunks(f.area());

    let title = if report.session().is_review {
        "Results (review round)"
    } else {
        "Results"
    };
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let body = Paragraph::new(results_text(report))
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.content_area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    if !report.wrong_answers().is_empty() {
        spans.extend([Span::styled("r", key_style), Span::from(" Review Wrong Answers  ")]);
    }
    spans.extend([
        Span::styled("n", key_style),
        Span::from(" New Quiz  "),
        Span::styled("↑/↓", key_style),
        Span::from(" Scroll  "),
        Span::styled("q", key_style),
        Span::from(" Quit"),
    ]);
    let mut footer_text = vec![Line::from(spans)];
    if let Some(status) = status {
        footer_text = vec![Line::from(Span::styled(
            status,
            Style::default().fg(Color::Red),
        ))];
    }
    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, layout.footer_area);
}

pub fn draw_clear_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Start a New Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("This deletes the current session and every previous round.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Clear Everything)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Back to Results)  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
