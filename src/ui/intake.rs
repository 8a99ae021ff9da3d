use crate::intake::IntakeState;
use crate::ui::layout::calculate_intake_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn draw_intake(f: &mut Frame, intake: &IntakeState) {
    let layout = calculate_intake_chunks(f.area());

    let title = Paragraph::new("Vocabulary Quiz")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut settings = vec![Line::from(format!(
        "Target time: {} min",
        intake.target_time
    ))];
    match &intake.error {
        Some(error) => settings.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))),
        None => settings.push(Line::from(Span::styled(
            "Paste two columns (English, Korean) copied from a spreadsheet.",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    let settings = Paragraph::new(settings).block(Block::default().borders(Borders::ALL));
    f.render_widget(settings, layout.settings_area);

    let file_items: Vec<ListItem> = if intake.files.is_empty() {
        vec![ListItem::new("No word list files").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        intake
            .files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let style = if i == intake.selected_file {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(name).style(style)
            })
            .collect()
    };
    let files = List::new(file_items).block(Block::default().borders(Borders::ALL).title("Word lists"));
    f.render_widget(files, layout.files_area);

    let column = (layout.words_area.width.saturating_sub(4) / 2) as usize;
    let word_items: Vec<ListItem> = if intake.words.is_empty() {
        vec![ListItem::new("Nothing pasted yet").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        intake
            .words
            .iter()
            .map(|word| {
                let english = truncate_string(&word.english, column.saturating_sub(1));
                ListItem::new(Line::from(vec![
                    Span::from(format!("{:<width$}", english, width = column)),
                    Span::from(truncate_string(&word.korean, column)),
                ]))
            })
            .collect()
    };
    let words = List::new(word_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Words ({})", intake.words.len())),
    );
    f.render_widget(words, layout.words_area);

    let help_text = vec![Line::from(vec![
        Span::from("Paste to load  "),
        key_span("↑/↓"),
        Span::from(" File  "),
        key_span("Enter"),
        Span::from(" Load File  "),
        key_span("+/-"),
        Span::from(" Target Time  "),
        key_span("s"),
        Span::from(" Start Quiz  "),
        key_span("Esc"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
