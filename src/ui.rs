use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    session::{KeystrokeRecord, Status},
    stats::LessonStats,
    util::{format_elapsed, format_percent},
    words::LETTERS,
};

const HORIZONTAL_MARGIN: u16 = 5;
const ORANGE: Color = Color::Rgb(255, 165, 0);

fn visible(c: char) -> String {
    match c {
        ' ' => "·".to_owned(),
        c => c.to_string(),
    }
}

fn record_span(record: &KeystrokeRecord, is_cursor: bool, is_typed: bool) -> Span<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = bold.add_modifier(Modifier::DIM);

    if is_cursor {
        return Span::styled(
            record.expected.to_string(),
            dim.add_modifier(Modifier::UNDERLINED).bg(Color::DarkGray),
        );
    }
    if !is_typed {
        return Span::styled(record.expected.to_string(), dim);
    }

    match record.status {
        Status::Correct => Span::styled(record.expected.to_string(), bold.fg(Color::Green)),
        Status::ErrorFixed => Span::styled(record.expected.to_string(), bold.fg(ORANGE)),
        Status::ErrorUnfixed => Span::styled(
            visible(record.typed.unwrap_or(record.expected)),
            bold.fg(Color::White).bg(Color::Red),
        ),
        Status::Untyped => Span::styled(record.expected.to_string(), dim),
    }
}

/// Rows needed to wrap a prompt of `text_width` columns into `width`.
fn prompt_lines(text_width: usize, width: u16) -> u16 {
    let text_width = u16::try_from(text_width).unwrap_or(u16::MAX);
    text_width.div_ceil(width.max(1)).max(1)
}

fn letters_line(unlocked: usize) -> Line<'static> {
    let letters = LETTERS.chars().enumerate().map(|(i, letter)| {
        let style = if i < unlocked {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        Span::styled(letter.to_string(), style)
    });

    Line::from(Itertools::intersperse(letters, Span::raw(" ")).collect::<Vec<_>>())
}

fn results_lines(stats: &LessonStats, target_wpm: u32) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let verdict = if stats.met_target(target_wpm) {
        Span::styled(format!("  (target {target_wpm} met)"), bold.fg(Color::Green))
    } else {
        Span::styled(
            format!("  (target {target_wpm})"),
            Style::default().add_modifier(Modifier::DIM),
        )
    };

    vec![
        Line::from(vec![
            Span::styled(format!("{:.0} WPM", stats.words_per_minute), bold),
            verdict,
        ]),
        Line::from(vec![
            Span::styled(stats.total.to_string(), bold),
            Span::raw(" / "),
            Span::styled(stats.correct.to_string(), bold.fg(Color::Green)),
            Span::raw(" / "),
            Span::styled(stats.fixed.to_string(), bold.fg(ORANGE)),
            Span::raw(" / "),
            Span::styled(stats.unfixed.to_string(), bold.fg(Color::Red)),
        ]),
        Line::from(Span::styled(
            format!("{} accuracy", format_percent(stats.accuracy)),
            bold,
        )),
    ]
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
        let prompt_rows = prompt_lines(session.target_text().width(), width);
        let results = self.stats();
        let results_height = if results.is_some() { 3 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // letters
                Constraint::Length(1),
                Constraint::Length(prompt_rows),
                Constraint::Length(1), // timer
                Constraint::Length(1), // status
                Constraint::Length(results_height),
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(letters_line(session.unlocked_letters()))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let cursor = (!session.is_completed()).then_some(session.index());
        let spans = session
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| record_span(record, cursor == Some(i), i < session.index()))
            .collect::<Vec<_>>();

        Paragraph::new(Line::from(spans))
            .alignment(if prompt_rows == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            format_elapsed(session.elapsed(Instant::now())),
            Style::default().add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        if let Some(message) = self.status_message() {
            Paragraph::new(Span::styled(
                message.to_owned(),
                Style::default().fg(Color::Yellow),
            ))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }

        if let Some(stats) = results {
            Paragraph::new(results_lines(&stats, session.config().target_wpm))
                .alignment(Alignment::Center)
                .render(chunks[6], buf);
        }

        let legend = if session.is_completed() {
            "type to continue / ctrl+t retry / +/- letters / esc quit"
        } else {
            "ctrl+r new / ctrl+t retry / +/- letters / esc quit"
        };
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[8], buf);
    }
}
