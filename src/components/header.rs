//! Navigation header and help bar

use crate::model::Section;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_span(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Nav links for every section, the active one highlighted
pub fn nav_line(active: Section) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, section) in Section::all().iter().enumerate() {
        let style = if *section == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, section.title()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Section whose nav link sits under a terminal cell of the header
pub fn nav_link_at(header: Rect, column: u16, row: u16) -> Option<Section> {
    // Links are drawn on the first line inside the border
    if row != header.y + 1 || column <= header.x {
        return None;
    }
    let mut offset = (column - header.x - 1) as usize;
    for (span, section) in nav_line(Section::Home)
        .spans
        .iter()
        .step_by(2)
        .zip(Section::all())
    {
        let width = span.width() + 1;
        if offset < width - 1 {
            return Some(section);
        }
        if offset < width {
            return None;
        }
        offset -= width;
    }
    None
}

pub fn draw_header(
    frame: &mut Frame,
    area: Rect,
    active: Section,
    member: Option<&str>,
    pending: usize,
) {
    let mut account = match member {
        Some(name) => format!(" Signed in as {} ", name),
        None => " Guest ".to_string(),
    };
    if pending > 0 {
        account = format!(" ⟳ {} pending ·{}", pending, account);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(Span::styled(
            " SkillShare Hub ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .title_top(
            Line::from(Span::styled(account, Style::default().fg(Color::Cyan))).right_aligned(),
        );

    frame.render_widget(Paragraph::new(nav_line(active)).block(block), area);
}

pub fn draw_help_bar(frame: &mut Frame, area: Rect, modal_open: bool, menu_open: bool) {
    let spans = if modal_open {
        vec![
            key_span("Enter", Color::Green),
            Span::raw("Submit  "),
            key_span("Tab", Color::Cyan),
            Span::raw("Next field  "),
            key_span("Esc", Color::Yellow),
            Span::raw("Close  "),
            Span::styled("click outside to close", Style::default().fg(Color::DarkGray)),
        ]
    } else if menu_open {
        vec![
            key_span("j/k", Color::Cyan),
            Span::raw("Move  "),
            key_span("Enter", Color::Green),
            Span::raw("Go  "),
            key_span("Esc", Color::Yellow),
            Span::raw("Close menu"),
        ]
    } else {
        vec![
            key_span("q", Color::Yellow),
            Span::raw("Quit "),
            key_span("m", Color::Cyan),
            Span::raw("Menu "),
            key_span("j/k", Color::Cyan),
            Span::raw("Cards "),
            key_span("Enter", Color::Green),
            Span::raw("Open "),
            key_span("+", Color::Green),
            Span::raw("Like "),
            key_span("i/r/t", Color::Green),
            Span::raw("Login/Join/Quiz "),
            key_span("x/X", Color::Yellow),
            Span::raw("Dismiss/All"),
        ]
    };

    let help = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(help, area);
}
