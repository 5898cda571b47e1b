//! Hex color entry popup

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::help_overlay::centered_rect;
use crate::app::ColorPrompt;
use crate::settings::Rgb;

/// Renders the prompt for `prompt.target`, showing the color it replaces
pub fn render(frame: &mut Frame, prompt: &ColorPrompt, current: Rgb) {
    let area = centered_rect(64, 7, frame.area());
    frame.render_widget(Clear, area);

    let status = match &prompt.error {
        Some(error) => Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(
            "Enter to apply, Esc to cancel",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Current: "),
            Span::styled("  ", Style::default().bg(current.to_color())),
            Span::raw(format!(" {}", current)),
        ]),
        Line::from(vec![
            Span::raw("New:     "),
            Span::styled(
                format!("{}_", prompt.input),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        status,
    ];

    let block = Block::default()
        .title(format!(" {} ", prompt.target.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
