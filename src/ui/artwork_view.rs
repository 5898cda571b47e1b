//! Artwork screen rendering
//!
//! Renders the current artwork frame, the optional details panel and the
//! settings/status bar, or the failure notice when the last load failed.

use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::data::Artwork;
use crate::settings::{ColorMode, Rgb, Settings};

/// Renders the artwork screen for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);

    if let AppState::Failed(reason) = &app.state {
        render_failure(frame, reason, chunks[1]);
    } else if app.settings.show_details {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[1]);
        render_artwork_frame(frame, app, body[0]);
        render_details(frame, app.current_artwork(), body[1]);
    } else {
        render_artwork_frame(frame, app, chunks[1]);
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .current_artwork()
        .map(|art| art.display_title().to_string())
        .unwrap_or_else(|| "artgrid".to_string());

    let position = app
        .position()
        .map(|(i, n)| format!(" {}/{} ", i, n))
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(position, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Foreground and cell styles for the artwork frame under the given settings
///
/// Sampled colors come from the image itself, so the terminal defaults are
/// kept for them.
pub fn frame_styles(settings: &Settings) -> (Style, Style) {
    let background = Style::default().bg(settings.background_color.to_color());

    let mut cell = background;
    if settings.cell_color_mode == ColorMode::Fixed {
        cell = cell.bg(settings.cell_color.to_color());
    }
    if settings.char_color_mode == ColorMode::Fixed {
        cell = cell.fg(settings.char_color.to_color());
    }

    (background, cell)
}

fn render_artwork_frame(frame: &mut Frame, app: &App, area: Rect) {
    let (background, cell) = frame_styles(&app.settings);

    let lines = match app.current_artwork() {
        Some(art) => match art.image_url() {
            Some(url) => vec![
                Line::from(""),
                Line::from(Span::styled(format!(" {} ", art.display_title()), cell)),
                Line::from(""),
                Line::from(Span::styled(url, Style::default().fg(Color::DarkGray))),
            ],
            None => vec![
                Line::from(""),
                Line::from(Span::styled(format!(" {} ", art.display_title()), cell)),
                Line::from(""),
                Line::from(Span::styled(
                    "No image available for this artwork",
                    Style::default().fg(Color::Yellow),
                )),
            ],
        },
        None if app.state == AppState::Loading => vec![Line::from("Loading artworks...")],
        None => vec![Line::from(Span::styled(
            "No artworks in this batch. Press n to fetch more.",
            Style::default().fg(Color::Yellow),
        ))],
    };

    let block = Block::default()
        .title(" Artwork ")
        .borders(Borders::ALL)
        .style(background);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_details(frame: &mut Frame, artwork: Option<&Artwork>, area: Rect) {
    let label = Style::default().fg(Color::Yellow);

    let mut lines = Vec::new();
    if let Some(art) = artwork {
        lines.push(Line::from(Span::styled(
            art.display_title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Artist", label)));
        // artist_display separates name and nationality with a newline
        for part in art.display_artist().lines() {
            lines.push(Line::from(part.to_string()));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Date  ", label),
            Span::raw(art.display_date().to_string()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("ID    ", label),
            Span::raw(art.id.to_string()),
        ]));
    } else {
        lines.push(Line::from("Nothing selected"));
    }

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_failure(frame: &mut Frame, reason: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Could not load artworks",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(reason.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to retry or q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn mode_span(name: &str, mode: ColorMode, color: Rgb) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled(format!("{} ", name), Style::default().fg(Color::DarkGray)),
        Span::raw(mode.label()),
    ];
    if mode == ColorMode::Fixed {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("■", Style::default().fg(color.to_color())));
        spans.push(Span::raw(format!(" {}", color)));
    }
    spans.push(Span::raw("  "));
    spans
}

/// Formats the age of the cache slot, e.g. "cached 12m ago"
pub fn format_cache_age(age_secs: i64) -> String {
    let age_secs = age_secs.max(0);
    if age_secs < 60 {
        "cached just now".to_string()
    } else {
        format!("cached {}m ago", age_secs / 60)
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let settings = &app.settings;

    let mut spans = Vec::new();
    spans.extend(mode_span("char", settings.char_color_mode, settings.char_color));
    spans.extend(mode_span("cell", settings.cell_color_mode, settings.cell_color));
    spans.push(Span::styled("bg ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::raw(format!("{}  ", settings.background_color)));

    if let Some(cached_at) = app.cached_at {
        let age = (Utc::now() - cached_at).num_seconds();
        spans.push(Span::styled(
            format!("{}  ", format_cache_age(age)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled("? help", Style::default().fg(Color::DarkGray)));

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RecordCache;
    use crate::data::fake::{artworks, FakeSource};
    use crate::store::MemoryStore;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn test_app(records: Vec<Artwork>) -> App {
        let cache = RecordCache::new(
            Arc::new(FakeSource::new(1, Vec::new())),
            Arc::new(MemoryStore::new()),
        );
        let mut app = App::new(cache, Settings::default());
        app.replace_records(records);
        app.state = AppState::Viewing;
        app
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_title_and_position() {
        let app = test_app(artworks(42, 3));
        let content = render_to_string(&app);

        assert!(content.contains("Artwork 42"));
        assert!(content.contains("1/3"));
        assert!(content.contains("iiif/2/img-42"));
    }

    #[test]
    fn test_details_hidden_by_default() {
        let app = test_app(artworks(1, 1));
        let content = render_to_string(&app);
        assert!(!content.contains("Details"));
    }

    #[test]
    fn test_details_panel_shows_fallbacks() {
        let mut app = test_app(artworks(1, 1));
        app.settings.show_details = true;

        let content = render_to_string(&app);

        assert!(content.contains("Details"));
        assert!(content.contains("Unknown Artist"));
        assert!(content.contains("N/A"), "missing date falls back to N/A");
    }

    #[test]
    fn test_artwork_without_image() {
        let mut records = artworks(1, 1);
        records[0].image_id = None;
        let app = test_app(records);

        let content = render_to_string(&app);

        assert!(content.contains("No image available"));
    }

    #[test]
    fn test_failure_view_shows_reason() {
        let mut app = test_app(Vec::new());
        app.state = AppState::Failed("The collection is empty".to_string());

        let content = render_to_string(&app);

        assert!(content.contains("Could not load artworks"));
        assert!(content.contains("The collection is empty"));
    }

    #[test]
    fn test_empty_batch_message() {
        let app = test_app(Vec::new());
        let content = render_to_string(&app);
        assert!(content.contains("No artworks in this batch"));
    }

    #[test]
    fn test_status_bar_shows_modes() {
        let app = test_app(artworks(1, 1));
        let content = render_to_string(&app);
        assert!(content.contains("sampled"));
        assert!(content.contains("fixed"));
        assert!(content.contains("#000000"));
    }

    #[test]
    fn test_frame_styles_follow_modes() {
        let mut settings = Settings::default();
        settings.char_color_mode = ColorMode::Fixed;
        settings.char_color = Rgb::new(1, 2, 3);
        settings.cell_color_mode = ColorMode::Sampled;
        settings.background_color = Rgb::new(9, 9, 9);

        let (background, cell) = frame_styles(&settings);

        assert_eq!(background.bg, Some(Color::Rgb(9, 9, 9)));
        assert_eq!(cell.fg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(cell.bg, Some(Color::Rgb(9, 9, 9)));
    }

    #[test]
    fn test_format_cache_age() {
        assert_eq!(format_cache_age(5), "cached just now");
        assert_eq!(format_cache_age(-3), "cached just now");
        assert_eq!(format_cache_age(125), "cached 2m ago");
    }
}
