use ratatui::style::Color;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use crate::app::App;

pub fn hex_to_rgb(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        Color::Rgb(r, g, b)
    } else {
        Color::White
    }
}

/// Whole seconds as `m:ss`.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Centered band `percent` wide, the way every screen lays out its content.
pub fn centered_columns(area: Rect, percent: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(percent),
            Constraint::Fill(1),
        ])
        .split(area)[1]
}

pub fn render_header(f: &mut Frame, app: &App, detail: String) {
    let header_spans = vec![
        Span::styled(
            "readfast",
            Style::default()
                .fg(hex_to_rgb(&app.theme.main))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" | {}", detail),
            Style::default().fg(hex_to_rgb(&app.theme.sub)),
        ),
    ];

    let header_row_area = Rect::new(0, 1, f.area().width, 1);
    f.render_widget(
        Paragraph::new(Line::from(header_spans)),
        centered_columns(header_row_area, 82),
    );
}

pub fn render_footer(f: &mut Frame, app: &App, hints: &str) {
    if f.area().height == 0 {
        return;
    }
    let footer = Paragraph::new(hints.to_string())
        .style(Style::default().fg(hex_to_rgb(&app.theme.sub)))
        .alignment(Alignment::Center);
    f.render_widget(footer, Rect::new(0, f.area().height - 1, f.area().width, 1));
}
