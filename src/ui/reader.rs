use crate::app::App;
use crate::ui::utils::{centered_columns, format_time, hex_to_rgb, render_footer, render_header};
use readfast::engine::PlaybackState;
use readfast::text::split_at_focal;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    render_header(f, app, "reading".to_string());

    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    draw_word(f, app, vertical_layout[1]);
    draw_status(f, app, centered_columns(vertical_layout[3], 80));

    render_footer(
        f,
        app,
        "space: play/pause | ←/→: skip | [/]: speed | r: restart | esc: back",
    );
}

/// Word on the middle row with its focal character pinned to the center
/// column, guide markers above and below.
fn draw_word(f: &mut Frame, app: &App, area: Rect) {
    let text_color = hex_to_rgb(&app.theme.text);
    let focal_color = hex_to_rgb(&app.theme.focal);
    let guide_color = hex_to_rgb(&app.theme.sub);

    let center = (area.width / 2) as usize;
    let (left, focal, right) = split_at_focal(app.reader.current_word());

    let left_span = Span::styled(left, Style::default().fg(text_color));
    let pad = center.saturating_sub(left_span.width());

    let word_line = Line::from(vec![
        Span::raw(" ".repeat(pad)),
        left_span,
        Span::styled(
            focal,
            Style::default().fg(focal_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(right, Style::default().fg(text_color)),
    ]);

    let marker = |symbol: &'static str| {
        Line::from(vec![
            Span::raw(" ".repeat(center)),
            Span::styled(symbol, Style::default().fg(guide_color)),
        ])
    };

    let lines = vec![
        marker("▼"),
        Line::from(""),
        word_line,
        Line::from(""),
        marker("▲"),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let reader = &app.reader;
    let sub_color = hex_to_rgb(&app.theme.sub);
    let sep = || Span::styled("  |  ", Style::default().fg(hex_to_rgb(&app.theme.sub_alt)));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let indicator = if reader.is_playing() { "▶ playing" } else { "⏸ paused" };

    let mut spans = vec![Span::styled(indicator, Style::default().fg(sub_color))];
    if reader.state() == PlaybackState::FinishedPaused {
        spans.push(sep());
        spans.push(Span::styled(
            "complete",
            Style::default()
                .fg(hex_to_rgb(&app.theme.done))
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.extend([
        sep(),
        Span::styled(format!("{} wpm", reader.speed()), Style::default().fg(sub_color)),
        sep(),
        Span::styled(
            format!("{}/{}", reader.position() + 1, reader.word_count()),
            Style::default().fg(sub_color),
        ),
        sep(),
        Span::styled(format_time(reader.time_remaining_secs()), Style::default().fg(sub_color)),
    ]);

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        rows[0],
    );

    f.render_widget(
        Paragraph::new(progress_line(
            reader.progress(),
            rows[1].width,
            hex_to_rgb(&app.theme.main),
            hex_to_rgb(&app.theme.sub_alt),
        )),
        rows[1],
    );
}

fn progress_line(ratio: f64, width: u16, filled: Color, empty: Color) -> Line<'static> {
    let width = width as usize;
    let done = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    Line::from(vec![
        Span::styled("━".repeat(done), Style::default().fg(filled)),
        Span::styled("─".repeat(width - done), Style::default().fg(empty)),
    ])
}
