use crate::app::App;
use crate::ui::utils::{centered_columns, format_time, hex_to_rgb, render_footer, render_header};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let reader = &app.reader;
    let full_read = reader.word_count() as f64 * reader.tick_interval_secs();
    render_header(
        f,
        app,
        format!(
            "{} words | {} at {} wpm",
            reader.word_count(),
            format_time(full_read),
            reader.speed()
        ),
    );

    let main_area = Rect::new(0, 3, f.area().width, f.area().height.saturating_sub(5));

    if reader.raw_text().is_empty() {
        draw_empty_state(f, app, main_area);
    } else {
        draw_text(f, app, main_area);
    }

    if let Some(status) = &app.status {
        let status_row = Rect::new(0, f.area().height.saturating_sub(2), f.area().width, 1);
        f.render_widget(
            Paragraph::new(status.as_str())
                .style(Style::default().fg(hex_to_rgb(&app.theme.done)))
                .alignment(Alignment::Right),
            centered_columns(status_row, 80),
        );
    }

    let hints = if reader.can_play() {
        "ctrl+r: start reading | ctrl+f: fix formatting | esc: quit"
    } else {
        "type or paste text | ctrl+g: get started | esc: quit"
    };
    render_footer(f, app, hints);
}

fn draw_empty_state(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            "Welcome to readfast",
            Style::default()
                .fg(hex_to_rgb(&app.theme.text))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "start typing, paste some text, or press ctrl+g",
            Style::default().fg(hex_to_rgb(&app.theme.sub)),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);
}

fn draw_text(f: &mut Frame, app: &App, area: Rect) {
    let text_area = centered_columns(area, 80);

    let text_style = Style::default().fg(hex_to_rgb(&app.theme.text));
    let caret_style = Style::default().bg(hex_to_rgb(&app.theme.main));

    // keep the end of the text, where typing happens, in view
    let visible = text_area.height as usize;
    let skip = app.visual_lines.len().saturating_sub(visible);
    let last_idx = app.visual_lines.len().saturating_sub(1);

    let mut lines: Vec<Line> = Vec::with_capacity(visible);
    for (i, line_str) in app.visual_lines.iter().enumerate().skip(skip) {
        let mut spans = vec![Span::styled(line_str.clone(), text_style)];
        if i == last_idx {
            spans.push(Span::styled(" ", caret_style));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), text_area);
}
