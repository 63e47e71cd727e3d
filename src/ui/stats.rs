use crate::app::App;
use crate::state::RatePoint;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::{symbols, Frame};

pub fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(7), // Summary
                Constraint::Min(0),    // Charts
            ]
            .as_ref(),
        )
        .split(area);

    render_summary(f, app, chunks[0]);
    render_charts(f, app, chunks[1]);
}

fn render_summary(f: &mut Frame, app: &App, area: Rect) {
    let display = app.state.display.borrow().clone();

    let summary_text = vec![
        Line::from(format!("XP Rate: {}", display.exp_text)),
        Line::from(format!("Progress Rate: {}", display.percent_text)),
        Line::from(format!("Time to Level Up: {}", display.time_to_level_up_text)),
        Line::from(format!("Current XP: {}", app.state.stats.current_exp)),
        Line::from(format!(
            "Level Progress: {:.2}%",
            app.state.stats.level_progress
        )),
    ];

    let summary =
        Paragraph::new(summary_text).block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(summary, area);
}

fn render_charts(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let history: Vec<&RatePoint> = app.state.history.iter().collect();
    if history.is_empty() {
        return;
    }

    let suffix = app.state.window.suffix();
    render_rate_chart(
        f,
        chunks[0],
        &format!("XP{}", suffix),
        Color::Cyan,
        &history
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.exp_per_window))
            .collect::<Vec<_>>(),
    );
    render_rate_chart(
        f,
        chunks[1],
        &format!("Progress{}", suffix),
        Color::Yellow,
        &history
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.percent_per_window))
            .collect::<Vec<_>>(),
    );
}

fn render_rate_chart(f: &mut Frame, area: Rect, title: &str, color: Color, data: &[(f64, f64)]) {
    let max_y = data.iter().map(|(_, y)| *y).fold(0.0, f64::max);

    let datasets = vec![Dataset::default()
        .name(title.to_string())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)];

    let chart = Chart::new(datasets)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(Span::styled("Time", Style::default().fg(Color::Gray)))
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (data.len().saturating_sub(1)) as f64])
                .labels(
                    vec![
                        Span::styled("Oldest", Style::default().fg(Color::Gray)),
                        Span::styled("Now", Style::default().fg(Color::Gray)),
                    ]
                    .into_iter()
                    .map(Line::from)
                    .collect::<Vec<Line>>(),
                ),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Rate", Style::default().fg(Color::Gray)))
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (max_y * 1.1).max(1.0)])
                .labels(
                    vec![
                        Span::styled("0", Style::default().fg(Color::Gray)),
                        Span::styled(
                            format!("{:.0}", (max_y * 1.1).max(1.0)),
                            Style::default().fg(Color::Gray),
                        ),
                    ]
                    .into_iter()
                    .map(Line::from)
                    .collect::<Vec<Line>>(),
                ),
        );

    f.render_widget(chart, area);
}
