use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let last_update = match app.state.last_update {
        Some(at) => format!("{}s ago", at.elapsed().as_secs()),
        None => "never".to_string(),
    };

    let status = format!(
        "Window: {} | Interval: {}s | Samples: {} | Last Update: {} {}",
        app.state.window.label(),
        app.state.refresh_interval.as_secs(),
        app.state.tracker.sample_count(),
        last_update,
        if app.paused { "| PAUSED" } else { "" }
    );

    let status_widget = Paragraph::new(Line::from(status))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    f.render_widget(status_widget, area);
}
