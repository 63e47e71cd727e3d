pub mod stats;
pub mod status_bar;

use crate::app::App;
use crate::ui::{stats::render_stats, status_bar::render_status_bar};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn render(app: &mut App, f: &mut Frame) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Status bar
            ]
            .as_ref(),
        )
        .split(size);

    render_title(f, app, chunks[0]);

    if app.show_help {
        render_help(f, chunks[1]);
    } else {
        render_stats(f, app, chunks[1]);
    }

    render_status_bar(f, app, chunks[2]);

    if let Some(error) = &app.state.error_message {
        if let Some(timestamp) = app.state.error_timestamp {
            if timestamp.elapsed() < std::time::Duration::from_secs(5) {
                render_error(f, error, size);
            }
        }
    }
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.paused {
        Line::from(vec![
            "XP Tracker ".into(),
            ratatui::text::Span::styled(
                "[PAUSED]",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from("XP Tracker")
    };

    let widget = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL).title("xp-tui"));
    f.render_widget(widget, area);
}

fn render_error(f: &mut Frame, error: &str, area: Rect) {
    let area = centered_rect(60, 5, area);
    let error_widget = Paragraph::new(error)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        )
        .style(Style::default());
    f.render_widget(Clear, area);
    f.render_widget(error_widget, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from("XP Tracker Help"),
        Line::from(""),
        Line::from("Global Commands:"),
        Line::from("  q      - Quit application"),
        Line::from("  ?      - Toggle this help screen"),
        Line::from("  p      - Pause/resume sampling"),
        Line::from("  r      - Force a refresh"),
        Line::from("  Esc    - Close this help screen"),
        Line::from(""),
        Line::from("Statistics Information:"),
        Line::from("  - Projected XP and progress rates over the chosen window"),
        Line::from("  - Time to level up as a compact duration"),
        Line::from("  - Updates every refresh cycle (5s by default)"),
        Line::from("  - Maintains history of last 100 data points"),
    ];

    let help =
        Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
