#[cfg(test)]
#[path = "views_test.rs"]
mod tests;

mod dashboard;
mod login;
mod modals;
mod notifications;

use chrono::Local;
use chrono::NaiveDate;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::services::AppState;

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;

/// Draws the whole interface for the current state.
pub fn render(frame: &mut Frame, app_state: &AppState) {
    render_at(frame, app_state, Local::now().date_naive());
}

/// Same as `render` with a fixed date for the "today" counter.
pub fn render_at(frame: &mut Frame, app_state: &AppState, today: NaiveDate) {
    let area = frame.area();

    if app_state.authenticated {
        dashboard::render(frame, app_state, area, today);
        modals::render(frame, app_state, area);
    } else {
        login::render(frame, app_state, area);
    }

    notifications::render(frame, app_state.notifications.list(), area);
}

/// `width` x `height` rectangle centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    return Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
}

/// Read only rendering of a form field that does not have focus.
fn field<'a>(label: &'a str, value: &'a str, placeholder: &'a str) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(MUTED))
        .title(label)
        .padding(Padding::new(1, 1, 0, 0));

    if value.is_empty() {
        return Paragraph::new(Span::styled(placeholder, Style::default().fg(MUTED))).block(block);
    }

    let lines = value
        .split('\n')
        .map(|line| return Line::from(line))
        .collect::<Vec<Line>>();

    return Paragraph::new(lines).block(block);
}

fn mask(value: &str) -> String {
    return value.chars().map(|_| return '•').collect();
}
