use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::Notification;
use crate::domain::models::Severity;

const WIDTH: u16 = 44;
const HEIGHT: u16 = 3;

fn color(severity: Severity) -> Color {
    match severity {
        Severity::Success => return Color::Green,
        Severity::Error => return Color::Red,
        Severity::Info => return Color::Blue,
    }
}

/// Stack in the top right corner, oldest first. Entries that do not fit are
/// left out until older ones expire.
pub fn render(frame: &mut Frame, notifications: &[Notification], area: Rect) {
    let width = WIDTH.min(area.width);
    let x = area.x + area.width - width;

    for (idx, notification) in notifications.iter().enumerate() {
        let y = area.y + 1 + (idx as u16) * HEIGHT;
        if y + HEIGHT > area.y + area.height {
            break;
        }

        let rect = Rect {
            x,
            y,
            width,
            height: HEIGHT,
        };
        let style = Style::default().fg(color(notification.severity));
        let dismiss = Line::styled("x", Style::default().fg(Color::DarkGray)).right_aligned();

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", notification.severity.icon()), style),
                Span::raw(notification.message.as_str()),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style)
                    .title_bottom(dismiss),
            ),
            rect,
        );
    }
}
