//! Notification rendering for user-visible feedback

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use script_bar_sdk::NotificationLevel;

use crate::app::App;

/// Render the newest notifications as an overlay at the bottom of `area`
pub fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    app.notifications.with(|manager| {
        let active = manager.get_active();
        if active.is_empty() {
            return;
        }

        // Newest three, 4 lines each (title, message, borders)
        let visible: Vec<_> = active.iter().rev().take(3).rev().collect();
        let height = (visible.len() as u16 * 4).min(area.height);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(height)])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(visible.iter().map(|_| Constraint::Length(4)).collect::<Vec<_>>())
            .split(chunks[1]);

        for (idx, notification) in visible.iter().enumerate() {
            let (color, icon) = match notification.level {
                NotificationLevel::Error => (Color::Red, "✗"),
                NotificationLevel::Warning => (Color::Yellow, "⚠"),
                NotificationLevel::Info => (Color::Green, "✓"),
            };

            let text = vec![
                Line::from(Span::styled(
                    format!("{} {}", icon, notification.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(notification.message.clone()),
            ];

            let paragraph = Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .wrap(Wrap { trim: true });

            f.render_widget(Clear, rows[idx]);
            f.render_widget(paragraph, rows[idx]);
        }
    });
}
