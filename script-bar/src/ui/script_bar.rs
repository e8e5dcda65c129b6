//! The button bar

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use script_bar_sdk::TaskItem;

use crate::app::App;
use crate::project::empty_state_message;
use crate::reconcile::DEFAULT_COLORS;

/// Parse `#RRGGBB` or `#RGB`
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(Color::Rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

fn button_color(item: &TaskItem) -> Color {
    parse_hex_color(&item.color)
        .or_else(|| parse_hex_color(DEFAULT_COLORS[0]))
        .unwrap_or(Color::Green)
}

fn button_label(item: &TaskItem) -> String {
    let label = if item.nickname.is_empty() {
        &item.name
    } else {
        &item.nickname
    };
    format!(" {} ", label)
}

/// Lay buttons out left to right, wrapping to a new line when `width` runs out
fn button_lines(items: &[TaskItem], selected: usize, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for (idx, item) in items.iter().enumerate() {
        let label = button_label(item);
        let label_width = label.chars().count();

        if used > 0 && used + 1 + label_width > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            lines.push(Line::default());
            used = 0;
        }
        if used > 0 {
            current.push(Span::raw(" "));
            used += 1;
        }

        let mut style = Style::default().fg(Color::White).bg(button_color(item));
        if idx == selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if !item.enabled {
            style = style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
        }

        current.push(Span::styled(label, style));
        used += label_width;
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

pub fn render_script_bar(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.show_all { " Scripts (all) " } else { " Scripts " };
    let block = Block::default().borders(Borders::ALL).title(title);

    if let Some(message) = empty_state_message(app.status, !app.items.is_empty()) {
        let empty = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let mut lines = button_lines(&app.items, app.selected, width);

    if let Some(item) = app.selected_item() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(item.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(item.command.clone(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", item.run_mode),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
