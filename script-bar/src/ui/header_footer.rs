//! Header and footer rendering functions

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let root = app
        .project
        .root()
        .map(|r| r.display().to_string())
        .unwrap_or_else(|| "no project".to_string());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Script Bar",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(root, Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(app.status.to_string(), Style::default().fg(Color::Cyan)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD));

    let footer_text = Line::from(vec![
        key("[←→]"),
        Span::raw(" Select  "),
        key("[Enter]"),
        Span::raw(" Run  "),
        key("[B/T]"),
        Span::raw(" Background/Terminal  "),
        key("[R]"),
        Span::raw(" Rescan  "),
        key("[A]"),
        Span::raw(if app.show_all { " Enabled only  " } else { " Show all  " }),
        key("[X]"),
        Span::raw(" Dismiss  "),
        key("[Q]"),
        Span::raw(" Quit"),
    ]);

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
