use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

/// Shortcuts into the CLI for the things the dashboard links to.
const SHORTCUTS: &[(&str, &str)] = &[
    ("ally mood create <1-10>", "log how you feel"),
    ("ally mood aggregate week", "see your week at a glance"),
    ("ally journal create", "write an entry"),
    ("ally journal list", "read past entries"),
    ("ally chat", "talk it through"),
    ("ally breathing", "calm down in a few minutes"),
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [center_y] = Layout::vertical([Constraint::Length(SHORTCUTS.len() as u16 + 6)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(64)])
        .flex(Flex::Center)
        .areas(center_y);

    let name = app
        .session
        .user
        .as_ref()
        .map(|u| u.full_name.as_str())
        .unwrap_or("there");

    let mut lines = vec![
        Line::from(vec![
            Span::raw(" Hi, "),
            Span::styled(
                name.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(". What would help right now?"),
        ]),
        Line::from(""),
    ];

    for (command, what) in SHORTCUTS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {command:<28}"), Style::default().fg(Color::Cyan)),
            Span::styled(*what, Style::default().fg(Color::DarkGray)),
        ]));
    }

    if let Some(ref user) = app.session.user {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  signed in as {}", user.email),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Dashboard ");
    frame.render_widget(Paragraph::new(lines).block(block), center);
}
