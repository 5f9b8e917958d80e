use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

const LOGO: &[&str] = &[
    "╔═╗┌┐┌─┐ ┬┬┌─┐┌┬┐┬ ┬  ╔═╗┬  ┬  ┬ ┬",
    "╠═╣│││┌┴┬┘│├┤  │ └┬┘  ╠═╣│  │  └┬┘",
    "╩ ╩┘└┘┴ └─┴└─┘ ┴  ┴   ╩ ╩┴─┘┴─┘ ┴ ",
];

const TAGLINE: &str = "Your daily companion for mental wellbeing";

const FEATURES: &[(&str, &str)] = &[
    ("Mood Tracking", "spot emotional patterns and triggers"),
    ("Journaling", "private entries with sentiment insights"),
    ("Guided Exercises", "breathing routines for anxious moments"),
];

const WIDTH: u16 = 60;

pub fn render(frame: &mut Frame, app: &App, area: Rect, api_url: &str) {
    let lines = lines(app, api_url);

    let [center_y] = Layout::vertical([Constraint::Length(lines.len() as u16)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(WIDTH)])
        .flex(Flex::Center)
        .areas(center_y);

    frame.render_widget(Paragraph::new(lines), center);
}

fn lines(app: &App, api_url: &str) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line> = Vec::new();

    for row in LOGO {
        lines.push(Line::from(Span::styled(
            format!("        {row}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!("         {TAGLINE}"), dim)));
    lines.push(Line::from(""));

    for (name, blurb) in FEATURES {
        lines.push(Line::from(vec![
            Span::styled("   ◆ ", Style::default().fg(Color::Magenta)),
            Span::styled(
                format!("{name:<18}"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(*blurb, dim),
        ]));
    }

    lines.push(Line::from(""));

    if app.loading() {
        lines.push(Line::from(Span::styled(
            "               Checking your session...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else if let Some(ref user) = app.session.user {
        lines.push(Line::from(vec![
            Span::styled("            Welcome back, ", dim),
            Span::styled(
                user.full_name.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("               "),
            button("Enter", "Go to Dashboard", Color::Green),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("     "),
            button("ally login", "Sign In", Color::Cyan),
            Span::raw("   "),
            button("ally register", "Get Started", Color::Magenta),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("               backend ", dim),
        Span::styled(api_url.to_string(), Style::default().fg(Color::Magenta)),
    ]));

    lines
}

fn button(hint: &str, label: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {label} ({hint}) "),
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}
