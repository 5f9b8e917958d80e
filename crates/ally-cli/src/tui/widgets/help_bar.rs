use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::app::Screen;

/// Bottom help bar showing the keys that do something right now.
pub struct HelpBar<'a> {
    pub screen: &'a Screen,
    pub authenticated: bool,
}

impl HelpBar<'_> {
    fn keys(&self) -> Vec<(&'static str, &'static str)> {
        match (self.screen, self.authenticated) {
            (Screen::Landing, true) => vec![
                ("Enter", "dashboard"),
                ("l", "log out"),
                ("q/Esc", "quit"),
            ],
            (Screen::Landing, false) => vec![("q/Esc", "quit")],
            (Screen::Dashboard, _) => vec![("Esc", "back"), ("l", "log out"), ("q", "quit")],
        }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::DarkGray);
        let key_style = Style::default().fg(Color::Cyan);

        let spans: Vec<Span> = self
            .keys()
            .into_iter()
            .flat_map(|(key, what)| {
                [
                    Span::styled(key, key_style),
                    Span::styled(format!(" {what}  "), style),
                ]
            })
            .collect();

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
