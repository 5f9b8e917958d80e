use ally_core::session::{Route, Session, SessionState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event::{AsyncAction, AsyncResult};

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Dashboard,
}

/// Central application state. Everything except the screen and the toast
/// timer is a copy of what the session controller last published.
pub struct App {
    pub screen: Screen,
    pub session: Session,
    pub should_quit: bool,

    // -- Error toast --
    pub error_message: Option<String>,
    pub error_timer: u8, // ticks remaining
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Landing,
            session: Session::default(),
            should_quit: false,
            error_message: None,
            error_timer: 0,
        }
    }

    /// True until the first initialize settles, and during any auth call.
    pub fn loading(&self) -> bool {
        matches!(
            self.session.state(),
            SessionState::Uninitialized | SessionState::Loading
        )
    }

    /// Process an update relayed from the controller.
    pub fn handle_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Session(session) => {
                if session.error.is_some() && session.error != self.session.error {
                    self.error_message = session.error.clone();
                    self.error_timer = 100; // ~5s at 50ms tick
                }
                self.session = session;
                if self.screen == Screen::Dashboard && !self.session.is_authenticated() {
                    self.screen = Screen::Landing;
                }
            }
            AsyncResult::Navigate(Route::Dashboard) => {
                if self.session.is_authenticated() {
                    self.screen = Screen::Dashboard;
                }
            }
            AsyncResult::Navigate(Route::Landing) => {
                self.screen = Screen::Landing;
            }
        }
    }

    /// Handle a key event. Returns an optional async action to dispatch.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match (&self.screen, key.code) {
            (_, KeyCode::Char('q')) => {
                self.should_quit = true;
                None
            }
            (Screen::Landing, KeyCode::Esc) => {
                self.should_quit = true;
                None
            }
            (Screen::Dashboard, KeyCode::Esc) => {
                self.screen = Screen::Landing;
                None
            }
            (Screen::Landing, KeyCode::Enter | KeyCode::Char('d')) => {
                if self.session.is_authenticated() {
                    self.screen = Screen::Dashboard;
                }
                None
            }
            (_, KeyCode::Char('l')) => {
                if self.session.is_authenticated() && !self.loading() {
                    Some(AsyncAction::Logout)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn tick_error(&mut self) {
        if self.error_timer > 0 {
            self.error_timer -= 1;
            if self.error_timer == 0 {
                self.error_message = None;
            }
        }
    }
}
