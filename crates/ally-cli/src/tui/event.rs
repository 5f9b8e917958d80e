use ally_core::session::{Route, Session};

/// Actions the UI sends to the async worker task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncAction {
    /// Restore the stored session (sent once at startup).
    Initialize,
    /// Forget the session.
    Logout,
}

/// Updates the relay task sends back to the UI.
#[derive(Debug)]
pub enum AsyncResult {
    /// The controller published a new session snapshot.
    Session(Session),
    /// A session flow asked to move the user to another screen.
    Navigate(Route),
}
