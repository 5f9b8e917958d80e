//! Client-side session lifecycle: startup re-validation, login, registration
//! and logout.
//!
//! The controller is the only writer of [`Session`]. Views read snapshots or
//! subscribe to changes, and receive [`Route`] signals when a flow wants the
//! user moved to another screen.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};

use crate::api::AuthApi;
use crate::error::Result;
use crate::model::{NewUser, User};
use crate::token::TokenStore;

pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// Screens a session flow can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Public landing screen, after logout.
    Landing,
    /// Authenticated home, after login.
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Authenticated,
    Anonymous,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Loading => write!(f, "loading"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Anonymous => write!(f, "anonymous"),
        }
    }
}

/// In-memory session. `error` is orthogonal to the state and only ever
/// accompanies `Anonymous`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    settled: bool,
}

impl Session {
    /// A settled signed-out session, optionally carrying an error.
    pub fn anonymous(error: Option<String>) -> Self {
        Self {
            user: None,
            token: None,
            loading: false,
            error,
            settled: true,
        }
    }

    /// A settled signed-in session.
    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            loading: false,
            error: None,
            settled: true,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.loading {
            SessionState::Loading
        } else if !self.settled {
            SessionState::Uninitialized
        } else if self.user.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }
}

/// Orchestrates the auth flows over an [`AuthApi`] and a [`TokenStore`].
pub struct SessionController<A, S> {
    auth: A,
    store: S,
    state: watch::Sender<Session>,
    nav: mpsc::UnboundedSender<Route>,
    initialized: AtomicBool,
}

impl<A: AuthApi, S: TokenStore> SessionController<A, S> {
    /// Build a controller in the `Uninitialized` state, together with the
    /// receiving end of its navigation signals.
    pub fn new(auth: A, store: S) -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (nav, nav_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(Session::default());
        let controller = Self {
            auth,
            store,
            state,
            nav,
            initialized: AtomicBool::new(false),
        };
        (controller, nav_rx)
    }

    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn api(&self) -> &A {
        &self.auth
    }

    /// Restore a stored session. Runs once; later calls return the current
    /// session untouched.
    pub async fn initialize(&self) -> Session {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return self.session();
        }
        self.state.send_modify(|s| s.loading = true);

        let Some(token) = self.store.get() else {
            tracing::debug!("no stored token, starting anonymous");
            self.state.send_replace(Session::anonymous(None));
            return self.session();
        };

        self.auth.set_token(Some(&token));
        match self.auth.me().await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "session restored");
                self.state.send_replace(Session::authenticated(user, token));
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored token rejected, clearing it");
                self.discard_token();
                self.state
                    .send_replace(Session::anonymous(Some(SESSION_EXPIRED.to_string())));
            }
        }
        self.session()
    }

    /// Sign in. On success the token is persisted and a `Dashboard` signal is
    /// sent. Failures end anonymous with the backend's detail as the error.
    pub async fn login(&self, email: &str, password: &str) -> Session {
        self.begin();
        match self.authenticate(email, password).await {
            Ok((user, token)) => {
                tracing::info!(user_id = %user.id, "logged in");
                self.state.send_replace(Session::authenticated(user, token));
                self.navigate(Route::Dashboard);
            }
            Err(e) => {
                tracing::info!(error = %e, "login failed");
                self.fail(e.detail().unwrap_or(LOGIN_FAILED));
            }
        }
        self.session()
    }

    /// Create an account, then sign in with the same credentials.
    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> Session {
        self.begin();
        let new_user = NewUser::new(email, password, full_name);
        match self.auth.register(&new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "registered");
                self.login(email, password).await
            }
            Err(e) => {
                tracing::info!(error = %e, "registration failed");
                self.fail(e.detail().unwrap_or(REGISTRATION_FAILED));
                self.session()
            }
        }
    }

    /// Forget the session from any state and send a `Landing` signal.
    pub fn logout(&self) -> Session {
        self.discard_token();
        self.state.send_replace(Session::anonymous(None));
        tracing::info!("logged out");
        self.navigate(Route::Landing);
        self.session()
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<(User, String)> {
        let issued = self.auth.login(email, password).await?;
        let token = issued.access_token;
        self.store.set(&token);
        self.auth.set_token(Some(&token));

        match self.auth.me().await {
            Ok(user) => Ok((user, token)),
            Err(e) => {
                // The token was issued but is unusable; don't leave it behind.
                self.discard_token();
                Err(e)
            }
        }
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, message: &str) {
        self.discard_token();
        self.state
            .send_replace(Session::anonymous(Some(message.to_string())));
    }

    fn discard_token(&self) {
        self.store.clear();
        self.auth.set_token(None);
    }

    fn navigate(&self, route: Route) {
        // Nobody listening is fine: headless callers ignore navigation.
        let _ = self.nav.send(route);
    }
}
