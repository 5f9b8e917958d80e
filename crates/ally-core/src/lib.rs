//! Anxiety Ally client core.
//!
//! - [`session`]: the auth/session lifecycle, the only stateful piece.
//! - [`api`]: one thin client per backend resource over a shared HTTP client.
//! - [`token`]: persistence for the single bearer token.
//! - [`config`]: layered TOML config with environment overrides.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod token;

use api::{ApiClient, AuthClient};
use config::AllyConfig;
use session::{Route, SessionController};
use token::FileTokenStore;
use tokio::sync::mpsc;

/// The controller wired to real HTTP and file storage.
pub type AppSession = SessionController<AuthClient, FileTokenStore>;

/// Build the shared API client and a session controller from config.
///
/// The returned [`ApiClient`] shares its token slot with the controller, so
/// resource clients made from it follow login and logout.
pub fn connect(config: &AllyConfig) -> (ApiClient, AppSession, mpsc::UnboundedReceiver<Route>) {
    let api = ApiClient::from_config(config);
    let store = FileTokenStore::new(config.token_path());
    let (session, nav) = SessionController::new(api.auth(), store);
    (api, session, nav)
}
