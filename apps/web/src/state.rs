use std::sync::Arc;

use crate::backend_client::JobBackend;
use crate::config::Config;
use crate::widget::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// One demo widget per browser session, all wired to the same backend.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn JobBackend>) -> Self {
        let sessions = Arc::new(SessionStore::new(
            backend,
            config.session_ttl,
            config.max_sessions,
        ));
        Self { config, sessions }
    }
}
