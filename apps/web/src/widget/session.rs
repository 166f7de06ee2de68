//! Per-browser widget sessions, keyed by a cookie-carried UUID.
//! In-memory only. Idle sessions are pruned periodically and whenever a new
//! session is created; past `max_sessions` the least recently seen is evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend_client::JobBackend;
use crate::widget::{DemoWidget, WidgetSnapshot};

pub const SESSION_COOKIE: &str = "careerflow_session";

struct SessionEntry {
    widget: Arc<Mutex<DemoWidget>>,
    published: Arc<watch::Sender<WidgetSnapshot>>,
    last_seen: Instant,
}

impl SessionEntry {
    fn session(&self, id: Uuid, is_new: bool) -> Session {
        Session {
            id,
            widget: self.widget.clone(),
            published: self.published.clone(),
            is_new,
        }
    }
}

/// A resolved session: its id, its widget, and whether it was just created
/// (in which case the response must set the cookie).
///
/// A running workflow holds the widget lock; readers then get the view it
/// published when it started, which has `loading` set.
pub struct Session {
    pub id: Uuid,
    pub widget: Arc<Mutex<DemoWidget>>,
    published: Arc<watch::Sender<WidgetSnapshot>>,
    pub is_new: bool,
}

impl Session {
    pub fn set_cookie_header(&self) -> Option<(header::HeaderName, String)> {
        self.is_new.then(|| {
            (
                header::SET_COOKIE,
                format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id),
            )
        })
    }

    /// Current view of the widget. Never waits on a running workflow.
    pub fn snapshot(&self) -> WidgetSnapshot {
        match self.widget.try_lock() {
            Ok(widget) => widget.snapshot(),
            Err(_) => self.published.borrow().clone(),
        }
    }

    /// Replaces the view served while the widget is locked.
    pub fn publish(&self, snapshot: WidgetSnapshot) {
        self.published.send_replace(snapshot);
    }

    pub fn publisher(&self) -> Arc<watch::Sender<WidgetSnapshot>> {
        self.published.clone()
    }
}

pub struct SessionStore {
    backend: Arc<dyn JobBackend>,
    ttl: Duration,
    max_sessions: usize,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn JobBackend>, ttl: Duration, max_sessions: usize) -> Self {
        Self {
            backend,
            ttl,
            max_sessions: max_sessions.max(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the session named by the request cookie, or a fresh one.
    pub async fn resolve(&self, headers: &HeaderMap) -> Session {
        if let Some(id) = session_id_from_headers(headers) {
            let mut sessions = self.sessions.write().await;
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_seen = Instant::now();
                return entry.session(id, false);
            }
        }
        self.create().await
    }

    async fn create(&self) -> Session {
        let id = Uuid::new_v4();
        let widget = DemoWidget::new(self.backend.clone());
        let (published, _) = watch::channel(widget.snapshot());
        let entry = SessionEntry {
            widget: Arc::new(Mutex::new(widget)),
            published: Arc::new(published),
            last_seen: Instant::now(),
        };
        let session = entry.session(id, true);

        let mut sessions = self.sessions.write().await;
        let pruned = remove_idle(&mut sessions, self.ttl);
        if pruned > 0 {
            debug!("Pruned {} idle session(s)", pruned);
        }
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            debug!("Evicted session {} (limit {})", oldest, self.max_sessions);
        }
        sessions.insert(id, entry);
        debug!("Created session {} ({} active)", id, sessions.len());

        session
    }

    /// Drops sessions idle for longer than the TTL. Returns how many were removed.
    pub async fn prune_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        remove_idle(&mut sessions, self.ttl)
    }

    /// Prunes idle sessions every `every` until the runtime shuts down.
    pub fn spawn_pruner(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let pruned = store.prune_idle().await;
                if pruned > 0 {
                    info!("Pruned {} idle session(s)", pruned);
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn remove_idle(sessions: &mut HashMap<Uuid, SessionEntry>, ttl: Duration) -> usize {
    let now = Instant::now();
    let before = sessions.len();
    sessions.retain(|_, entry| now.duration_since(entry.last_seen) < ttl);
    before - sessions.len()
}

/// Extracts the session id from the `Cookie` header(s), ignoring malformed values.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::test_support::FakeBackend;
    use axum::http::HeaderValue;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_session_id_found_among_other_cookies() {
        let id = Uuid::new_v4();
        let headers = headers_with_cookie(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en"));
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_malformed_session_id_is_ignored() {
        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}=not-a-uuid"));
        assert_eq!(session_id_from_headers(&headers), None);
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_known_cookie_reuses_widget() {
        let store = SessionStore::new(FakeBackend::new(), Duration::from_secs(60), 100);

        let first = store.resolve(&HeaderMap::new()).await;
        assert!(first.is_new);
        assert!(first.set_cookie_header().is_some());

        let again = store
            .resolve(&headers_with_cookie(&format!("{SESSION_COOKIE}={}", first.id)))
            .await;
        assert!(!again.is_new);
        assert!(again.set_cookie_header().is_none());
        assert!(Arc::ptr_eq(&first.widget, &again.widget));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_cookie_gets_fresh_session() {
        let store = SessionStore::new(FakeBackend::new(), Duration::from_secs(60), 100);
        let stale = Uuid::new_v4();

        let session = store
            .resolve(&headers_with_cookie(&format!("{SESSION_COOKIE}={stale}")))
            .await;

        assert!(session.is_new);
        assert_ne!(session.id, stale);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_pruned_on_create() {
        let store = SessionStore::new(FakeBackend::new(), Duration::ZERO, 100);

        store.resolve(&HeaderMap::new()).await;
        store.resolve(&HeaderMap::new()).await;

        assert_eq!(store.len().await, 1);
    }

    fn cookie_for(session: &Session) -> HeaderMap {
        headers_with_cookie(&format!("{SESSION_COOKIE}={}", session.id))
    }

    #[tokio::test]
    async fn test_least_recently_seen_session_is_evicted_at_limit() {
        let store = SessionStore::new(FakeBackend::new(), Duration::from_secs(60), 2);

        let first = store.resolve(&HeaderMap::new()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = store.resolve(&HeaderMap::new()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        // Touching the first session makes the second the oldest.
        assert!(!store.resolve(&cookie_for(&first)).await.is_new);
        tokio::time::sleep(Duration::from_millis(5)).await;
        store.resolve(&HeaderMap::new()).await;

        assert_eq!(store.len().await, 2);
        assert!(!store.resolve(&cookie_for(&first)).await.is_new);
        assert!(store.resolve(&cookie_for(&second)).await.is_new);
    }

    #[tokio::test]
    async fn test_prune_idle_removes_expired_sessions() {
        let store = SessionStore::new(FakeBackend::new(), Duration::from_millis(20), 100);
        store.resolve(&HeaderMap::new()).await;
        store.resolve(&HeaderMap::new()).await;

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.prune_idle().await, 2);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_snapshot_does_not_wait_for_locked_widget() {
        let store = SessionStore::new(FakeBackend::new(), Duration::from_secs(60), 100);
        let session = store.resolve(&HeaderMap::new()).await;

        let mut in_flight = session.snapshot();
        in_flight.loading = true;
        let _held = session.widget.lock().await;
        session.publish(in_flight);

        assert!(session.snapshot().loading);
    }
}
