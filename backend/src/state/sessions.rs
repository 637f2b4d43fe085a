// Session registry
// One in-memory transcript per browser session, created on first access
// and dropped once the session has been idle longer than the TTL

use crate::chat::{Transcript, Turn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Default idle time after which a session ends
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Opaque browser session identifier
pub type SessionId = String;

/// Shared handle to one session's transcript
///
/// Holding the lock for a whole submission keeps one request in flight per
/// session, so turns always alternate user/assistant.
pub type SessionHandle = Arc<Mutex<Transcript>>;

#[derive(Debug)]
struct SessionEntry {
    transcript: SessionHandle,
    last_access: Instant,
}

impl SessionEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_access) > ttl
    }
}

/// Registry of all live sessions (id -> transcript)
///
/// Nothing is persisted. Idle sessions are evicted whenever a session is
/// looked up for writing, so the map only holds sessions active within the TTL.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionRegistry {
    /// Create an empty registry with the default TTL
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose sessions end after `ttl` of inactivity
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Generate a new unique session ID
    /// Uses UUID v4 for uniqueness
    pub fn generate_id() -> SessionId {
        Uuid::new_v4().to_string()
    }

    /// Get the transcript handle for `id`, creating an empty one if needed
    ///
    /// Refreshes the session's last access and evicts every idle session.
    pub async fn get_or_create(&self, id: &str) -> SessionHandle {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now, self.ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }

        let entry = sessions.entry(id.to_string()).or_insert_with(|| {
            tracing::debug!(session_id = %id, "Created new session");
            SessionEntry {
                transcript: Arc::new(Mutex::new(Transcript::new())),
                last_access: now,
            }
        });
        entry.last_access = now;
        entry.transcript.clone()
    }

    /// Copy of a session's turns; unknown or expired sessions are empty
    ///
    /// Waits for any in-flight submission on that session to finish.
    pub async fn snapshot(&self, id: &str) -> Vec<Turn> {
        let now = Instant::now();
        let handle = self
            .sessions
            .read()
            .await
            .get(id)
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| entry.transcript.clone());
        match handle {
            Some(handle) => handle.lock().await.all().to_vec(),
            None => Vec::new(),
        }
    }

    /// Number of sessions currently held
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
