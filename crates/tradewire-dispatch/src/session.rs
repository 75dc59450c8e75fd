//! Session registry: username → session state.
//!
//! Sessions are created on first LOGIN and live for the process lifetime;
//! there is no destroy operation. The registry itself is a coarse
//! concurrent map, but each session sits behind its own `Mutex` — that
//! per-session lock is the serialization boundary for pending-queue
//! mutation, so two in-flight commands for the same user can never
//! interleave on the same queue. Commands for different users proceed in
//! parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use tradewire_types::{Result, TwError};

use crate::pending::PendingOrders;

/// State owned by one logged-in user.
#[derive(Debug)]
pub struct UserSession {
    pub username: String,
    pub pending: PendingOrders,
}

impl UserSession {
    #[must_use]
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            pending: PendingOrders::new(),
        }
    }
}

/// Handle to a session; the `Mutex` serializes all queue mutation for
/// that user, held across the backend round trip.
pub type SharedSession = Arc<Mutex<UserSession>>;

/// Concurrent username → session map. Create-on-first-use, never evicted.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SharedSession>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the user's session, creating it if absent. Idempotent under
    /// arbitrary concurrent calls: losers of the insert race get the
    /// winner's session.
    pub async fn get_or_create(&self, username: &str) -> SharedSession {
        // Fast path: most logins after the first only need the read lock.
        if let Some(session) = self.sessions.read().await.get(username) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(username.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(UserSession::new(username)))),
        )
    }

    /// Return the user's session, or fail if they never logged in.
    ///
    /// # Errors
    /// Returns [`TwError::NotLoggedIn`] if no session exists.
    pub async fn get(&self, username: &str) -> Result<SharedSession> {
        self.sessions
            .read()
            .await
            .get(username)
            .map(Arc::clone)
            .ok_or_else(|| TwError::NotLoggedIn(username.to_string()))
    }

    /// Number of registered sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
