//! Process-wide map of live swipe sessions.
//!
//! The map itself is a `DashMap` (sharded locks, only held while an entry
//! is looked up or replaced). Each value is an `Arc<Mutex<SwipeSession>>`,
//! so a whole operation on one user's session runs under that user's lock
//! without blocking anybody else.

use crate::types::{SwipeSession, UserId};
use catalog::DishDetail;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Shared handle to one user's session
pub type SessionHandle = Arc<Mutex<SwipeSession>>;

/// Lock a session.
///
/// A poisoned lock is recovered: session mutations contain no panic points
/// between related writes, so the data behind it is still consistent.
pub fn lock_session(handle: &SessionHandle) -> MutexGuard<'_, SwipeSession> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Per-user session storage with per-key locking.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<UserId, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's session, if one was ever started
    pub fn get(&self, user: &UserId) -> Option<SessionHandle> {
        self.sessions.get(user).map(|entry| Arc::clone(entry.value()))
    }

    /// The user's session, created empty if missing.
    ///
    /// Concurrent callers for the same user get the same handle.
    pub fn get_or_create(&self, user: &UserId) -> SessionHandle {
        let entry = self
            .sessions
            .entry(user.clone())
            .or_insert_with(|| Arc::new(Mutex::new(SwipeSession::new(Vec::new()))));
        Arc::clone(entry.value())
    }

    /// Start the user's session over `pool`.
    ///
    /// An existing session is restarted under its own lock; a new one is
    /// built before it is inserted, so no caller ever sees it half-built.
    pub fn start(&self, user: &UserId, pool: Vec<DishDetail>) -> SessionHandle {
        let handle = match self.sessions.entry(user.clone()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let handle = Arc::new(Mutex::new(SwipeSession::new(pool)));
                entry.insert(Arc::clone(&handle));
                return handle;
            }
        };
        // Shard lock released before waiting on the session
        lock_session(&handle).restart(pool);
        handle
    }

    /// Install a session for the user, replacing any previous one
    pub fn create(&self, user: &UserId, session: SwipeSession) -> SessionHandle {
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(user.clone(), Arc::clone(&handle));
        handle
    }

    /// Drop the user's session. Returns whether one existed.
    pub fn clear(&self, user: &UserId) -> bool {
        self.sessions.remove(user).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Remove sessions untouched for longer than `max_idle`.
    ///
    /// Sessions currently borrowed by an in-flight call (another handle
    /// clone alive, or the lock held) are always kept.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|user, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            let Ok(session) = handle.try_lock() else {
                return true;
            };
            let keep = session.idle_for() <= max_idle;
            if !keep {
                debug!("Evicting idle session for user {}", user);
            }
            keep
        });
        before.saturating_sub(self.sessions.len())
    }
}
