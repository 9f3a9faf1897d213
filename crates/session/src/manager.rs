//! # Session Manager
//!
//! Drives the swipe-session state machine for every user:
//!
//! ```text
//! Idle --start_session--> Active --continue_session--> Active
//!                           |                            |
//!                           +------session_results-------+--> Idle
//! ```
//!
//! 1. `start_session` fetches the candidate pool and presents a first batch
//! 2. `continue_session` records swipes and presents the next batch, or
//!    signals completion once enough swipes happened or the pool runs dry
//! 3. `session_results` ranks the pool against the history, returns the
//!    top picks and forgets the swipes
//!
//! Every step for one user runs under that user's lock; different users
//! never wait on each other.

use std::sync::Arc;

use catalog::{CatalogProvider, CuisineFilter, DishDetail, DishId};
use scoring::{ScoredDish, ScoringEngine};
use tracing::{debug, info, instrument};

use crate::error::{Result, SessionError};
use crate::policy::SessionPolicy;
use crate::sampler::BatchSampler;
use crate::store::{lock_session, SessionHandle, SessionStore};
use crate::types::{SessionStep, SwipeBatch, UserId};

/// Read-only view of a session, for inspection and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub pool: Vec<DishId>,
    pub liked: Vec<DishId>,
    pub disliked: Vec<DishId>,
    pub skipped: Vec<DishId>,
    pub remaining: usize,
}

impl SessionSnapshot {
    pub fn swipe_count(&self) -> usize {
        self.liked.len() + self.disliked.len() + self.skipped.len()
    }
}

/// Owns every user's swipe session.
#[derive(Clone)]
pub struct SessionManager {
    catalog: Arc<dyn CatalogProvider>,
    store: Arc<SessionStore>,
    engine: ScoringEngine,
    policy: SessionPolicy,
    sampler: Arc<BatchSampler>,
}

impl SessionManager {
    /// Create a manager with the default policy, engine and an OS-seeded sampler
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            catalog,
            store: Arc::new(SessionStore::new()),
            engine: ScoringEngine::new(),
            policy: SessionPolicy::default(),
            sampler: Arc::new(BatchSampler::entropy()),
        }
    }

    /// Configure batch size, thresholds and result count
    pub fn with_policy(mut self, policy: SessionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Configure the ranking engine
    pub fn with_engine(mut self, engine: ScoringEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Configure the batch sampler (e.g. a seeded one for reproducible runs)
    pub fn with_sampler(mut self, sampler: BatchSampler) -> Self {
        self.sampler = Arc::new(sampler);
        self
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogProvider> {
        &self.catalog
    }

    /// Start (or restart) the user's session over a cuisine's dishes.
    ///
    /// The pool is fetched before the session is touched, so a failing
    /// fetch leaves any previous session as it was.
    #[instrument(skip(self, user), fields(user = %user))]
    pub fn start_session(&self, user: &UserId, cuisine: &CuisineFilter) -> Result<Vec<DishDetail>> {
        let pool = self.catalog.fetch_dish_details(cuisine)?;
        if pool.is_empty() {
            return Err(SessionError::EmptyCatalog {
                filter: cuisine.to_string(),
            });
        }

        let batch = self.sampler.sample(&pool, self.policy.batch_size);
        let pool_size = pool.len();

        self.store.start(user, pool);

        info!(
            "Started session for user {} (cuisine: {}, pool: {}, batch: {})",
            user,
            cuisine,
            pool_size,
            batch.len()
        );
        Ok(batch)
    }

    /// Record a batch of swipes and decide what to present next.
    #[instrument(skip(self, user, batch), fields(user = %user, incoming = batch.len()))]
    pub fn continue_session(&self, user: &UserId, batch: SwipeBatch) -> Result<SessionStep> {
        let handle = self.existing_handle(user)?;
        let mut session = lock_session(&handle);
        if !session.is_active() {
            return Err(SessionError::NoActiveSession { user: user.clone() });
        }

        let added = session.record(batch);
        let swipes = session.swipe_count();
        let remaining = session.remaining_candidates();
        debug!(
            "User {} swiped {} new dishes ({} total, {} remaining)",
            user,
            added,
            swipes,
            remaining.len()
        );

        if self.policy.is_exhausted(swipes, remaining.len()) {
            // Pool is non-empty for an active session
            let Some(sentinel) = session.all_dishes().first().cloned() else {
                return Err(SessionError::NoActiveSession { user: user.clone() });
            };
            info!(
                "Session for user {} complete after {} swipes ({} dishes left)",
                user,
                swipes,
                remaining.len()
            );
            return Ok(SessionStep::Complete { sentinel });
        }

        let next = self
            .sampler
            .sample(&remaining, self.policy.batch_size)
            .into_iter()
            .cloned()
            .collect();
        Ok(SessionStep::Batch(next))
    }

    /// Rank the session's pool, return the top picks with their scores and
    /// forget the swipes (the pool stays until the next start).
    #[instrument(skip(self, user), fields(user = %user))]
    pub fn session_results_scored(&self, user: &UserId) -> Result<Vec<ScoredDish>> {
        let handle = self.existing_handle(user)?;
        let mut session = lock_session(&handle);
        if !session.is_active() {
            return Err(SessionError::NoActiveSession { user: user.clone() });
        }

        let mut ranked =
            self.engine
                .rank_scored(session.liked(), session.disliked(), session.all_dishes());
        ranked.truncate(self.policy.result_count);

        info!(
            "Session results for user {}: {} recommendations from {} liked / {} disliked",
            user,
            ranked.len(),
            session.liked().len(),
            session.disliked().len()
        );
        session.clear_swipes();
        Ok(ranked)
    }

    /// Like [`Self::session_results_scored`], dishes only
    pub fn session_results(&self, user: &UserId) -> Result<Vec<DishDetail>> {
        Ok(self
            .session_results_scored(user)?
            .into_iter()
            .map(|scored| scored.dish)
            .collect())
    }

    /// Current state of a user's session, if any
    pub fn snapshot(&self, user: &UserId) -> Option<SessionSnapshot> {
        let handle = self.store.get(user)?;
        let session = lock_session(&handle);
        if !session.is_active() {
            return None;
        }
        let ids = |dishes: &[DishDetail]| dishes.iter().map(|d| d.id).collect::<Vec<_>>();

        Some(SessionSnapshot {
            pool: ids(session.all_dishes()),
            liked: ids(session.liked()),
            disliked: ids(session.disliked()),
            skipped: ids(session.skipped()),
            remaining: session.remaining_candidates().len(),
        })
    }

    fn existing_handle(&self, user: &UserId) -> Result<SessionHandle> {
        self.store
            .get(user)
            .ok_or_else(|| SessionError::NoActiveSession { user: user.clone() })
    }

    /// Drop sessions idle for longer than `max_idle`; returns how many
    pub fn evict_idle(&self, max_idle: std::time::Duration) -> usize {
        let evicted = self.store.evict_idle(max_idle);
        if evicted > 0 {
            info!("Evicted {} idle sessions", evicted);
        }
        evicted
    }
}
