//! Session-side domain types.
//!
//! A `SwipeSession` is owned by exactly one user and only ever touched while
//! that user's lock in the [`crate::SessionStore`] is held.

use catalog::{DishDetail, DishId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

/// Opaque identity of the user owning a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single swipe decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swipe {
    Liked,
    Disliked,
    Skipped,
}

/// The dishes a client classified since its previous call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeBatch {
    #[serde(default)]
    pub liked: Vec<DishDetail>,
    #[serde(default)]
    pub disliked: Vec<DishDetail>,
    #[serde(default)]
    pub skipped: Vec<DishDetail>,
}

impl SwipeBatch {
    /// Total number of dishes in the batch, duplicates included
    pub fn len(&self) -> usize {
        self.liked.len() + self.disliked.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What `continue_session` hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    /// More dishes to swipe
    Batch(Vec<DishDetail>),
    /// Swiping is over; `sentinel` is the first dish of the session's pool
    Complete { sentinel: DishDetail },
}

impl SessionStep {
    pub fn is_complete(&self) -> bool {
        matches!(self, SessionStep::Complete { .. })
    }

    /// Flatten to the dish list clients receive: the batch itself, or a
    /// single-element list holding the sentinel.
    pub fn into_dishes(self) -> Vec<DishDetail> {
        match self {
            SessionStep::Batch(dishes) => dishes,
            SessionStep::Complete { sentinel } => vec![sentinel],
        }
    }
}

/// Per-user swipe state.
///
/// Invariants:
/// - a dish id is in at most one of `liked`, `disliked`, `skipped`
/// - `all_dishes` only changes through [`SwipeSession::restart`]
#[derive(Debug, Clone)]
pub struct SwipeSession {
    all_dishes: Vec<DishDetail>,
    liked: Vec<DishDetail>,
    disliked: Vec<DishDetail>,
    skipped: Vec<DishDetail>,
    /// Ids across all three lists, for O(1) dedup
    swiped_ids: HashSet<DishId>,
    last_touched: Instant,
}

impl SwipeSession {
    /// Fresh session over a candidate pool
    pub fn new(all_dishes: Vec<DishDetail>) -> Self {
        Self {
            all_dishes,
            liked: Vec::new(),
            disliked: Vec::new(),
            skipped: Vec::new(),
            swiped_ids: HashSet::new(),
            last_touched: Instant::now(),
        }
    }

    /// A session only counts once it has a candidate pool
    pub fn is_active(&self) -> bool {
        !self.all_dishes.is_empty()
    }

    pub fn all_dishes(&self) -> &[DishDetail] {
        &self.all_dishes
    }

    pub fn liked(&self) -> &[DishDetail] {
        &self.liked
    }

    pub fn disliked(&self) -> &[DishDetail] {
        &self.disliked
    }

    pub fn skipped(&self) -> &[DishDetail] {
        &self.skipped
    }

    /// Number of swipes recorded since the last start or finalize
    pub fn swipe_count(&self) -> usize {
        self.liked.len() + self.disliked.len() + self.skipped.len()
    }

    /// How a dish was classified in this session, if at all
    pub fn classification(&self, id: DishId) -> Option<Swipe> {
        if !self.swiped_ids.contains(&id) {
            None
        } else if self.liked.iter().any(|d| d.id == id) {
            Some(Swipe::Liked)
        } else if self.disliked.iter().any(|d| d.id == id) {
            Some(Swipe::Disliked)
        } else {
            Some(Swipe::Skipped)
        }
    }

    /// Replace the pool and forget every swipe
    pub fn restart(&mut self, all_dishes: Vec<DishDetail>) {
        self.all_dishes = all_dishes;
        self.clear_swipes();
    }

    /// Forget every swipe but keep the pool
    pub fn clear_swipes(&mut self) {
        self.liked.clear();
        self.disliked.clear();
        self.skipped.clear();
        self.swiped_ids.clear();
        self.touch();
    }

    /// Append a batch, skipping dishes already classified.
    ///
    /// Liked is applied before disliked before skipped, so the first
    /// classification of a dish wins. Nothing in here can fail, so a batch
    /// is either fully applied or (when the caller never gets the lock)
    /// not at all. Returns how many dishes were newly recorded.
    pub fn record(&mut self, batch: SwipeBatch) -> usize {
        let before = self.swipe_count();

        for dish in batch.liked {
            if self.swiped_ids.insert(dish.id) {
                self.liked.push(dish);
            }
        }
        for dish in batch.disliked {
            if self.swiped_ids.insert(dish.id) {
                self.disliked.push(dish);
            }
        }
        for dish in batch.skipped {
            if self.swiped_ids.insert(dish.id) {
                self.skipped.push(dish);
            }
        }

        self.touch();
        self.swipe_count() - before
    }

    /// Pool dishes not yet classified, in pool order
    pub fn remaining_candidates(&self) -> Vec<&DishDetail> {
        self.all_dishes
            .iter()
            .filter(|dish| !self.swiped_ids.contains(&dish.id))
            .collect()
    }

    pub fn touch(&mut self) {
        self.last_touched = Instant::now();
    }

    /// Time since the session was last started, swiped or finalized
    pub fn idle_for(&self) -> Duration {
        self.last_touched.elapsed()
    }
}
