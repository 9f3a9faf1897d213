//! Tunables of the swipe session.

/// Batch size, termination thresholds and result count of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Maximum dishes presented per batch
    pub batch_size: usize,
    /// Swipe count at which a session is over
    pub max_swipes: usize,
    /// A session is over once this few unswiped dishes (or fewer) remain
    pub min_remaining: usize,
    /// How many recommendations `session_results` returns
    pub result_count: usize,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_swipes: 30,
            min_remaining: 5,
            result_count: 3,
        }
    }
}

impl SessionPolicy {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_max_swipes(mut self, max_swipes: usize) -> Self {
        self.max_swipes = max_swipes;
        self
    }

    pub fn with_min_remaining(mut self, min_remaining: usize) -> Self {
        self.min_remaining = min_remaining;
        self
    }

    pub fn with_result_count(mut self, result_count: usize) -> Self {
        self.result_count = result_count;
        self
    }

    /// Whether a session with this many swipes and unswiped dishes is over
    pub fn is_exhausted(&self, swipes: usize, remaining: usize) -> bool {
        swipes >= self.max_swipes || remaining <= self.min_remaining
    }
}
