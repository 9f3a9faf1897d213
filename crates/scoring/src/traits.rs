//! Core traits for the ranking pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to scored dishes.

use crate::types::{RankingContext, ScoredDish};

/// Core trait for filtering scored dishes.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across request handlers
/// - Filters take ownership of the Vec and return a filtered Vec
/// - Filters must keep the relative order of the dishes they retain
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of scored dishes.
    ///
    /// # Arguments
    /// * `dishes` - The dishes to filter (takes ownership)
    /// * `context` - The disliked history the ranking runs against
    fn apply(&self, dishes: Vec<ScoredDish>, context: &RankingContext) -> Vec<ScoredDish>;
}
