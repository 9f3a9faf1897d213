//! Filter to keep only dishes the history speaks in favor of.

use crate::traits::Filter;
use crate::types::{RankingContext, ScoredDish};

/// Removes dishes whose affinity score is zero or negative.
pub struct PositiveScoreFilter;

impl Filter for PositiveScoreFilter {
    fn name(&self) -> &str {
        "PositiveScoreFilter"
    }

    fn apply(&self, dishes: Vec<ScoredDish>, _context: &RankingContext) -> Vec<ScoredDish> {
        dishes.into_iter().filter(|scored| scored.score > 0).collect()
    }
}
