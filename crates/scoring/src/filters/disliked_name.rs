//! Filter to drop dishes sharing a name with something the user disliked.
//!
//! This runs independently of the score: a disliked dish can still score
//! positively when its other ingredients are well liked, and a different
//! catalog entry may carry the same name under another id.

use crate::traits::Filter;
use crate::types::{RankingContext, ScoredDish};

/// Removes dishes whose name equals the name of any disliked dish.
///
/// ## Algorithm
/// Uses the HashSet in RankingContext.disliked_names for O(1) lookups.
pub struct DislikedNameFilter;

impl Filter for DislikedNameFilter {
    fn name(&self) -> &str {
        "DislikedNameFilter"
    }

    fn apply(&self, dishes: Vec<ScoredDish>, context: &RankingContext) -> Vec<ScoredDish> {
        dishes
            .into_iter()
            .filter(|scored| !context.disliked_names.contains(&scored.dish.name))
            .collect()
    }
}
