//! Values passed between the engine and its filters.

use catalog::DishDetail;
use std::collections::HashSet;

/// A candidate dish together with its affinity score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredDish {
    pub dish: DishDetail,
    pub score: i64,
    /// Position of the dish in the candidate pool; breaks score ties
    pub catalog_index: usize,
}

/// What filters may consult besides the scored dishes themselves.
#[derive(Debug, Clone, Default)]
pub struct RankingContext {
    /// Names of every disliked dish in the history
    pub disliked_names: HashSet<String>,
}

impl RankingContext {
    pub fn from_disliked(disliked: &[DishDetail]) -> Self {
        Self {
            disliked_names: disliked.iter().map(|dish| dish.name.clone()).collect(),
        }
    }
}
