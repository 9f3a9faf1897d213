//! Ingredient-affinity ranking.
//!
//! ## Algorithm
//! 1. Count every ingredient kind across the liked dishes (multiset)
//! 2. Collect the ingredient kinds of the disliked dishes (set)
//! 3. Score every dish in the pool: liked kinds add their count,
//!    otherwise disliked kinds subtract one
//! 4. Filter: keep positive scores, drop dishes named like a disliked dish
//! 5. Sort by score descending, ties by pool position
//!
//! The engine holds no state between calls; the same inputs always give
//! the same ordered output.

use crate::affinity::{IngredientAffinity, IngredientMatch};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{DislikedNameFilter, PositiveScoreFilter};
use crate::types::{RankingContext, ScoredDish};
use catalog::DishDetail;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranks a candidate pool against a like/dislike history.
#[derive(Clone)]
pub struct ScoringEngine {
    matching: IngredientMatch,
    pipeline: Arc<FilterPipeline>,
}

impl ScoringEngine {
    /// Engine with name-based matching and the standard exclusion filters
    pub fn new() -> Self {
        Self {
            matching: IngredientMatch::default(),
            pipeline: Arc::new(
                FilterPipeline::new()
                    .add_filter(PositiveScoreFilter)
                    .add_filter(DislikedNameFilter),
            ),
        }
    }

    /// Configure how ingredients are matched (default: by name)
    pub fn with_matching(mut self, matching: IngredientMatch) -> Self {
        self.matching = matching;
        self
    }

    /// Replace the exclusion filters
    pub fn with_pipeline(mut self, pipeline: FilterPipeline) -> Self {
        self.pipeline = Arc::new(pipeline);
        self
    }

    pub fn matching(&self) -> IngredientMatch {
        self.matching
    }

    /// Score every dish in the pool without filtering or sorting.
    ///
    /// The output has one entry per pool dish, in pool order.
    pub fn score_all(
        &self,
        liked: &[DishDetail],
        disliked: &[DishDetail],
        all_dishes: &[DishDetail],
    ) -> Vec<ScoredDish> {
        let affinity = IngredientAffinity::from_history(liked, disliked, self.matching);
        debug!(
            "Affinity tables: {} liked kinds, {} disliked kinds",
            affinity.liked_kinds(),
            affinity.disliked_kinds()
        );

        all_dishes
            .par_iter()
            .enumerate()
            .map(|(catalog_index, dish)| ScoredDish {
                dish: dish.clone(),
                score: affinity.score_dish(dish),
                catalog_index,
            })
            .collect()
    }

    /// Rank the pool and keep the scores alongside each dish.
    #[instrument(
        skip_all,
        fields(liked = liked.len(), disliked = disliked.len(), pool = all_dishes.len())
    )]
    pub fn rank_scored(
        &self,
        liked: &[DishDetail],
        disliked: &[DishDetail],
        all_dishes: &[DishDetail],
    ) -> Vec<ScoredDish> {
        let scored = self.score_all(liked, disliked, all_dishes);
        let context = RankingContext::from_disliked(disliked);

        let mut kept = self.pipeline.apply(scored, &context);
        kept.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.catalog_index.cmp(&b.catalog_index))
        });

        debug!("Ranked {} of {} dishes", kept.len(), all_dishes.len());
        kept
    }

    /// Rank the pool; the caller truncates to however many it needs.
    pub fn rank(
        &self,
        liked: &[DishDetail],
        disliked: &[DishDetail],
        all_dishes: &[DishDetail],
    ) -> Vec<DishDetail> {
        self.rank_scored(liked, disliked, all_dishes)
            .into_iter()
            .map(|scored| scored.dish)
            .collect()
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
