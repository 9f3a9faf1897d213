//! Ingredient-affinity scoring for swipe histories.
//!
//! This crate provides:
//! - IngredientAffinity tables built from liked and disliked dishes
//! - Filter trait and implementations for excluding ranked dishes
//! - FilterPipeline for composing filters
//! - ScoringEngine, the deterministic ranking entry point
//!
//! ## Architecture
//! Ranking runs in stages:
//! 1. Affinity tables are built from the history
//! 2. Every pool dish is scored against them
//! 3. Filters remove non-positive scores and disliked names
//! 4. The survivors are sorted by score, ties by pool position
//!
//! ## Example Usage
//! ```ignore
//! use scoring::{IngredientMatch, ScoringEngine};
//!
//! let engine = ScoringEngine::new().with_matching(IngredientMatch::ByName);
//! let top3: Vec<_> = engine.rank(&liked, &disliked, &all_dishes).into_iter().take(3).collect();
//! ```

pub mod affinity;
pub mod engine;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;
pub mod types;

// Re-export main types
pub use affinity::{IngredientAffinity, IngredientMatch};
pub use engine::ScoringEngine;
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
pub use types::{RankingContext, ScoredDish};
