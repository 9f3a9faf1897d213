//! Filter implementations for the ranking pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod disliked_name;
pub mod positive_score;

// Re-export for convenience
pub use disliked_name::DislikedNameFilter;
pub use positive_score::PositiveScoreFilter;
