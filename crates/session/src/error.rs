//! Error types for the session crate.

use crate::types::UserId;
use catalog::CatalogError;
use thiserror::Error;

/// Errors reported by the session manager.
///
/// None of them is retried or recovered from inside the crate.
#[derive(Error, Debug)]
pub enum SessionError {
    /// `continue_session` / `session_results` before any `start_session`
    #[error("No active session for user {user}")]
    NoActiveSession { user: UserId },

    /// The cuisine filter selected no dishes
    #[error("No dishes available for cuisine '{filter}'")]
    EmptyCatalog { filter: String },

    /// The catalog provider failed to resolve a dish, cuisine or ingredient
    #[error("Catalog lookup failed: {0}")]
    CatalogLookupFailure(#[from] CatalogError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SessionError>;
