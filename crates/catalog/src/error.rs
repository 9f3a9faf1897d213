//! Error types for the catalog crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - `#[from]` conversions so `?` works on I/O and JSON errors
//! - Error messages with context

use thiserror::Error;

/// Errors that can occur while loading or querying the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON or has the wrong shape
    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records of the same entity share an id
    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: String, id: u32 },

    /// Referenced entity doesn't exist (e.g., dish pointing at an unknown ingredient)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: u32 },

    /// Lookup of a dish that is not in the catalog
    #[error("Dish {id} not found")]
    DishNotFound { id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
