//! # Session Crate
//!
//! This crate implements the swipe session: users swipe through batches of
//! dishes (like / dislike / skip) until the session is exhausted, then get
//! a few recommendations ranked from their swipe history.
//!
//! ## Components
//!
//! - **types**: `SwipeSession`, `SwipeBatch`, `SessionStep`, `UserId`
//! - **policy**: batch size, termination thresholds, result count
//! - **sampler**: shuffle-then-take-last batch draws
//! - **store**: per-user session map with per-key locking and idle eviction
//! - **manager**: the `SessionManager` state machine
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogIndex, CuisineFilter};
//! use session::{SessionManager, SessionStep, SwipeBatch, UserId};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(CatalogIndex::load_from_file("data/catalog.json".as_ref())?);
//! let manager = SessionManager::new(catalog);
//! let user = UserId::from("ala@example.com");
//!
//! let first = manager.start_session(&user, &CuisineFilter::All)?;
//! let step = manager.continue_session(&user, SwipeBatch { liked: first, ..Default::default() })?;
//! if step.is_complete() {
//!     let top3 = manager.session_results(&user)?;
//! }
//! ```

// Public modules
pub mod error;
pub mod manager;
pub mod policy;
pub mod sampler;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SessionError};
pub use manager::{SessionManager, SessionSnapshot};
pub use policy::SessionPolicy;
pub use sampler::BatchSampler;
pub use store::{SessionHandle, SessionStore};
pub use types::{SessionStep, Swipe, SwipeBatch, SwipeSession, UserId};
