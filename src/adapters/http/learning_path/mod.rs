//! HTTP adapter for the learning path module.
//!
//! Exposes path, milestone and resource link operations as REST endpoints
//! under `/api/learningpaths`.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{LearningPathApiError, LearningPathAppState};
pub use routes::learning_path_router;
