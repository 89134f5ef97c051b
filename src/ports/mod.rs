//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `LearningPathRepository` - Aggregate persistence (write side)
//! - `LearningPathReader` - Listing and statistics (read side)
//! - `HealthCheck` - Store liveness check

mod health_check;
mod learning_path_reader;
mod learning_path_repository;

pub use health_check::HealthCheck;
pub use learning_path_reader::{
    LearningPathReader, ListOptions, PathProgress, PathStatistics, PathSummary, SortOrder,
    StatusFilter, ACTIVE_PROGRESS_LIMIT,
};
pub use learning_path_repository::LearningPathRepository;
