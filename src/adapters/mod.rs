//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum REST API
//! - `memory` - In-memory store for tests and database-less runs
//! - `postgres` - sqlx/PostgreSQL persistence

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryLearningPathStore;
pub use postgres::{PostgresHealthCheck, PostgresLearningPathReader, PostgresLearningPathRepository};
