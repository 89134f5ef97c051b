//! In-memory adapters for running without a database and for tests.

mod learning_path_store;

pub use learning_path_store::InMemoryLearningPathStore;
