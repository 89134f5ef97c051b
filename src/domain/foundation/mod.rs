//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the SkillFlow domain.

mod errors;
mod ids;
mod timestamp;
mod version;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{MilestoneId, PathId, ResourceLinkId};
pub use timestamp::Timestamp;
pub use version::Version;
