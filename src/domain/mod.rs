//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, versions, errors)
//! - `learning_path` - Learning path aggregate, milestones, resource links and
//!   completion reconciliation

pub mod foundation;
pub mod learning_path;
