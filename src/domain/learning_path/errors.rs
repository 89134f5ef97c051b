//! Learning-path-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, MilestoneId, PathId, ResourceLinkId};

/// Errors surfaced by learning path operations.
///
/// Not-found and validation errors are final for the request. A conflict
/// means the caller must reload the path and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LearningPathError {
    #[error("Learning path not found: {0}")]
    NotFound(PathId),

    #[error("Milestone {milestone_id} not found on path {path_id}")]
    MilestoneNotFound {
        path_id: PathId,
        milestone_id: MilestoneId,
    },

    #[error("Resource link {link_id} not found on path {path_id}")]
    ResourceLinkNotFound {
        path_id: PathId,
        link_id: ResourceLinkId,
    },

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl LearningPathError {
    pub fn not_found(id: PathId) -> Self {
        LearningPathError::NotFound(id)
    }

    pub fn milestone_not_found(path_id: PathId, milestone_id: MilestoneId) -> Self {
        LearningPathError::MilestoneNotFound {
            path_id,
            milestone_id,
        }
    }

    pub fn resource_link_not_found(path_id: PathId, link_id: ResourceLinkId) -> Self {
        LearningPathError::ResourceLinkNotFound { path_id, link_id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        LearningPathError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        LearningPathError::Conflict(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        LearningPathError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LearningPathError::NotFound(_) => ErrorCode::PathNotFound,
            LearningPathError::MilestoneNotFound { .. } => ErrorCode::MilestoneNotFound,
            LearningPathError::ResourceLinkNotFound { .. } => ErrorCode::ResourceLinkNotFound,
            LearningPathError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            LearningPathError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            LearningPathError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Maps a port or aggregate error raised while working on `path_id`.
    pub fn on_path(err: DomainError, path_id: PathId) -> Self {
        match err.code {
            ErrorCode::PathNotFound => LearningPathError::NotFound(path_id),
            _ => err.into(),
        }
    }

    /// Like [`on_path`](Self::on_path), also resolving a missing milestone.
    pub fn on_milestone(err: DomainError, path_id: PathId, milestone_id: MilestoneId) -> Self {
        match err.code {
            ErrorCode::MilestoneNotFound => Self::milestone_not_found(path_id, milestone_id),
            _ => Self::on_path(err, path_id),
        }
    }

    /// Like [`on_path`](Self::on_path), also resolving a missing resource link.
    pub fn on_resource_link(err: DomainError, path_id: PathId, link_id: ResourceLinkId) -> Self {
        match err.code {
            ErrorCode::ResourceLinkNotFound => Self::resource_link_not_found(path_id, link_id),
            _ => Self::on_path(err, path_id),
        }
    }

    /// True for any of the three not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LearningPathError::NotFound(_)
                | LearningPathError::MilestoneNotFound { .. }
                | LearningPathError::ResourceLinkNotFound { .. }
        )
    }
}

impl From<DomainError> for LearningPathError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => LearningPathError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::ConcurrencyConflict => LearningPathError::Conflict(err.message),
            _ => LearningPathError::Infrastructure(err.to_string()),
        }
    }
}
