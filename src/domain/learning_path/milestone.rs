//! Milestone entity - a sub-task of a learning path.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MilestoneId, PathId, ValidationError};

/// Maximum length for a milestone title.
pub const MAX_MILESTONE_TITLE_LENGTH: usize = 200;

/// A single step on a learning path with its own completion flag.
///
/// The owning path id is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    id: MilestoneId,
    path_id: PathId,
    title: String,
    completed: bool,
}

impl Milestone {
    /// Creates a new, incomplete milestone under the given path.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    /// - `TooLong` if the title exceeds [`MAX_MILESTONE_TITLE_LENGTH`]
    pub fn new(path_id: PathId, title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = validate_title(title.into())?;
        Ok(Self {
            id: MilestoneId::new(),
            path_id,
            title,
            completed: false,
        })
    }

    /// Reconstitute a milestone from persistence (no validation).
    pub fn reconstitute(id: MilestoneId, path_id: PathId, title: String, completed: bool) -> Self {
        Self {
            id,
            path_id,
            title,
            completed,
        }
    }

    pub fn id(&self) -> &MilestoneId {
        &self.id
    }

    pub fn path_id(&self) -> &PathId {
        &self.path_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether this milestone is owned by the given path.
    pub fn belongs_to(&self, path_id: &PathId) -> bool {
        &self.path_id == path_id
    }

    /// Sets the completion flag. Returns true if the flag changed.
    pub(crate) fn set_completed(&mut self, completed: bool) -> bool {
        let changed = self.completed != completed;
        self.completed = completed;
        changed
    }
}

fn validate_title(title: String) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    let len = trimmed.chars().count();
    if len > MAX_MILESTONE_TITLE_LENGTH {
        return Err(ValidationError::too_long("title", MAX_MILESTONE_TITLE_LENGTH, len));
    }
    Ok(trimmed.to_string())
}
