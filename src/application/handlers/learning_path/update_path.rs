//! UpdatePathHandler - Command handler for editing a path.
//!
//! An explicit completion change is reconciled onto the milestones and the
//! result is written in one versioned update.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{PathId, Version};
use crate::domain::learning_path::{
    CompletionTransition, LearningPath, LearningPathError, PathDetails, PathUpdate,
};
use crate::ports::LearningPathRepository;

/// Command to update a path.
#[derive(Debug, Clone)]
pub struct UpdatePathCommand {
    pub path_id: PathId,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub completed: bool,
    /// Version the client last read; `None` skips the client-side check.
    pub expected_version: Option<Version>,
}

/// Result of a successful path update.
#[derive(Debug, Clone)]
pub struct UpdatePathResult {
    pub path: LearningPath,
    pub update: PathUpdate,
}

/// Handler for updating paths.
pub struct UpdatePathHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl UpdatePathHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdatePathCommand) -> Result<UpdatePathResult, LearningPathError> {
        let path_id = cmd.path_id;

        // 1. Load path with milestones
        let mut path = self
            .repository
            .find_by_id(&path_id)
            .await?
            .ok_or_else(|| LearningPathError::not_found(path_id))?;

        // 2. Apply edit and reconcile milestones
        let update = path.update(
            PathDetails {
                title: cmd.title,
                description: cmd.description,
                target_date: cmd.target_date,
            },
            cmd.completed,
            cmd.expected_version,
        )?;

        // 3. Persist path row and milestone flags together
        self.repository
            .update(&path)
            .await
            .map_err(|e| LearningPathError::on_path(e, path_id))?;

        if update.transition != CompletionTransition::Unchanged {
            tracing::debug!(
                path_id = %path_id,
                transition = ?update.transition,
                forced = update.forced_milestones.len(),
                "path completion reconciled onto milestones"
            );
        }

        Ok(UpdatePathResult { path, update })
    }
}
