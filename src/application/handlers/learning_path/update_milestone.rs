//! UpdateMilestoneHandler - Command handler for toggling a milestone.
//!
//! After the toggle the path flag is recomputed from all milestones, and both
//! are written in one versioned update.

use std::sync::Arc;

use crate::domain::foundation::{MilestoneId, PathId, Version};
use crate::domain::learning_path::{LearningPathError, MilestoneToggle};
use crate::ports::LearningPathRepository;

/// Command to set a milestone's completion flag.
#[derive(Debug, Clone)]
pub struct UpdateMilestoneCommand {
    pub path_id: PathId,
    pub milestone_id: MilestoneId,
    pub completed: bool,
}

/// Result of a milestone toggle.
#[derive(Debug, Clone)]
pub struct UpdateMilestoneResult {
    pub toggle: MilestoneToggle,
    /// Path version after the write.
    pub path_version: Version,
}

/// Handler for toggling milestones.
pub struct UpdateMilestoneHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl UpdateMilestoneHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateMilestoneCommand,
    ) -> Result<UpdateMilestoneResult, LearningPathError> {
        let (path_id, milestone_id) = (cmd.path_id, cmd.milestone_id);

        // 1. Load the stated path
        let mut path = self
            .repository
            .find_by_id(&path_id)
            .await?
            .ok_or_else(|| LearningPathError::not_found(path_id))?;

        // 2. Toggle; a milestone of another path is not found here
        let toggle = path
            .set_milestone_completion(&milestone_id, cmd.completed)
            .map_err(|e| LearningPathError::on_milestone(e, path_id, milestone_id))?;

        // 3. Persist milestone and path flag together
        self.repository
            .update(&path)
            .await
            .map_err(|e| LearningPathError::on_milestone(e, path_id, milestone_id))?;

        if toggle.path_completion_changed {
            tracing::debug!(
                path_id = %path_id,
                completed = toggle.path_completed,
                "path completion derived from milestones"
            );
        }

        Ok(UpdateMilestoneResult {
            toggle,
            path_version: path.version(),
        })
    }
}
