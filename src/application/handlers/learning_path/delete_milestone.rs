//! DeleteMilestoneHandler - Command handler for removing a milestone.
//!
//! Removal never recomputes the path flag.

use std::sync::Arc;

use crate::domain::foundation::{MilestoneId, PathId};
use crate::domain::learning_path::LearningPathError;
use crate::ports::LearningPathRepository;

/// Command to delete a milestone.
#[derive(Debug, Clone)]
pub struct DeleteMilestoneCommand {
    pub path_id: PathId,
    pub milestone_id: MilestoneId,
}

/// Handler for deleting milestones.
pub struct DeleteMilestoneHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl DeleteMilestoneHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteMilestoneCommand) -> Result<(), LearningPathError> {
        let (path_id, milestone_id) = (cmd.path_id, cmd.milestone_id);

        let mut path = self
            .repository
            .find_by_id(&path_id)
            .await?
            .ok_or_else(|| LearningPathError::not_found(path_id))?;

        path.remove_milestone(&milestone_id)
            .map_err(|e| LearningPathError::on_milestone(e, path_id, milestone_id))?;

        self.repository
            .delete_milestone(&path_id, &milestone_id)
            .await
            .map_err(|e| LearningPathError::on_milestone(e, path_id, milestone_id))
    }
}
