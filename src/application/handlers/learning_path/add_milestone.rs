//! AddMilestoneHandler - Command handler for adding a milestone to a path.
//!
//! Adding a milestone never recomputes the path flag.

use std::sync::Arc;

use crate::domain::foundation::PathId;
use crate::domain::learning_path::{LearningPathError, Milestone};
use crate::ports::LearningPathRepository;

/// Command to add a milestone.
#[derive(Debug, Clone)]
pub struct AddMilestoneCommand {
    pub path_id: PathId,
    pub title: String,
}

/// Handler for adding milestones.
pub struct AddMilestoneHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl AddMilestoneHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AddMilestoneCommand) -> Result<Milestone, LearningPathError> {
        // 1. Path must exist
        let mut path = self
            .repository
            .find_by_id(&cmd.path_id)
            .await?
            .ok_or_else(|| LearningPathError::not_found(cmd.path_id))?;

        // 2. Create milestone under it
        let milestone = path.add_milestone(cmd.title)?;

        // 3. Persist; the path may have been deleted in between
        self.repository
            .add_milestone(&milestone)
            .await
            .map_err(|e| LearningPathError::on_path(e, cmd.path_id))?;

        Ok(milestone)
    }
}
