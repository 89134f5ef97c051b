//! DeletePathHandler - Command handler for deleting a path and its children.

use std::sync::Arc;

use crate::domain::foundation::PathId;
use crate::domain::learning_path::LearningPathError;
use crate::ports::LearningPathRepository;

/// Command to delete a path.
#[derive(Debug, Clone)]
pub struct DeletePathCommand {
    pub path_id: PathId,
}

/// Handler for deleting paths.
pub struct DeletePathHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl DeletePathHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeletePathCommand) -> Result<(), LearningPathError> {
        self.repository
            .delete(&cmd.path_id)
            .await
            .map_err(|e| LearningPathError::on_path(e, cmd.path_id))?;

        tracing::info!(path_id = %cmd.path_id, "learning path deleted");
        Ok(())
    }
}
