//! DeleteResourceLinkHandler - Command handler for detaching a resource link.

use std::sync::Arc;

use crate::domain::foundation::{PathId, ResourceLinkId};
use crate::domain::learning_path::LearningPathError;
use crate::ports::LearningPathRepository;

/// Command to delete a resource link.
#[derive(Debug, Clone)]
pub struct DeleteResourceLinkCommand {
    pub path_id: PathId,
    pub link_id: ResourceLinkId,
}

/// Handler for deleting resource links.
pub struct DeleteResourceLinkHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl DeleteResourceLinkHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteResourceLinkCommand) -> Result<(), LearningPathError> {
        let (path_id, link_id) = (cmd.path_id, cmd.link_id);

        let mut path = self
            .repository
            .find_by_id(&path_id)
            .await?
            .ok_or_else(|| LearningPathError::not_found(path_id))?;

        path.remove_resource_link(&link_id)
            .map_err(|e| LearningPathError::on_resource_link(e, path_id, link_id))?;

        self.repository
            .delete_resource_link(&path_id, &link_id)
            .await
            .map_err(|e| LearningPathError::on_resource_link(e, path_id, link_id))
    }
}
