//! AddResourceLinkHandler - Command handler for attaching a resource link.

use std::sync::Arc;

use crate::domain::foundation::PathId;
use crate::domain::learning_path::{LearningPathError, ResourceLink};
use crate::ports::LearningPathRepository;

/// Command to add a resource link.
#[derive(Debug, Clone)]
pub struct AddResourceLinkCommand {
    pub path_id: PathId,
    pub title: String,
    pub url: String,
}

/// Handler for adding resource links.
pub struct AddResourceLinkHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl AddResourceLinkHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AddResourceLinkCommand) -> Result<ResourceLink, LearningPathError> {
        let mut path = self
            .repository
            .find_by_id(&cmd.path_id)
            .await?
            .ok_or_else(|| LearningPathError::not_found(cmd.path_id))?;

        let link = path.add_resource_link(cmd.title, cmd.url)?;

        self.repository
            .add_resource_link(&link)
            .await
            .map_err(|e| LearningPathError::on_path(e, cmd.path_id))?;

        Ok(link)
    }
}
