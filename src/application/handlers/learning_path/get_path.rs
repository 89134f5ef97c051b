//! GetPathHandler - Query handler for a single learning path with its children.

use std::sync::Arc;

use crate::domain::foundation::PathId;
use crate::domain::learning_path::{LearningPath, LearningPathError};
use crate::ports::LearningPathRepository;

/// Query to get a path by ID.
#[derive(Debug, Clone)]
pub struct GetPathQuery {
    pub path_id: PathId,
}

/// Handler for retrieving a path with milestones and resource links.
pub struct GetPathHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl GetPathHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetPathQuery) -> Result<LearningPath, LearningPathError> {
        self.repository
            .find_by_id(&query.path_id)
            .await?
            .ok_or_else(|| LearningPathError::not_found(query.path_id))
    }
}
