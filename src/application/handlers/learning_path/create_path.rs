//! CreatePathHandler - Command handler for creating learning paths.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::PathId;
use crate::domain::learning_path::{LearningPath, LearningPathError, PathDetails};
use crate::ports::LearningPathRepository;

/// Command to create a learning path.
#[derive(Debug, Clone)]
pub struct CreatePathCommand {
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
}

/// Handler for creating learning paths.
pub struct CreatePathHandler {
    repository: Arc<dyn LearningPathRepository>,
}

impl CreatePathHandler {
    pub fn new(repository: Arc<dyn LearningPathRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreatePathCommand) -> Result<LearningPath, LearningPathError> {
        // 1. Build the aggregate (validates title and description)
        let path = LearningPath::new(
            PathId::new(),
            PathDetails {
                title: cmd.title,
                description: cmd.description,
                target_date: cmd.target_date,
            },
        )?;

        // 2. Persist
        self.repository.save(&path).await?;

        tracing::info!(path_id = %path.id(), "learning path created");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLearningPathStore;
    use crate::domain::foundation::{DomainError, ErrorCode, MilestoneId, ResourceLinkId, Version};
    use crate::domain::learning_path::{Milestone, ResourceLink};
    use async_trait::async_trait;

    fn command(title: &str) -> CreatePathCommand {
        CreatePathCommand {
            title: title.to_string(),
            description: Some("Ownership, traits, async".to_string()),
            target_date: NaiveDate::from_ymd_opt(2026, 12, 31),
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl LearningPathRepository for FailingRepository {
        async fn save(&self, _path: &LearningPath) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated save failure"))
        }
        async fn update(&self, _path: &LearningPath) -> Result<(), DomainError> {
            unimplemented!()
        }
        async fn find_by_id(&self, _id: &PathId) -> Result<Option<LearningPath>, DomainError> {
            unimplemented!()
        }
        async fn delete(&self, _id: &PathId) -> Result<(), DomainError> {
            unimplemented!()
        }
        async fn add_milestone(&self, _milestone: &Milestone) -> Result<(), DomainError> {
            unimplemented!()
        }
        async fn delete_milestone(
            &self,
            _path_id: &PathId,
            _milestone_id: &MilestoneId,
        ) -> Result<(), DomainError> {
            unimplemented!()
        }
        async fn add_resource_link(&self, _link: &ResourceLink) -> Result<(), DomainError> {
            unimplemented!()
        }
        async fn delete_resource_link(
            &self,
            _path_id: &PathId,
            _link_id: &ResourceLinkId,
        ) -> Result<(), DomainError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn creates_incomplete_path_at_version_one() {
        let store = Arc::new(InMemoryLearningPathStore::new());
        let handler = CreatePathHandler::new(store.clone());

        let path = handler.handle(command("Learn Rust")).await.unwrap();

        assert_eq!(path.title(), "Learn Rust");
        assert!(!path.is_completed());
        assert_eq!(path.version(), Version::initial());
        assert!(path.milestones().is_empty());
        assert_eq!(store.path_count().await, 1);
    }

    #[tokio::test]
    async fn trims_title() {
        let store = Arc::new(InMemoryLearningPathStore::new());
        let handler = CreatePathHandler::new(store);

        let path = handler.handle(command("  Learn Rust  ")).await.unwrap();

        assert_eq!(path.title(), "Learn Rust");
    }

    #[tokio::test]
    async fn rejects_blank_title_without_saving() {
        let store = Arc::new(InMemoryLearningPathStore::new());
        let handler = CreatePathHandler::new(store.clone());

        let result = handler.handle(command("   ")).await;

        assert!(matches!(
            result,
            Err(LearningPathError::ValidationFailed { ref field, .. }) if field == "title"
        ));
        assert_eq!(store.path_count().await, 0);
    }

    #[tokio::test]
    async fn rejects_overlong_description() {
        let store = Arc::new(InMemoryLearningPathStore::new());
        let handler = CreatePathHandler::new(store);
        let mut cmd = command("Learn Rust");
        cmd.description = Some("x".repeat(501));

        let result = handler.handle(cmd).await;

        assert!(matches!(
            result,
            Err(LearningPathError::ValidationFailed { ref field, .. }) if field == "description"
        ));
    }

    #[tokio::test]
    async fn surfaces_storage_failure_as_infrastructure() {
        let handler = CreatePathHandler::new(Arc::new(FailingRepository));

        let result = handler.handle(command("Learn Rust")).await;

        assert!(matches!(result, Err(LearningPathError::Infrastructure(_))));
    }
}
