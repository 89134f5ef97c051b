//! GetStatisticsHandler - Query handler for dashboard statistics.

use std::sync::Arc;

use crate::domain::learning_path::LearningPathError;
use crate::ports::{LearningPathReader, PathStatistics};

/// Handler for aggregate path statistics.
pub struct GetStatisticsHandler {
    reader: Arc<dyn LearningPathReader>,
}

impl GetStatisticsHandler {
    pub fn new(reader: Arc<dyn LearningPathReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<PathStatistics, LearningPathError> {
        Ok(self.reader.statistics().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLearningPathStore;
    use crate::domain::foundation::PathId;
    use crate::domain::learning_path::{LearningPath, PathDetails};
    use crate::ports::LearningPathRepository;

    #[tokio::test]
    async fn empty_store_reports_zeroes() {
        let handler = GetStatisticsHandler::new(Arc::new(InMemoryLearningPathStore::new()));

        let stats = handler.handle().await.unwrap();

        assert_eq!(stats, PathStatistics::default());
    }

    #[tokio::test]
    async fn counts_milestones_and_progress() {
        let store = Arc::new(InMemoryLearningPathStore::new());
        let mut path = LearningPath::new(
            PathId::new(),
            PathDetails {
                title: "Rust".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        let m1 = path.add_milestone("Ownership").unwrap();
        path.add_milestone("Traits").unwrap();
        store.save(&path).await.unwrap();
        path.set_milestone_completion(m1.id(), true).unwrap();
        store.update(&path).await.unwrap();
        let handler = GetStatisticsHandler::new(store);

        let stats = handler.handle().await.unwrap();

        assert_eq!(stats.total_paths, 1);
        assert_eq!(stats.active_paths, 1);
        assert_eq!(stats.total_milestones, 2);
        assert_eq!(stats.completed_milestones, 1);
        assert_eq!(stats.active_progress[0].progress_percent, 50);
    }
}
