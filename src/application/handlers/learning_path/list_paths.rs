//! ListPathsHandler - Query handler for filtered, sorted path summaries.

use std::sync::Arc;

use crate::domain::learning_path::LearningPathError;
use crate::ports::{LearningPathReader, ListOptions, PathSummary};

/// Query to list paths.
#[derive(Debug, Clone, Default)]
pub struct ListPathsQuery {
    pub options: ListOptions,
}

/// Handler for listing path summaries.
pub struct ListPathsHandler {
    reader: Arc<dyn LearningPathReader>,
}

impl ListPathsHandler {
    pub fn new(reader: Arc<dyn LearningPathReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListPathsQuery) -> Result<Vec<PathSummary>, LearningPathError> {
        Ok(self.reader.list(&query.options).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLearningPathStore;
    use crate::domain::foundation::PathId;
    use crate::domain::learning_path::{LearningPath, PathDetails};
    use crate::ports::{LearningPathRepository, SortOrder, StatusFilter};

    async fn seed(store: &InMemoryLearningPathStore, title: &str, description: &str) -> LearningPath {
        let path = LearningPath::new(
            PathId::new(),
            PathDetails {
                title: title.to_string(),
                description: Some(description.to_string()),
                target_date: None,
            },
        )
        .unwrap();
        store.save(&path).await.unwrap();
        path
    }

    #[tokio::test]
    async fn lists_newest_first_by_default() {
        let store = Arc::new(InMemoryLearningPathStore::new());
        let older = seed(&store, "Go", "Concurrency").await;
        let newer = seed(&store, "Rust", "Ownership").await;
        let handler = ListPathsHandler::new(store);

        let summaries = handler.handle(ListPathsQuery::default()).await.unwrap();

        let ids: Vec<PathId> = summaries.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![*newer.id(), *older.id()]);
    }

    #[tokio::test]
    async fn searches_and_sorts() {
        let store = Arc::new(InMemoryLearningPathStore::new());
        seed(&store, "zig", "systems language").await;
        seed(&store, "Assembly", "low level SYSTEMS").await;
        seed(&store, "Painting", "watercolor").await;
        let handler = ListPathsHandler::new(store);

        let summaries = handler
            .handle(ListPathsQuery {
                options: ListOptions::default()
                    .with_search("systems")
                    .with_sort(SortOrder::Alphabetical),
            })
            .await
            .unwrap();

        let titles: Vec<&str> = summaries.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Assembly", "zig"]);
    }

    #[tokio::test]
    async fn filters_completed_paths() {
        let store = Arc::new(InMemoryLearningPathStore::new());
        let mut done = seed(&store, "Done", "finished").await;
        seed(&store, "Open", "in progress").await;
        done.update(
            PathDetails {
                title: "Done".to_string(),
                description: None,
                target_date: None,
            },
            true,
            None,
        )
        .unwrap();
        store.update(&done).await.unwrap();
        let handler = ListPathsHandler::new(store);

        let summaries = handler
            .handle(ListPathsQuery {
                options: ListOptions::default().with_status(StatusFilter::Completed),
            })
            .await
            .unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, *done.id());
        assert_eq!(summaries[0].progress_percent, 100);
    }
}
