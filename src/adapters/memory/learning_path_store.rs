//! In-memory learning path store.
//!
//! Implements both the repository and the reader port over plain maps laid
//! out like the relational schema (one map per table). Version checks and
//! not-found semantics match the PostgreSQL adapter, so handler tests and the
//! HTTP integration tests exercise the same behavior as production.
//!
//! Used when no database URL is configured.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, MilestoneId, PathId, ResourceLinkId, Timestamp, Version,
};
use crate::domain::learning_path::{LearningPath, Milestone, ResourceLink};
use crate::ports::{
    HealthCheck, LearningPathReader, LearningPathRepository, ListOptions, PathStatistics,
    PathSummary,
};

#[derive(Debug, Clone)]
struct PathRow {
    title: String,
    description: Option<String>,
    created_at: Timestamp,
    target_date: Option<NaiveDate>,
    completed: bool,
    version: Version,
}

#[derive(Debug, Default)]
struct Tables {
    paths: HashMap<PathId, PathRow>,
    milestones: BTreeMap<MilestoneId, Milestone>,
    resource_links: BTreeMap<ResourceLinkId, ResourceLink>,
}

impl Tables {
    fn load(&self, id: &PathId) -> Option<LearningPath> {
        let row = self.paths.get(id)?;
        let milestones = self
            .milestones
            .values()
            .filter(|m| m.belongs_to(id))
            .cloned()
            .collect();
        let links = self
            .resource_links
            .values()
            .filter(|l| l.belongs_to(id))
            .cloned()
            .collect();
        Some(LearningPath::reconstitute(
            *id,
            row.title.clone(),
            row.description.clone(),
            row.created_at,
            row.target_date,
            row.completed,
            row.version,
            milestones,
            links,
        ))
    }

    fn all(&self) -> Vec<LearningPath> {
        self.paths.keys().filter_map(|id| self.load(id)).collect()
    }
}

/// In-memory implementation of [`LearningPathRepository`] and
/// [`LearningPathReader`].
#[derive(Debug, Default)]
pub struct InMemoryLearningPathStore {
    tables: RwLock<Tables>,
}

impl InMemoryLearningPathStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored paths.
    pub async fn path_count(&self) -> usize {
        self.tables.read().await.paths.len()
    }

    /// Number of stored milestones across all paths.
    pub async fn milestone_count(&self) -> usize {
        self.tables.read().await.milestones.len()
    }

    /// Number of stored resource links across all paths.
    pub async fn resource_link_count(&self) -> usize {
        self.tables.read().await.resource_links.len()
    }
}

fn path_not_found(id: &PathId) -> DomainError {
    DomainError::new(
        ErrorCode::PathNotFound,
        format!("Learning path not found: {}", id),
    )
}

#[async_trait]
impl LearningPathRepository for InMemoryLearningPathStore {
    async fn save(&self, path: &LearningPath) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.paths.contains_key(path.id()) {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!("Learning path already exists: {}", path.id()),
            ));
        }
        tables.paths.insert(
            *path.id(),
            PathRow {
                title: path.title().to_string(),
                description: path.description().map(str::to_string),
                created_at: *path.created_at(),
                target_date: path.target_date(),
                completed: path.is_completed(),
                version: path.version(),
            },
        );
        for m in path.milestones() {
            tables.milestones.insert(*m.id(), m.clone());
        }
        for l in path.resource_links() {
            tables.resource_links.insert(*l.id(), l.clone());
        }
        Ok(())
    }

    async fn update(&self, path: &LearningPath) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .paths
            .get_mut(path.id())
            .ok_or_else(|| path_not_found(path.id()))?;

        if row.version != path.version().previous() {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                "Learning path version mismatch - another update occurred",
            ));
        }

        row.title = path.title().to_string();
        row.description = path.description().map(str::to_string);
        row.target_date = path.target_date();
        row.completed = path.is_completed();
        row.version = path.version();

        // Children removed concurrently stay removed.
        for m in path.milestones() {
            if let Some(stored) = tables.milestones.get_mut(m.id()) {
                *stored = Milestone::reconstitute(
                    *stored.id(),
                    *stored.path_id(),
                    stored.title().to_string(),
                    m.is_completed(),
                );
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &PathId) -> Result<Option<LearningPath>, DomainError> {
        Ok(self.tables.read().await.load(id))
    }

    async fn delete(&self, id: &PathId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.paths.remove(id).is_none() {
            return Err(path_not_found(id));
        }
        tables.milestones.retain(|_, m| !m.belongs_to(id));
        tables.resource_links.retain(|_, l| !l.belongs_to(id));
        Ok(())
    }

    async fn add_milestone(&self, milestone: &Milestone) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .paths
            .get_mut(milestone.path_id())
            .ok_or_else(|| path_not_found(milestone.path_id()))?;
        row.version = row.version.increment();
        tables.milestones.insert(*milestone.id(), milestone.clone());
        Ok(())
    }

    async fn delete_milestone(
        &self,
        path_id: &PathId,
        milestone_id: &MilestoneId,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .milestones
            .get(milestone_id)
            .is_some_and(|m| m.belongs_to(path_id));
        if !owned {
            return Err(DomainError::new(
                ErrorCode::MilestoneNotFound,
                format!("Milestone {} not found on path {}", milestone_id, path_id),
            ));
        }
        tables.milestones.remove(milestone_id);
        if let Some(row) = tables.paths.get_mut(path_id) {
            row.version = row.version.increment();
        }
        Ok(())
    }

    async fn add_resource_link(&self, link: &ResourceLink) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.paths.contains_key(link.path_id()) {
            return Err(path_not_found(link.path_id()));
        }
        tables.resource_links.insert(*link.id(), link.clone());
        Ok(())
    }

    async fn delete_resource_link(
        &self,
        path_id: &PathId,
        link_id: &ResourceLinkId,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .resource_links
            .get(link_id)
            .is_some_and(|l| l.belongs_to(path_id));
        if !owned {
            return Err(DomainError::new(
                ErrorCode::ResourceLinkNotFound,
                format!("Resource link {} not found on path {}", link_id, path_id),
            ));
        }
        tables.resource_links.remove(link_id);
        Ok(())
    }
}

#[async_trait]
impl LearningPathReader for InMemoryLearningPathStore {
    async fn list(&self, options: &ListOptions) -> Result<Vec<PathSummary>, DomainError> {
        let tables = self.tables.read().await;
        let mut summaries: Vec<PathSummary> = tables
            .all()
            .iter()
            .map(PathSummary::from)
            .filter(|s| options.matches(s))
            .collect();
        summaries.sort_by(|a, b| options.sort.compare(a, b));
        Ok(summaries)
    }

    async fn statistics(&self) -> Result<PathStatistics, DomainError> {
        let tables = self.tables.read().await;
        let summaries: Vec<PathSummary> = tables.all().iter().map(PathSummary::from).collect();
        Ok(PathStatistics::from_summaries(&summaries))
    }
}

#[async_trait]
impl HealthCheck for InMemoryLearningPathStore {
    fn store_name(&self) -> &'static str {
        "memory"
    }

    async fn check(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
