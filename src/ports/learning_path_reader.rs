//! Learning path reader port (read side / CQRS queries).
//!
//! Listing, filtering and dashboard statistics. Optimized for UI display;
//! never used to make write decisions.

use std::cmp::Ordering;

use crate::domain::foundation::{DomainError, PathId, Timestamp, Version};
use crate::domain::learning_path::LearningPath;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of active paths reported in [`PathStatistics::active_progress`].
pub const ACTIVE_PROGRESS_LIMIT: usize = 5;

/// Reader port for learning path queries.
#[async_trait]
pub trait LearningPathReader: Send + Sync {
    /// List path summaries matching the options, in the requested order.
    async fn list(&self, options: &ListOptions) -> Result<Vec<PathSummary>, DomainError>;

    /// Aggregate counts for the dashboard.
    async fn statistics(&self) -> Result<PathStatistics, DomainError>;
}

/// Completion filter for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !completed,
            StatusFilter::Completed => completed,
        }
    }
}

/// Sort order for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// By title, case-insensitive.
    Alphabetical,
}

impl SortOrder {
    /// Compares two summaries. Ties fall back to id so the order is total.
    pub fn compare(self, a: &PathSummary, b: &PathSummary) -> Ordering {
        match self {
            SortOrder::Newest => b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)),
            SortOrder::Oldest => a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)),
            SortOrder::Alphabetical => a
                .title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then(a.id.cmp(&b.id)),
        }
    }
}

/// Options for listing paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOptions {
    pub status: StatusFilter,
    pub sort: SortOrder,
    /// Case-insensitive substring match on title or description.
    pub search: Option<String>,
}

impl ListOptions {
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// The search term, trimmed, or `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Whether a summary passes the status filter and search term.
    pub fn matches(&self, summary: &PathSummary) -> bool {
        if !self.status.matches(summary.completed) {
            return false;
        }
        match self.search_term() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                summary.title.to_lowercase().contains(&term)
                    || summary
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            }
        }
    }
}

/// Summary view of a path for lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSummary {
    pub id: PathId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub target_date: Option<NaiveDate>,
    pub completed: bool,
    pub version: Version,
    pub milestone_count: u32,
    pub completed_milestone_count: u32,
    pub resource_link_count: u32,
    pub progress_percent: u8,
}

impl From<&LearningPath> for PathSummary {
    fn from(path: &LearningPath) -> Self {
        Self {
            id: *path.id(),
            title: path.title().to_string(),
            description: path.description().map(str::to_string),
            created_at: *path.created_at(),
            target_date: path.target_date(),
            completed: path.is_completed(),
            version: path.version(),
            milestone_count: path.milestones().len() as u32,
            completed_milestone_count: path.completed_milestone_count() as u32,
            resource_link_count: path.resource_links().len() as u32,
            progress_percent: path.progress_percent(),
        }
    }
}

/// Progress of one active path, for the dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathProgress {
    pub id: PathId,
    pub title: String,
    pub progress_percent: u8,
}

/// Dashboard statistics across all paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStatistics {
    pub total_paths: u64,
    pub completed_paths: u64,
    pub active_paths: u64,
    pub total_milestones: u64,
    pub completed_milestones: u64,
    /// Up to [`ACTIVE_PROGRESS_LIMIT`] active paths, newest first.
    pub active_progress: Vec<PathProgress>,
}

impl PathStatistics {
    /// Builds statistics from summaries in any order.
    pub fn from_summaries(summaries: &[PathSummary]) -> Self {
        let mut stats = PathStatistics::default();
        for s in summaries {
            stats.total_paths += 1;
            if s.completed {
                stats.completed_paths += 1;
            } else {
                stats.active_paths += 1;
            }
            stats.total_milestones += u64::from(s.milestone_count);
            stats.completed_milestones += u64::from(s.completed_milestone_count);
        }

        let mut active: Vec<&PathSummary> = summaries.iter().filter(|s| !s.completed).collect();
        active.sort_by(|a, b| SortOrder::Newest.compare(a, b));
        stats.active_progress = active
            .into_iter()
            .take(ACTIVE_PROGRESS_LIMIT)
            .map(|s| PathProgress {
                id: s.id,
                title: s.title.clone(),
                progress_percent: s.progress_percent,
            })
            .collect();
        stats
    }
}
