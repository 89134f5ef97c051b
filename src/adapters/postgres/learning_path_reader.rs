//! PostgreSQL implementation of LearningPathReader.
//!
//! Child counts are aggregated in SQL so listing never loads milestone or
//! link rows.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, PathId, Timestamp};
use crate::domain::learning_path::progress_percent;
use crate::ports::{
    LearningPathReader, ListOptions, PathStatistics, PathSummary, SortOrder, StatusFilter,
};

use super::learning_path_repository::version_from_db;

/// PostgreSQL implementation of the LearningPathReader port.
#[derive(Clone)]
pub struct PostgresLearningPathReader {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresLearningPathReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresLearningPathReader")
            .field("pool", &"PgPool")
            .finish()
    }
}

impl PostgresLearningPathReader {
    /// Creates a new reader instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for summary queries.
#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: uuid::Uuid,
    title: String,
    description: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    target_date: Option<chrono::NaiveDate>,
    is_completed: bool,
    version: i32,
    milestone_count: i64,
    completed_milestone_count: i64,
    resource_link_count: i64,
}

impl SummaryRow {
    fn into_summary(self) -> PathSummary {
        let total = self.milestone_count.max(0) as u32;
        let done = self.completed_milestone_count.max(0) as u32;
        PathSummary {
            id: PathId::from_uuid(self.id),
            title: self.title,
            description: self.description,
            created_at: Timestamp::from_datetime(self.created_at),
            target_date: self.target_date,
            completed: self.is_completed,
            version: version_from_db(self.version),
            milestone_count: total,
            completed_milestone_count: done,
            resource_link_count: self.resource_link_count.max(0) as u32,
            progress_percent: progress_percent(self.is_completed, done as usize, total as usize),
        }
    }
}

/// ORDER BY clause for a sort order. Always ends on the id for a total order.
fn order_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Newest => "p.created_at DESC, p.id DESC",
        SortOrder::Oldest => "p.created_at ASC, p.id ASC",
        SortOrder::Alphabetical => "LOWER(p.title) ASC, p.id ASC",
    }
}

/// Completion flag to filter on, or `None` for every path.
fn completed_filter(status: StatusFilter) -> Option<bool> {
    match status {
        StatusFilter::All => None,
        StatusFilter::Active => Some(false),
        StatusFilter::Completed => Some(true),
    }
}

/// Builds an ILIKE pattern matching `term` anywhere, with wildcards escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl LearningPathReader for PostgresLearningPathReader {
    async fn list(&self, options: &ListOptions) -> Result<Vec<PathSummary>, DomainError> {
        let sql = format!(
            r#"
            SELECT
                p.id, p.title, p.description, p.created_at, p.target_date,
                p.is_completed, p.version,
                COALESCE(m.total, 0) AS milestone_count,
                COALESCE(m.done, 0) AS completed_milestone_count,
                COALESCE(r.total, 0) AS resource_link_count
            FROM learning_paths p
            LEFT JOIN (
                SELECT learning_path_id,
                       COUNT(*) AS total,
                       COUNT(*) FILTER (WHERE is_completed) AS done
                FROM milestones
                GROUP BY learning_path_id
            ) m ON m.learning_path_id = p.id
            LEFT JOIN (
                SELECT learning_path_id, COUNT(*) AS total
                FROM resource_links
                GROUP BY learning_path_id
            ) r ON r.learning_path_id = p.id
            WHERE ($1::boolean IS NULL OR p.is_completed = $1)
              AND ($2::text IS NULL
                   OR p.title ILIKE $2 ESCAPE '\'
                   OR p.description ILIKE $2 ESCAPE '\')
            ORDER BY {}
            "#,
            order_clause(options.sort)
        );

        let rows = sqlx::query_as::<_, SummaryRow>(&sql)
            .bind(completed_filter(options.status))
            .bind(options.search_term().map(like_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list learning paths", e))?;

        Ok(rows.into_iter().map(SummaryRow::into_summary).collect())
    }

    async fn statistics(&self) -> Result<PathStatistics, DomainError> {
        let summaries = self.list(&ListOptions::default()).await?;
        Ok(PathStatistics::from_summaries(&summaries))
    }
}
