//! PostgreSQL implementation of LearningPathRepository.
//!
//! Persists LearningPath aggregates across three tables:
//! `learning_paths`, `milestones` and `resource_links`. Children reference
//! their path with `ON DELETE CASCADE`.
//!
//! `update` runs in one transaction: a version-checked update of the path row
//! followed by a bulk update of milestone flags. Either both commit or
//! neither does.
//!
//! Inserting or deleting a milestone bumps the path version in the same
//! transaction, so a reconciling write loaded before the change conflicts.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, MilestoneId, PathId, ResourceLinkId, Timestamp, Version,
};
use crate::domain::learning_path::{LearningPath, Milestone, ResourceLink};
use crate::ports::LearningPathRepository;

/// PostgreSQL implementation of LearningPathRepository.
#[derive(Clone)]
pub struct PostgresLearningPathRepository {
    pool: PgPool,
}

impl PostgresLearningPathRepository {
    /// Creates a new PostgresLearningPathRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))
    }
}

#[async_trait]
impl LearningPathRepository for PostgresLearningPathRepository {
    async fn save(&self, path: &LearningPath) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO learning_paths (
                id, title, description, created_at, target_date, is_completed, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(path.id().as_uuid())
        .bind(path.title())
        .bind(path.description())
        .bind(path.created_at().as_datetime())
        .bind(path.target_date())
        .bind(path.is_completed())
        .bind(path.version().as_u32() as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert learning path", e))?;

        for milestone in path.milestones() {
            insert_milestone(&mut tx, milestone).await?;
        }
        for link in path.resource_links() {
            insert_resource_link(&mut tx, link).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit learning path", e))
    }

    async fn update(&self, path: &LearningPath) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE learning_paths SET
                title = $2,
                description = $3,
                target_date = $4,
                is_completed = $5,
                version = $6
            WHERE id = $1 AND version = $7
            "#,
        )
        .bind(path.id().as_uuid())
        .bind(path.title())
        .bind(path.description())
        .bind(path.target_date())
        .bind(path.is_completed())
        .bind(path.version().as_u32() as i32)
        .bind(path.version().previous().as_u32() as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update learning path", e))?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM learning_paths WHERE id = $1)",
            )
            .bind(path.id().as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to check learning path", e))?;

            if exists {
                tracing::debug!(path_id = %path.id(), version = %path.version(), "stale learning path write");
                return Err(DomainError::new(
                    ErrorCode::ConcurrencyConflict,
                    "Learning path version mismatch - another update occurred",
                ));
            }
            return Err(path_not_found(path.id()));
        }

        let (ids, flags): (Vec<Uuid>, Vec<bool>) = path
            .milestones()
            .iter()
            .map(|m| (*m.id().as_uuid(), m.is_completed()))
            .unzip();

        if !ids.is_empty() {
            sqlx::query(
                r#"
                UPDATE milestones AS m
                SET is_completed = v.is_completed
                FROM UNNEST($1::uuid[], $2::bool[]) AS v(id, is_completed)
                WHERE m.id = v.id AND m.learning_path_id = $3
                "#,
            )
            .bind(&ids)
            .bind(&flags)
            .bind(path.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to update milestones", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit learning path update", e))
    }

    async fn find_by_id(&self, id: &PathId) -> Result<Option<LearningPath>, DomainError> {
        let row = sqlx::query_as::<_, PathRow>(
            r#"
            SELECT id, title, description, created_at, target_date, is_completed, version
            FROM learning_paths
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch learning path", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let milestones = sqlx::query_as::<_, MilestoneRow>(
            r#"
            SELECT id, learning_path_id, title, is_completed
            FROM milestones
            WHERE learning_path_id = $1
            ORDER BY id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch milestones", e))?;

        let links = sqlx::query_as::<_, ResourceLinkRow>(
            r#"
            SELECT id, learning_path_id, title, url
            FROM resource_links
            WHERE learning_path_id = $1
            ORDER BY id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch resource links", e))?;

        Ok(Some(row.into_path(
            milestones.into_iter().map(MilestoneRow::into_milestone).collect(),
            links.into_iter().map(ResourceLinkRow::into_link).collect(),
        )))
    }

    async fn delete(&self, id: &PathId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM learning_paths WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete learning path", e))?;

        if result.rows_affected() == 0 {
            return Err(path_not_found(id));
        }
        Ok(())
    }

    async fn add_milestone(&self, milestone: &Milestone) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        bump_version(&mut tx, milestone.path_id()).await?;
        insert_milestone(&mut tx, milestone).await?;
        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit milestone", e))
    }

    async fn delete_milestone(
        &self,
        path_id: &PathId,
        milestone_id: &MilestoneId,
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        let result =
            sqlx::query("DELETE FROM milestones WHERE id = $1 AND learning_path_id = $2")
                .bind(milestone_id.as_uuid())
                .bind(path_id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to delete milestone", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MilestoneNotFound,
                format!("Milestone {} not found on path {}", milestone_id, path_id),
            ));
        }

        bump_version(&mut tx, path_id).await?;
        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit milestone delete", e))
    }

    async fn add_resource_link(&self, link: &ResourceLink) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        insert_resource_link(&mut tx, link).await?;
        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit resource link", e))
    }

    async fn delete_resource_link(
        &self,
        path_id: &PathId,
        link_id: &ResourceLinkId,
    ) -> Result<(), DomainError> {
        let result =
            sqlx::query("DELETE FROM resource_links WHERE id = $1 AND learning_path_id = $2")
                .bind(link_id.as_uuid())
                .bind(path_id.as_uuid())
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to delete resource link", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ResourceLinkNotFound,
                format!("Resource link {} not found on path {}", link_id, path_id),
            ));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Moves the path to its next version without touching its fields.
///
/// Takes the row lock, so it serializes with a concurrent versioned update.
async fn bump_version(
    tx: &mut Transaction<'static, Postgres>,
    path_id: &PathId,
) -> Result<(), DomainError> {
    let result = sqlx::query("UPDATE learning_paths SET version = version + 1 WHERE id = $1")
        .bind(path_id.as_uuid())
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to bump learning path version", e))?;

    if result.rows_affected() == 0 {
        return Err(path_not_found(path_id));
    }
    Ok(())
}

async fn insert_milestone(
    tx: &mut Transaction<'static, Postgres>,
    milestone: &Milestone,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO milestones (id, learning_path_id, title, is_completed)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(milestone.id().as_uuid())
    .bind(milestone.path_id().as_uuid())
    .bind(milestone.title())
    .bind(milestone.is_completed())
    .execute(&mut **tx)
    .await
    .map_err(|e| map_child_insert_error(e, milestone.path_id(), "milestone"))?;
    Ok(())
}

async fn insert_resource_link(
    tx: &mut Transaction<'static, Postgres>,
    link: &ResourceLink,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO resource_links (id, learning_path_id, title, url)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(link.id().as_uuid())
    .bind(link.path_id().as_uuid())
    .bind(link.title())
    .bind(link.url())
    .execute(&mut **tx)
    .await
    .map_err(|e| map_child_insert_error(e, link.path_id(), "resource link"))?;
    Ok(())
}

/// A foreign key violation on insert means the parent path is gone.
fn map_child_insert_error(err: sqlx::Error, path_id: &PathId, what: &str) -> DomainError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            path_not_found(path_id)
        }
        other => DomainError::database(&format!("Failed to insert {}", what), other),
    }
}

fn path_not_found(id: &PathId) -> DomainError {
    DomainError::new(
        ErrorCode::PathNotFound,
        format!("Learning path not found: {}", id),
    )
}

/// Internal row types for sqlx query mapping.
#[derive(Debug, sqlx::FromRow)]
struct PathRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    target_date: Option<chrono::NaiveDate>,
    is_completed: bool,
    version: i32,
}

impl PathRow {
    fn into_path(self, milestones: Vec<Milestone>, links: Vec<ResourceLink>) -> LearningPath {
        LearningPath::reconstitute(
            PathId::from_uuid(self.id),
            self.title,
            self.description,
            Timestamp::from_datetime(self.created_at),
            self.target_date,
            self.is_completed,
            version_from_db(self.version),
            milestones,
            links,
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MilestoneRow {
    id: Uuid,
    learning_path_id: Uuid,
    title: String,
    is_completed: bool,
}

impl MilestoneRow {
    fn into_milestone(self) -> Milestone {
        Milestone::reconstitute(
            MilestoneId::from_uuid(self.id),
            PathId::from_uuid(self.learning_path_id),
            self.title,
            self.is_completed,
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ResourceLinkRow {
    id: Uuid,
    learning_path_id: Uuid,
    title: String,
    url: String,
}

impl ResourceLinkRow {
    fn into_link(self) -> ResourceLink {
        ResourceLink::reconstitute(
            ResourceLinkId::from_uuid(self.id),
            PathId::from_uuid(self.learning_path_id),
            self.title,
            self.url,
        )
    }
}

/// The column has a `CHECK (version > 0)`, so negatives never occur.
pub(super) fn version_from_db(raw: i32) -> Version {
    Version::from_raw(raw.max(1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_from_db_preserves_positive_values() {
        assert_eq!(version_from_db(7), Version::from_raw(7));
    }

    #[test]
    fn milestone_row_maps_ids() {
        let path_id = Uuid::now_v7();
        let id = Uuid::now_v7();
        let milestone = MilestoneRow {
            id,
            learning_path_id: path_id,
            title: "Async".to_string(),
            is_completed: true,
        }
        .into_milestone();

        assert_eq!(milestone.id().as_uuid(), &id);
        assert!(milestone.belongs_to(&PathId::from_uuid(path_id)));
        assert!(milestone.is_completed());
    }

    #[test]
    fn path_row_sorts_milestones() {
        let path_id = Uuid::now_v7();
        let first = Milestone::reconstitute(MilestoneId::new(), PathId::from_uuid(path_id), "1".into(), false);
        let second = Milestone::reconstitute(MilestoneId::new(), PathId::from_uuid(path_id), "2".into(), false);
        let row = PathRow {
            id: path_id,
            title: "Rust".to_string(),
            description: None,
            created_at: chrono::Utc::now(),
            target_date: None,
            is_completed: false,
            version: 3,
        };

        let path = row.into_path(vec![second.clone(), first.clone()], vec![]);

        assert_eq!(path.milestones(), &[first, second]);
        assert_eq!(path.version(), Version::from_raw(3));
    }
}
