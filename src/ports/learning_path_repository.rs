//! Learning path repository port (write side).
//!
//! Defines the contract for persisting and retrieving LearningPath aggregates
//! together with their milestones and resource links.
//!
//! # Design
//!
//! - **Aggregate writes**: `update` persists the path row and every milestone
//!   flag as one atomic unit
//! - **Optimistic concurrency**: `update` succeeds only if the stored version
//!   equals `path.version().previous()`, and stores `path.version()`
//! - **Milestone set is versioned**: adding or deleting a milestone moves the
//!   stored version on, so an `update` loaded before the change conflicts
//! - **Cascading delete**: deleting a path removes its children

use crate::domain::foundation::{DomainError, MilestoneId, PathId, ResourceLinkId};
use crate::domain::learning_path::{LearningPath, Milestone, ResourceLink};
use async_trait::async_trait;

/// Repository port for LearningPath aggregate persistence.
#[async_trait]
pub trait LearningPathRepository: Send + Sync {
    /// Save a new path (with any children it already has).
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, path: &LearningPath) -> Result<(), DomainError>;

    /// Update an existing path and its milestone flags atomically.
    ///
    /// Does not add or remove children; those have their own operations.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if the path doesn't exist
    /// - `ConcurrencyConflict` if the stored version moved on since load
    /// - `DatabaseError` on persistence failure
    async fn update(&self, path: &LearningPath) -> Result<(), DomainError>;

    /// Find a path by its ID, with milestones (ordered by id) and links.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PathId) -> Result<Option<LearningPath>, DomainError>;

    /// Delete a path and everything it owns.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if the path doesn't exist
    async fn delete(&self, id: &PathId) -> Result<(), DomainError>;

    /// Insert a milestone under its path and bump the path version.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if the owning path no longer exists
    async fn add_milestone(&self, milestone: &Milestone) -> Result<(), DomainError>;

    /// Delete a milestone, matching both ids, and bump the path version.
    ///
    /// # Errors
    ///
    /// - `MilestoneNotFound` if no milestone has this id under this path
    async fn delete_milestone(
        &self,
        path_id: &PathId,
        milestone_id: &MilestoneId,
    ) -> Result<(), DomainError>;

    /// Insert a resource link under its path. Leaves the version alone.
    ///
    /// # Errors
    ///
    /// - `PathNotFound` if the owning path no longer exists
    async fn add_resource_link(&self, link: &ResourceLink) -> Result<(), DomainError>;

    /// Delete a resource link, matching both ids.
    ///
    /// # Errors
    ///
    /// - `ResourceLinkNotFound` if no link has this id under this path
    async fn delete_resource_link(
        &self,
        path_id: &PathId,
        link_id: &ResourceLinkId,
    ) -> Result<(), DomainError>;
}
