//! LearningPath aggregate.
//!
//! A learning path is the aggregate root for its milestones and resource
//! links. All completion changes go through this type so the reconciliation
//! rule is applied in one place.
//!
//! # Ownership
//!
//! Milestones and resource links are owned by exactly one path. Deleting a
//! path deletes them; they are never moved between paths.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::milestone::Milestone;
use super::reconciliation::{self, CompletionTransition};
use super::resource_link::ResourceLink;
use crate::domain::foundation::{
    DomainError, ErrorCode, MilestoneId, PathId, ResourceLinkId, Timestamp, ValidationError,
    Version,
};

/// Maximum length for a path title.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum length for a path description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// User-editable fields of a path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathDetails {
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
}

/// What a path update did to the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathUpdate {
    /// Direction of the completion change, if any.
    pub transition: CompletionTransition,
    /// Milestones whose flag was forced by the transition.
    pub forced_milestones: Vec<MilestoneId>,
}

/// What a milestone toggle did to the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneToggle {
    /// The milestone after the toggle.
    pub milestone: Milestone,
    /// The path flag after reconciliation.
    pub path_completed: bool,
    /// Whether reconciliation changed the path flag.
    pub path_completion_changed: bool,
}

/// Learning path aggregate.
///
/// # Invariants
///
/// - `title` is 1-100 characters after trimming
/// - `description` is at most 500 characters
/// - `created_at` never changes
/// - `milestones` are ordered by id (creation order)
/// - after a milestone toggle, `completed` equals "all milestones completed"
///   whenever at least one milestone exists
/// - after a path-level completion change, every milestone matches `completed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    id: PathId,
    title: String,
    description: Option<String>,
    created_at: Timestamp,
    target_date: Option<NaiveDate>,
    completed: bool,
    version: Version,
    milestones: Vec<Milestone>,
    resource_links: Vec<ResourceLink>,
}

impl LearningPath {
    /// Create a new, incomplete path.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title or description are out of bounds
    pub fn new(id: PathId, details: PathDetails) -> Result<Self, DomainError> {
        let (title, description) = validate_details(&details)?;

        Ok(Self {
            id,
            title,
            description,
            created_at: Timestamp::now(),
            target_date: details.target_date,
            completed: false,
            version: Version::initial(),
            milestones: Vec::new(),
            resource_links: Vec::new(),
        })
    }

    /// Reconstitute a path from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PathId,
        title: String,
        description: Option<String>,
        created_at: Timestamp,
        target_date: Option<NaiveDate>,
        completed: bool,
        version: Version,
        mut milestones: Vec<Milestone>,
        resource_links: Vec<ResourceLink>,
    ) -> Self {
        milestones.sort_by(|a, b| a.id().cmp(b.id()));
        Self {
            id,
            title,
            description,
            created_at,
            target_date,
            completed,
            version,
            milestones,
            resource_links,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PathId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn target_date(&self) -> Option<NaiveDate> {
        self.target_date
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Version as of the last mutation.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Milestones in creation order.
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn resource_links(&self) -> &[ResourceLink] {
        &self.resource_links
    }

    pub fn milestone(&self, id: &MilestoneId) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id() == id)
    }

    pub fn completed_milestone_count(&self) -> usize {
        self.milestones.iter().filter(|m| m.is_completed()).count()
    }

    /// Progress in whole percent, as shown to the user.
    pub fn progress_percent(&self) -> u8 {
        reconciliation::progress_percent(
            self.completed,
            self.completed_milestone_count(),
            self.milestones.len(),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completion reconciliation
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a user edit of the path, including an explicit completion flag.
    ///
    /// A false -> true change forces every milestone to completed, a
    /// true -> false change forces every milestone to incomplete. An
    /// unchanged flag leaves milestones alone.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if `expected_version` is given and stale
    /// - `ValidationFailed` if title or description are out of bounds
    pub fn update(
        &mut self,
        details: PathDetails,
        completed: bool,
        expected_version: Option<Version>,
    ) -> Result<PathUpdate, DomainError> {
        self.ensure_version(expected_version)?;
        let (title, description) = validate_details(&details)?;

        let transition = CompletionTransition::between(self.completed, completed);
        let mut forced_milestones = Vec::new();
        if let Some(forced) = transition.forced_milestone_state() {
            for milestone in &mut self.milestones {
                if milestone.set_completed(forced) {
                    forced_milestones.push(*milestone.id());
                }
            }
        }

        self.title = title;
        self.description = description;
        self.target_date = details.target_date;
        self.completed = completed;
        self.version = self.version.increment();

        Ok(PathUpdate {
            transition,
            forced_milestones,
        })
    }

    /// Set one milestone's flag and recompute the path flag from all milestones.
    ///
    /// # Errors
    ///
    /// - `MilestoneNotFound` if the milestone is not part of this path
    pub fn set_milestone_completion(
        &mut self,
        milestone_id: &MilestoneId,
        completed: bool,
    ) -> Result<MilestoneToggle, DomainError> {
        let path_id = self.id;
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.id() == milestone_id)
            .ok_or_else(|| milestone_not_found(&path_id, milestone_id))?;
        milestone.set_completed(completed);
        let milestone = milestone.clone();

        let derived = reconciliation::derive_path_completion(
            self.milestones.iter().map(Milestone::is_completed),
        );
        let path_completion_changed = match derived {
            Some(all_complete) if all_complete != self.completed => {
                self.completed = all_complete;
                true
            }
            _ => false,
        };
        self.version = self.version.increment();

        Ok(MilestoneToggle {
            milestone,
            path_completed: self.completed,
            path_completion_changed,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────────

    /// Add an incomplete milestone. Does not recompute the path flag.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is blank or too long
    pub fn add_milestone(&mut self, title: impl Into<String>) -> Result<Milestone, DomainError> {
        let milestone = Milestone::new(self.id, title)?;
        self.milestones.push(milestone.clone());
        Ok(milestone)
    }

    /// Remove a milestone. Does not recompute the path flag.
    ///
    /// # Errors
    ///
    /// - `MilestoneNotFound` if the milestone is not part of this path
    pub fn remove_milestone(&mut self, milestone_id: &MilestoneId) -> Result<Milestone, DomainError> {
        let pos = self
            .milestones
            .iter()
            .position(|m| m.id() == milestone_id)
            .ok_or_else(|| milestone_not_found(&self.id, milestone_id))?;
        Ok(self.milestones.remove(pos))
    }

    /// Attach a resource link.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title or url are invalid
    pub fn add_resource_link(
        &mut self,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<ResourceLink, DomainError> {
        let link = ResourceLink::new(self.id, title, url)?;
        self.resource_links.push(link.clone());
        Ok(link)
    }

    /// Detach a resource link.
    ///
    /// # Errors
    ///
    /// - `ResourceLinkNotFound` if the link is not part of this path
    pub fn remove_resource_link(
        &mut self,
        link_id: &ResourceLinkId,
    ) -> Result<ResourceLink, DomainError> {
        let pos = self
            .resource_links
            .iter()
            .position(|l| l.id() == link_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ResourceLinkNotFound,
                    format!("Resource link {} not found on path {}", link_id, self.id),
                )
            })?;
        Ok(self.resource_links.remove(pos))
    }

    fn ensure_version(&self, expected: Option<Version>) -> Result<(), DomainError> {
        match expected {
            Some(expected) if expected != self.version => Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!(
                    "Learning path version mismatch: expected {}, found {}",
                    expected, self.version
                ),
            )
            .with_detail("expected", expected.as_u32().to_string())
            .with_detail("actual", self.version.as_u32().to_string())),
            _ => Ok(()),
        }
    }
}

fn milestone_not_found(path_id: &PathId, milestone_id: &MilestoneId) -> DomainError {
    DomainError::new(
        ErrorCode::MilestoneNotFound,
        format!("Milestone {} not found on path {}", milestone_id, path_id),
    )
}

fn validate_details(details: &PathDetails) -> Result<(String, Option<String>), ValidationError> {
    let title = details.title.trim();
    if title.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH, len));
    }

    let description = details
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    if let Some(d) = description {
        let len = d.chars().count();
        if len > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::too_long(
                "description",
                MAX_DESCRIPTION_LENGTH,
                len,
            ));
        }
    }

    Ok((title.to_string(), description.map(str::to_string)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn details(title: &str) -> PathDetails {
        PathDetails {
            title: title.to_string(),
            description: Some("Systems programming".to_string()),
            target_date: None,
        }
    }

    fn path_with_milestones(flags: &[bool]) -> LearningPath {
        let mut path = LearningPath::new(PathId::new(), details("Rust")).unwrap();
        for (i, flag) in flags.iter().enumerate() {
            let m = path.add_milestone(format!("Step {}", i + 1)).unwrap();
            if *flag {
                path.milestones
                    .iter_mut()
                    .find(|x| x.id() == m.id())
                    .unwrap()
                    .set_completed(true);
            }
        }
        path
    }

    // ─────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn new_path_starts_incomplete_at_initial_version() {
        let path = LearningPath::new(PathId::new(), details("Rust")).unwrap();
        assert!(!path.is_completed());
        assert_eq!(path.version(), Version::initial());
        assert!(path.milestones().is_empty());
        assert!(path.resource_links().is_empty());
    }

    #[test]
    fn new_path_rejects_blank_title() {
        let err = LearningPath::new(PathId::new(), details("  ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("field"), Some("title"));
    }

    #[test]
    fn new_path_rejects_long_title() {
        let err = LearningPath::new(PathId::new(), details(&"a".repeat(101))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn new_path_rejects_long_description() {
        let d = PathDetails {
            title: "Rust".to_string(),
            description: Some("d".repeat(501)),
            target_date: None,
        };
        let err = LearningPath::new(PathId::new(), d).unwrap_err();
        assert_eq!(err.detail("field"), Some("description"));
    }

    #[test]
    fn blank_description_is_stored_as_none() {
        let d = PathDetails {
            title: "Rust".to_string(),
            description: Some("   ".to_string()),
            target_date: None,
        };
        let path = LearningPath::new(PathId::new(), d).unwrap();
        assert_eq!(path.description(), None);
    }

    #[test]
    fn reconstitute_orders_milestones_by_id() {
        let path_id = PathId::new();
        let first = Milestone::new(path_id, "first").unwrap();
        let second = Milestone::new(path_id, "second").unwrap();
        let path = LearningPath::reconstitute(
            path_id,
            "Rust".to_string(),
            None,
            Timestamp::now(),
            None,
            false,
            Version::from_raw(4),
            vec![second.clone(), first.clone()],
            vec![],
        );
        assert_eq!(path.milestones(), &[first, second]);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Path-level completion
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn completing_path_forces_all_milestones_complete() {
        let mut path = path_with_milestones(&[false, true, false]);
        let outcome = path.update(details("Rust"), true, None).unwrap();

        assert_eq!(outcome.transition, CompletionTransition::Completed);
        assert_eq!(outcome.forced_milestones.len(), 2);
        assert!(path.is_completed());
        assert!(path.milestones().iter().all(Milestone::is_completed));
    }

    #[test]
    fn reopening_path_forces_all_milestones_incomplete() {
        let mut path = path_with_milestones(&[true, true]);
        path.completed = true;

        let outcome = path.update(details("Rust"), false, None).unwrap();

        assert_eq!(outcome.transition, CompletionTransition::Reopened);
        assert!(!path.is_completed());
        assert!(path.milestones().iter().all(|m| !m.is_completed()));
    }

    #[test]
    fn unchanged_flag_leaves_milestones_alone() {
        let mut path = path_with_milestones(&[true, false]);
        let outcome = path.update(details("Rust, renamed"), false, None).unwrap();

        assert_eq!(outcome.transition, CompletionTransition::Unchanged);
        assert!(outcome.forced_milestones.is_empty());
        assert_eq!(path.title(), "Rust, renamed");
        assert!(path.milestones()[0].is_completed());
        assert!(!path.milestones()[1].is_completed());
    }

    #[test]
    fn zero_milestone_path_flag_is_user_set() {
        let mut path = path_with_milestones(&[]);
        path.update(details("Rust"), true, None).unwrap();
        assert!(path.is_completed());

        path.update(details("Rust"), false, None).unwrap();
        assert!(!path.is_completed());
    }

    #[test]
    fn update_bumps_version_once() {
        let mut path = path_with_milestones(&[false]);
        path.update(details("Rust"), true, None).unwrap();
        assert_eq!(path.version(), Version::from_raw(2));
    }

    #[test]
    fn stale_expected_version_is_a_conflict_and_changes_nothing() {
        let mut path = path_with_milestones(&[false]);
        let before = path.clone();

        let err = path
            .update(details("Other"), true, Some(Version::from_raw(9)))
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
        assert_eq!(path, before);
    }

    #[test]
    fn invalid_update_changes_nothing() {
        let mut path = path_with_milestones(&[false]);
        let before = path.clone();
        assert!(path.update(details(""), true, None).is_err());
        assert_eq!(path, before);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Milestone toggles
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn path_completes_only_when_last_milestone_completes() {
        let mut path = path_with_milestones(&[false, false, false]);
        let ids: Vec<MilestoneId> = path.milestones().iter().map(|m| *m.id()).collect();

        let t1 = path.set_milestone_completion(&ids[0], true).unwrap();
        assert!(!t1.path_completed);
        let t2 = path.set_milestone_completion(&ids[1], true).unwrap();
        assert!(!t2.path_completed);
        let t3 = path.set_milestone_completion(&ids[2], true).unwrap();
        assert!(t3.path_completed);
        assert!(t3.path_completion_changed);
        assert!(path.is_completed());
    }

    #[test]
    fn unchecking_milestone_reopens_completed_path() {
        let mut path = path_with_milestones(&[true, true]);
        path.completed = true;
        let id = *path.milestones()[0].id();

        let toggle = path.set_milestone_completion(&id, false).unwrap();

        assert!(toggle.path_completion_changed);
        assert!(!path.is_completed());
        assert!(path.milestones()[1].is_completed());
    }

    #[test]
    fn toggling_unknown_milestone_is_not_found_and_changes_nothing() {
        let mut path = path_with_milestones(&[false]);
        let before = path.clone();

        let err = path
            .set_milestone_completion(&MilestoneId::new(), true)
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::MilestoneNotFound);
        assert_eq!(path, before);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn adding_milestone_does_not_reconcile() {
        let mut path = path_with_milestones(&[true]);
        path.completed = true;
        path.add_milestone("Another").unwrap();
        assert!(path.is_completed());
        assert_eq!(path.version(), Version::initial());
    }

    #[test]
    fn removing_unknown_link_is_not_found() {
        let mut path = path_with_milestones(&[]);
        let err = path.remove_resource_link(&ResourceLinkId::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceLinkNotFound);
    }

    #[test]
    fn add_and_remove_resource_link() {
        let mut path = path_with_milestones(&[]);
        let link = path
            .add_resource_link("Rustonomicon", "https://doc.rust-lang.org/nomicon/")
            .unwrap();
        assert_eq!(path.resource_links().len(), 1);

        let removed = path.remove_resource_link(link.id()).unwrap();
        assert_eq!(removed, link);
        assert!(path.resource_links().is_empty());
    }

    #[test]
    fn progress_follows_milestones_until_completed() {
        let mut path = path_with_milestones(&[true, false, false, false]);
        assert_eq!(path.progress_percent(), 25);
        path.update(details("Rust"), true, None).unwrap();
        assert_eq!(path.progress_percent(), 100);
    }

    proptest! {
        #[test]
        fn completing_forces_every_milestone(flags in prop::collection::vec(any::<bool>(), 1..16)) {
            let mut path = path_with_milestones(&flags);
            path.update(details("Rust"), true, None).unwrap();
            prop_assert!(path.milestones().iter().all(Milestone::is_completed));
        }

        #[test]
        fn reopening_clears_every_milestone(flags in prop::collection::vec(any::<bool>(), 1..16)) {
            let mut path = path_with_milestones(&flags);
            path.completed = true;
            path.update(details("Rust"), false, None).unwrap();
            prop_assert!(path.milestones().iter().all(|m| !m.is_completed()));
        }

        #[test]
        fn toggle_leaves_path_equal_to_and_of_milestones(
            flags in prop::collection::vec(any::<bool>(), 1..16),
            path_flag in any::<bool>(),
            index in any::<prop::sample::Index>(),
            target in any::<bool>(),
        ) {
            let mut path = path_with_milestones(&flags);
            path.completed = path_flag;
            let id = *path.milestones()[index.index(flags.len())].id();

            path.set_milestone_completion(&id, target).unwrap();

            let all = path.milestones().iter().all(Milestone::is_completed);
            prop_assert_eq!(path.is_completed(), all);
        }

        #[test]
        fn zero_milestone_update_only_touches_flag(current in any::<bool>(), requested in any::<bool>()) {
            let mut path = path_with_milestones(&[]);
            path.completed = current;
            let outcome = path.update(details("Rust"), requested, None).unwrap();
            prop_assert!(outcome.forced_milestones.is_empty());
            prop_assert_eq!(path.is_completed(), requested);
        }
    }
}
