//! HTTP DTOs (Data Transfer Objects) for learning path endpoints.
//!
//! JSON bodies use camelCase field names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::UpdateMilestoneResult;
use crate::domain::learning_path::{LearningPath, Milestone, ResourceLink};
use crate::ports::{ListOptions, PathProgress, PathStatistics, PathSummary, SortOrder, StatusFilter};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePathRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

/// Request to update a path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePathRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    pub is_completed: bool,
    /// Version the client last read. Omit to skip the check.
    #[serde(default)]
    pub version: Option<u32>,
}

/// Request to add a milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMilestoneRequest {
    pub title: String,
}

/// Request to toggle a milestone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMilestoneRequest {
    pub is_completed: bool,
}

/// Request to attach a resource link.
#[derive(Debug, Clone, Deserialize)]
pub struct AddResourceLinkRequest {
    pub title: String,
    pub url: String,
}

/// Query string for listing paths.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPathsParams {
    pub status: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

impl ListPathsParams {
    /// Parses the raw parameters. Unknown values are reported by name.
    pub fn into_options(self) -> Result<ListOptions, String> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => StatusFilter::All,
            Some("active") => StatusFilter::Active,
            Some("completed") => StatusFilter::Completed,
            Some(other) => return Err(format!("Unknown status filter: {}", other)),
        };
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") | Some("newest") => SortOrder::Newest,
            Some("oldest") => SortOrder::Oldest,
            Some("alphabetical") => SortOrder::Alphabetical,
            Some(other) => return Err(format!("Unknown sort order: {}", other)),
        };
        Ok(ListOptions {
            status,
            sort,
            search: self.search,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Full path with children.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// RFC 3339 creation time.
    pub created_at: String,
    pub target_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub version: u32,
    pub progress_percent: u8,
    pub milestones: Vec<MilestoneResponse>,
    pub resource_links: Vec<ResourceLinkResponse>,
}

impl From<&LearningPath> for PathResponse {
    fn from(path: &LearningPath) -> Self {
        Self {
            id: path.id().to_string(),
            title: path.title().to_string(),
            description: path.description().map(str::to_string),
            created_at: path.created_at().as_datetime().to_rfc3339(),
            target_date: path.target_date(),
            is_completed: path.is_completed(),
            version: path.version().as_u32(),
            progress_percent: path.progress_percent(),
            milestones: path.milestones().iter().map(MilestoneResponse::from).collect(),
            resource_links: path
                .resource_links()
                .iter()
                .map(ResourceLinkResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneResponse {
    pub id: String,
    pub learning_path_id: String,
    pub title: String,
    pub is_completed: bool,
}

impl From<&Milestone> for MilestoneResponse {
    fn from(milestone: &Milestone) -> Self {
        Self {
            id: milestone.id().to_string(),
            learning_path_id: milestone.path_id().to_string(),
            title: milestone.title().to_string(),
            is_completed: milestone.is_completed(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLinkResponse {
    pub id: String,
    pub learning_path_id: String,
    pub title: String,
    pub url: String,
}

impl From<&ResourceLink> for ResourceLinkResponse {
    fn from(link: &ResourceLink) -> Self {
        Self {
            id: link.id().to_string(),
            learning_path_id: link.path_id().to_string(),
            title: link.title().to_string(),
            url: link.url().to_string(),
        }
    }
}

/// Outcome of a milestone toggle, including the reconciled path flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneUpdateResponse {
    pub milestone: MilestoneResponse,
    pub path_completed: bool,
    pub path_completion_changed: bool,
    pub path_version: u32,
}

impl From<&UpdateMilestoneResult> for MilestoneUpdateResponse {
    fn from(result: &UpdateMilestoneResult) -> Self {
        Self {
            milestone: MilestoneResponse::from(&result.toggle.milestone),
            path_completed: result.toggle.path_completed,
            path_completion_changed: result.toggle.path_completion_changed,
            path_version: result.path_version.as_u32(),
        }
    }
}

/// Path row in a list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSummaryResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
    pub target_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub version: u32,
    pub milestone_count: u32,
    pub completed_milestone_count: u32,
    pub resource_link_count: u32,
    pub progress_percent: u8,
}

impl From<PathSummary> for PathSummaryResponse {
    fn from(summary: PathSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            description: summary.description,
            created_at: summary.created_at.as_datetime().to_rfc3339(),
            target_date: summary.target_date,
            is_completed: summary.completed,
            version: summary.version.as_u32(),
            milestone_count: summary.milestone_count,
            completed_milestone_count: summary.completed_milestone_count,
            resource_link_count: summary.resource_link_count,
            progress_percent: summary.progress_percent,
        }
    }
}

/// Dashboard statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total_paths: u64,
    pub completed_paths: u64,
    pub active_paths: u64,
    pub total_milestones: u64,
    pub completed_milestones: u64,
    pub active_progress: Vec<PathProgressResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathProgressResponse {
    pub id: String,
    pub title: String,
    pub progress_percent: u8,
}

impl From<PathProgress> for PathProgressResponse {
    fn from(progress: PathProgress) -> Self {
        Self {
            id: progress.id.to_string(),
            title: progress.title,
            progress_percent: progress.progress_percent,
        }
    }
}

impl From<PathStatistics> for StatisticsResponse {
    fn from(stats: PathStatistics) -> Self {
        Self {
            total_paths: stats.total_paths,
            completed_paths: stats.completed_paths,
            active_paths: stats.active_paths,
            total_milestones: stats.total_milestones,
            completed_milestones: stats.completed_milestones,
            active_progress: stats
                .active_progress
                .into_iter()
                .map(PathProgressResponse::from)
                .collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PathId;
    use crate::domain::learning_path::PathDetails;

    #[test]
    fn path_response_uses_camel_case() {
        let mut path = LearningPath::new(
            PathId::new(),
            PathDetails {
                title: "Rust".to_string(),
                description: None,
                target_date: NaiveDate::from_ymd_opt(2026, 12, 31),
            },
        )
        .unwrap();
        path.add_milestone("Ownership").unwrap();

        let json = serde_json::to_value(PathResponse::from(&path)).unwrap();

        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["targetDate"], "2026-12-31");
        assert_eq!(json["version"], 1);
        assert_eq!(json["milestones"][0]["learningPathId"], path.id().to_string());
        assert!(json.get("resourceLinks").is_some());
    }

    #[test]
    fn update_path_request_deserializes_without_version() {
        let json = r#"{"title": "Rust", "isCompleted": true}"#;
        let req: UpdatePathRequest = serde_json::from_str(json).unwrap();
        assert!(req.is_completed);
        assert_eq!(req.version, None);
        assert_eq!(req.description, None);
    }

    #[test]
    fn create_path_request_parses_target_date() {
        let json = r#"{"title": "Rust", "targetDate": "2026-06-01"}"#;
        let req: CreatePathRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.target_date, NaiveDate::from_ymd_opt(2026, 6, 1));
    }

    #[test]
    fn list_params_default_to_all_newest() {
        let options = ListPathsParams::default().into_options().unwrap();
        assert_eq!(options.status, StatusFilter::All);
        assert_eq!(options.sort, SortOrder::Newest);
    }

    #[test]
    fn list_params_reject_unknown_values() {
        let params = ListPathsParams {
            sort: Some("random".to_string()),
            ..Default::default()
        };
        assert!(params.into_options().is_err());
    }

    #[test]
    fn error_response_codes() {
        assert_eq!(ErrorResponse::bad_request("x").code, "BAD_REQUEST");
        assert_eq!(ErrorResponse::not_found("x").code, "NOT_FOUND");
        assert_eq!(ErrorResponse::conflict("x").code, "CONFLICT");
        assert_eq!(ErrorResponse::internal("x").code, "INTERNAL_ERROR");
    }
}
