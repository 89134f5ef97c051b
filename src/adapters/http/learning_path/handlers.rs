//! HTTP handlers for learning path endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    AddMilestoneCommand, AddMilestoneHandler, AddResourceLinkCommand, AddResourceLinkHandler,
    CreatePathCommand, CreatePathHandler, DeleteMilestoneCommand, DeleteMilestoneHandler,
    DeletePathCommand, DeletePathHandler, DeleteResourceLinkCommand, DeleteResourceLinkHandler,
    GetPathHandler, GetPathQuery, GetStatisticsHandler, ListPathsHandler, ListPathsQuery,
    UpdateMilestoneCommand, UpdateMilestoneHandler, UpdatePathCommand, UpdatePathHandler,
};
use crate::domain::foundation::{MilestoneId, PathId, ResourceLinkId, Version};
use crate::domain::learning_path::LearningPathError;
use crate::ports::{LearningPathReader, LearningPathRepository};

use super::dto::{
    AddMilestoneRequest, AddResourceLinkRequest, CreatePathRequest, ErrorResponse,
    ListPathsParams, MilestoneResponse, MilestoneUpdateResponse, PathResponse,
    PathSummaryResponse, ResourceLinkResponse, StatisticsResponse, UpdateMilestoneRequest,
    UpdatePathRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct LearningPathAppState {
    pub repository: Arc<dyn LearningPathRepository>,
    pub reader: Arc<dyn LearningPathReader>,
}

impl LearningPathAppState {
    pub fn new(
        repository: Arc<dyn LearningPathRepository>,
        reader: Arc<dyn LearningPathReader>,
    ) -> Self {
        Self { repository, reader }
    }

    pub fn create_path_handler(&self) -> CreatePathHandler {
        CreatePathHandler::new(self.repository.clone())
    }

    pub fn get_path_handler(&self) -> GetPathHandler {
        GetPathHandler::new(self.repository.clone())
    }

    pub fn list_paths_handler(&self) -> ListPathsHandler {
        ListPathsHandler::new(self.reader.clone())
    }

    pub fn statistics_handler(&self) -> GetStatisticsHandler {
        GetStatisticsHandler::new(self.reader.clone())
    }

    pub fn update_path_handler(&self) -> UpdatePathHandler {
        UpdatePathHandler::new(self.repository.clone())
    }

    pub fn delete_path_handler(&self) -> DeletePathHandler {
        DeletePathHandler::new(self.repository.clone())
    }

    pub fn add_milestone_handler(&self) -> AddMilestoneHandler {
        AddMilestoneHandler::new(self.repository.clone())
    }

    pub fn update_milestone_handler(&self) -> UpdateMilestoneHandler {
        UpdateMilestoneHandler::new(self.repository.clone())
    }

    pub fn delete_milestone_handler(&self) -> DeleteMilestoneHandler {
        DeleteMilestoneHandler::new(self.repository.clone())
    }

    pub fn add_resource_link_handler(&self) -> AddResourceLinkHandler {
        AddResourceLinkHandler::new(self.repository.clone())
    }

    pub fn delete_resource_link_handler(&self) -> DeleteResourceLinkHandler {
        DeleteResourceLinkHandler::new(self.repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/learningpaths - List paths
pub async fn list_paths(
    State(state): State<LearningPathAppState>,
    params: Result<Query<ListPathsParams>, QueryRejection>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let Query(params) = params.map_err(|e| LearningPathApiError::BadRequest(e.body_text()))?;
    let options = params.into_options().map_err(LearningPathApiError::BadRequest)?;

    let summaries = state
        .list_paths_handler()
        .handle(ListPathsQuery { options })
        .await?;

    let response: Vec<PathSummaryResponse> =
        summaries.into_iter().map(PathSummaryResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/learningpaths/stats - Dashboard statistics
pub async fn get_statistics(
    State(state): State<LearningPathAppState>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let stats = state.statistics_handler().handle().await?;
    Ok(Json(StatisticsResponse::from(stats)))
}

/// GET /api/learningpaths/:id - Get a path with milestones and links
pub async fn get_path(
    State(state): State<LearningPathAppState>,
    Path(path_id): Path<String>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let path_id = parse_path_id(&path_id)?;

    let path = state
        .get_path_handler()
        .handle(GetPathQuery { path_id })
        .await?;

    Ok(Json(PathResponse::from(&path)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT/DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/learningpaths - Create a path
pub async fn create_path(
    State(state): State<LearningPathAppState>,
    payload: Result<Json<CreatePathRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let Json(request) = payload?;

    let path = state
        .create_path_handler()
        .handle(CreatePathCommand {
            title: request.title,
            description: request.description,
            target_date: request.target_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PathResponse::from(&path))))
}

/// PUT /api/learningpaths/:id - Update a path, reconciling milestones
pub async fn update_path(
    State(state): State<LearningPathAppState>,
    Path(path_id): Path<String>,
    payload: Result<Json<UpdatePathRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let path_id = parse_path_id(&path_id)?;
    let Json(request) = payload?;

    let result = state
        .update_path_handler()
        .handle(UpdatePathCommand {
            path_id,
            title: request.title,
            description: request.description,
            target_date: request.target_date,
            completed: request.is_completed,
            expected_version: request.version.map(Version::from_raw),
        })
        .await?;

    Ok(Json(PathResponse::from(&result.path)))
}

/// DELETE /api/learningpaths/:id - Delete a path and its children
pub async fn delete_path(
    State(state): State<LearningPathAppState>,
    Path(path_id): Path<String>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let path_id = parse_path_id(&path_id)?;

    state
        .delete_path_handler()
        .handle(DeletePathCommand { path_id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/learningpaths/:id/milestones - Add a milestone
pub async fn add_milestone(
    State(state): State<LearningPathAppState>,
    Path(path_id): Path<String>,
    payload: Result<Json<AddMilestoneRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let path_id = parse_path_id(&path_id)?;
    let Json(request) = payload?;

    let milestone = state
        .add_milestone_handler()
        .handle(AddMilestoneCommand {
            path_id,
            title: request.title,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MilestoneResponse::from(&milestone))))
}

/// PUT /api/learningpaths/:id/milestones/:milestone_id - Toggle a milestone
pub async fn update_milestone(
    State(state): State<LearningPathAppState>,
    Path((path_id, milestone_id)): Path<(String, String)>,
    payload: Result<Json<UpdateMilestoneRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let path_id = parse_path_id(&path_id)?;
    let milestone_id = parse_milestone_id(&milestone_id)?;
    let Json(request) = payload?;

    let result = state
        .update_milestone_handler()
        .handle(UpdateMilestoneCommand {
            path_id,
            milestone_id,
            completed: request.is_completed,
        })
        .await?;

    Ok(Json(MilestoneUpdateResponse::from(&result)))
}

/// DELETE /api/learningpaths/:id/milestones/:milestone_id - Remove a milestone
pub async fn delete_milestone(
    State(state): State<LearningPathAppState>,
    Path((path_id, milestone_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let path_id = parse_path_id(&path_id)?;
    let milestone_id = parse_milestone_id(&milestone_id)?;

    state
        .delete_milestone_handler()
        .handle(DeleteMilestoneCommand {
            path_id,
            milestone_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/learningpaths/:id/resourcelinks - Attach a resource link
pub async fn add_resource_link(
    State(state): State<LearningPathAppState>,
    Path(path_id): Path<String>,
    payload: Result<Json<AddResourceLinkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let path_id = parse_path_id(&path_id)?;
    let Json(request) = payload?;

    let link = state
        .add_resource_link_handler()
        .handle(AddResourceLinkCommand {
            path_id,
            title: request.title,
            url: request.url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ResourceLinkResponse::from(&link))))
}

/// DELETE /api/learningpaths/:id/resourcelinks/:link_id - Detach a resource link
pub async fn delete_resource_link(
    State(state): State<LearningPathAppState>,
    Path((path_id, link_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, LearningPathApiError> {
    let path_id = parse_path_id(&path_id)?;
    let link_id: ResourceLinkId = link_id
        .parse()
        .map_err(|_| LearningPathApiError::BadRequest("Invalid resource link ID format".to_string()))?;

    state
        .delete_resource_link_handler()
        .handle(DeleteResourceLinkCommand { path_id, link_id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_path_id(raw: &str) -> Result<PathId, LearningPathApiError> {
    raw.parse()
        .map_err(|_| LearningPathApiError::BadRequest("Invalid learning path ID format".to_string()))
}

fn parse_milestone_id(raw: &str) -> Result<MilestoneId, LearningPathApiError> {
    raw.parse()
        .map_err(|_| LearningPathApiError::BadRequest("Invalid milestone ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum LearningPathApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<LearningPathError> for LearningPathApiError {
    fn from(err: LearningPathError) -> Self {
        match err {
            LearningPathError::ValidationFailed { .. } => {
                LearningPathApiError::BadRequest(err.to_string())
            }
            LearningPathError::NotFound(_)
            | LearningPathError::MilestoneNotFound { .. }
            | LearningPathError::ResourceLinkNotFound { .. } => {
                LearningPathApiError::NotFound(err.to_string())
            }
            LearningPathError::Conflict(msg) => LearningPathApiError::Conflict(msg),
            LearningPathError::Infrastructure(msg) => LearningPathApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for LearningPathApiError {
    fn from(rejection: JsonRejection) -> Self {
        LearningPathApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for LearningPathApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            LearningPathApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            LearningPathApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found(msg))
            }
            LearningPathApiError::Conflict(msg) => {
                tracing::warn!(%msg, "rejected stale learning path write");
                (StatusCode::CONFLICT, ErrorResponse::conflict(msg))
            }
            LearningPathApiError::Internal(msg) => {
                tracing::error!(%msg, "learning path request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
