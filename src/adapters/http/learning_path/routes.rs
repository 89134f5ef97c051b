//! Route configuration for learning path endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    add_milestone, add_resource_link, create_path, delete_milestone, delete_path,
    delete_resource_link, get_path, get_statistics, list_paths, update_milestone, update_path,
    LearningPathAppState,
};

/// Creates the learning path router, to be nested under `/api/learningpaths`.
///
/// Routes:
/// - `GET /` - List paths (`?status=&sort=&search=`)
/// - `POST /` - Create a path
/// - `GET /stats` - Dashboard statistics
/// - `GET /:id` - Get a path with milestones and links
/// - `PUT /:id` - Update a path
/// - `DELETE /:id` - Delete a path
/// - `POST /:id/milestones` - Add a milestone
/// - `PUT /:id/milestones/:milestone_id` - Toggle a milestone
/// - `DELETE /:id/milestones/:milestone_id` - Remove a milestone
/// - `POST /:id/resourcelinks` - Attach a resource link
/// - `DELETE /:id/resourcelinks/:link_id` - Detach a resource link
pub fn learning_path_router() -> Router<LearningPathAppState> {
    Router::new()
        .route("/", get(list_paths).post(create_path))
        .route("/stats", get(get_statistics))
        .route("/:id", get(get_path).put(update_path).delete(delete_path))
        .route("/:id/milestones", post(add_milestone))
        .route(
            "/:id/milestones/:milestone_id",
            put(update_milestone).delete(delete_milestone),
        )
        .route("/:id/resourcelinks", post(add_resource_link))
        .route(
            "/:id/resourcelinks/:link_id",
            axum::routing::delete(delete_resource_link),
        )
}
