//! Learning path command and query handlers.

mod add_milestone;
mod add_resource_link;
mod create_path;
mod delete_milestone;
mod delete_path;
mod delete_resource_link;
mod get_path;
mod get_statistics;
mod list_paths;
mod update_milestone;
mod update_path;

pub use add_milestone::{AddMilestoneCommand, AddMilestoneHandler};
pub use add_resource_link::{AddResourceLinkCommand, AddResourceLinkHandler};
pub use create_path::{CreatePathCommand, CreatePathHandler};
pub use delete_milestone::{DeleteMilestoneCommand, DeleteMilestoneHandler};
pub use delete_path::{DeletePathCommand, DeletePathHandler};
pub use delete_resource_link::{DeleteResourceLinkCommand, DeleteResourceLinkHandler};
pub use get_path::{GetPathHandler, GetPathQuery};
pub use get_statistics::GetStatisticsHandler;
pub use list_paths::{ListPathsHandler, ListPathsQuery};
pub use update_milestone::{UpdateMilestoneCommand, UpdateMilestoneHandler, UpdateMilestoneResult};
pub use update_path::{UpdatePathCommand, UpdatePathHandler, UpdatePathResult};
