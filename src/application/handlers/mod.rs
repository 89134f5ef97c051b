//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod learning_path;

pub use learning_path::{
    // Commands
    AddMilestoneCommand, AddMilestoneHandler,
    AddResourceLinkCommand, AddResourceLinkHandler,
    CreatePathCommand, CreatePathHandler,
    DeleteMilestoneCommand, DeleteMilestoneHandler,
    DeletePathCommand, DeletePathHandler,
    DeleteResourceLinkCommand, DeleteResourceLinkHandler,
    UpdateMilestoneCommand, UpdateMilestoneHandler, UpdateMilestoneResult,
    UpdatePathCommand, UpdatePathHandler, UpdatePathResult,
    // Queries
    GetPathHandler, GetPathQuery,
    GetStatisticsHandler,
    ListPathsHandler, ListPathsQuery,
};
