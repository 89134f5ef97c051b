//! Learning path module - paths, milestones, resource links and the
//! completion reconciliation rule.

mod aggregate;
mod errors;
mod milestone;
mod reconciliation;
mod resource_link;

pub use aggregate::{
    LearningPath, MilestoneToggle, PathDetails, PathUpdate, MAX_DESCRIPTION_LENGTH,
    MAX_TITLE_LENGTH,
};
pub use errors::LearningPathError;
pub use milestone::{Milestone, MAX_MILESTONE_TITLE_LENGTH};
pub use reconciliation::{derive_path_completion, progress_percent, CompletionTransition};
pub use resource_link::{ResourceLink, MAX_LINK_TITLE_LENGTH, MAX_URL_LENGTH};
