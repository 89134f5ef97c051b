//! Completion reconciliation between a learning path and its milestones.
//!
//! Two triggers keep `path.completed` and the milestone flags consistent:
//!
//! - An explicit path-level completion change forces every milestone to the
//!   new path state.
//! - A milestone toggle recomputes the path flag as the logical AND of all
//!   milestone flags.
//!
//! A path without milestones has no derived state: its flag is whatever the
//! user last set.

/// Direction of a requested path-level completion change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTransition {
    /// false -> true
    Completed,
    /// true -> false
    Reopened,
    /// Requested flag equals the current flag.
    Unchanged,
}

impl CompletionTransition {
    /// Classifies a requested change of the path flag.
    pub fn between(current: bool, requested: bool) -> Self {
        match (current, requested) {
            (false, true) => CompletionTransition::Completed,
            (true, false) => CompletionTransition::Reopened,
            _ => CompletionTransition::Unchanged,
        }
    }

    /// The flag every milestone must take after this transition, if any.
    pub fn forced_milestone_state(self) -> Option<bool> {
        match self {
            CompletionTransition::Completed => Some(true),
            CompletionTransition::Reopened => Some(false),
            CompletionTransition::Unchanged => None,
        }
    }
}

/// Derives the path flag from its milestone flags.
///
/// Returns `None` for an empty milestone set, which leaves the path flag
/// user-controlled.
pub fn derive_path_completion<I>(milestone_flags: I) -> Option<bool>
where
    I: IntoIterator<Item = bool>,
{
    let mut any = false;
    let mut all = true;
    for completed in milestone_flags {
        any = true;
        all &= completed;
    }
    any.then_some(all)
}

/// Progress shown for a path, in whole percent.
///
/// A completed path always reports 100. A path with no milestones reports 0.
pub fn progress_percent(path_completed: bool, completed_milestones: usize, total: usize) -> u8 {
    if path_completed {
        return 100;
    }
    if total == 0 {
        return 0;
    }
    let pct = (completed_milestones as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}
