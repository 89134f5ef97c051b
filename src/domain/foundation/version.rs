//! Optimistic concurrency version for aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version counter stored alongside an aggregate row.
///
/// Versions only increase. A write succeeds only if the stored version still
/// equals the version the writer loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u32);

impl Version {
    /// Creates the initial version (1).
    pub fn initial() -> Self {
        Self(1)
    }

    /// Creates a version from a raw value.
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw version number.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns the next version.
    pub fn increment(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the version a writer must have loaded to produce this one.
    pub fn previous(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_version_is_one() {
        assert_eq!(Version::initial().as_u32(), 1);
        assert_eq!(Version::default(), Version::initial());
    }

    #[test]
    fn increment_and_previous_are_inverse() {
        let v = Version::from_raw(7);
        assert_eq!(v.increment().previous(), v);
        assert!(v.increment() > v);
    }

    #[test]
    fn displays_with_prefix() {
        assert_eq!(Version::from_raw(3).to_string(), "v3");
    }
}
