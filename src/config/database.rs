//! Database configuration
//!
//! An empty `url` selects the in-memory store; everything else here only
//! matters once a PostgreSQL URL is set.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Largest pool a single SkillFlow instance may open.
const MAX_POOL_SIZE: u32 = 100;

/// PostgreSQL settings for the learning path store
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; empty means in-memory
    #[serde(default)]
    pub url: String,

    /// Upper bound on pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Seconds to wait for a free connection before a request fails
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Apply `migrations/` before serving
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Whether learning paths live in PostgreSQL
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate database configuration
    ///
    /// Skipped entirely for the in-memory store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_configured() {
            return Ok(());
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        match self.pool_size {
            0 => Err(ValidationError::InvalidPoolSize),
            n if n > MAX_POOL_SIZE => Err(ValidationError::PoolSizeTooLarge),
            _ => Ok(()),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_size: default_pool_size(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

fn default_pool_size() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres(pool_size: u32) -> DatabaseConfig {
        DatabaseConfig {
            url: "postgresql://skillflow@localhost:5432/skillflow".to_string(),
            pool_size,
            ..Default::default()
        }
    }

    #[test]
    fn defaults_select_in_memory_store() {
        let config = DatabaseConfig::default();
        assert!(!config.is_configured());
        assert!(!config.run_migrations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_url_is_not_configured() {
        let config = DatabaseConfig {
            url: "   ".to_string(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn non_postgres_url_is_rejected() {
        let config = DatabaseConfig {
            url: "mysql://localhost/skillflow".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }

    #[test]
    fn pool_size_must_be_within_bounds() {
        assert_eq!(postgres(0).validate(), Err(ValidationError::InvalidPoolSize));
        assert_eq!(postgres(101).validate(), Err(ValidationError::PoolSizeTooLarge));
        assert!(postgres(10).validate().is_ok());
    }

    #[test]
    fn acquire_timeout_is_in_seconds() {
        let config = DatabaseConfig {
            acquire_timeout_secs: 2,
            ..Default::default()
        };
        assert_eq!(config.acquire_timeout(), Duration::from_secs(2));
    }
}
