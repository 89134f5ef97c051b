//! Health check port.
//!
//! Lets the HTTP layer check the backing store without knowing which one
//! is configured.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Reports whether the backing store can serve requests.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Short name of the store, shown in the health response.
    fn store_name(&self) -> &'static str;

    /// Ping the store.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the store is unreachable
    async fn check(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_check_is_object_safe() {
        fn _accepts_dyn(_check: &dyn HealthCheck) {}
    }
}
