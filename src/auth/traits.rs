//! Trait abstraction for the authentication backend to enable mocking in tests

use super::AuthError;
use async_trait::async_trait;

/// Authentication backend contract.
///
/// Accepts a mobile number and password and, after some latency, resolves to
/// success or an [`AuthError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify the credentials
    async fn authenticate(&self, mobile_number: &str, password: &str) -> Result<(), AuthError>;
}
