//! Authentication failure taxonomy

use std::time::Duration;
use thiserror::Error;

/// Reasons an authentication call can fail.
///
/// The `Display` text is shown inline under the password field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // Only produced by network-backed authenticators
    #[allow(dead_code)]
    #[error("Invalid mobile number or password.")]
    AuthenticationRejected,
    #[allow(dead_code)]
    #[error("Network unavailable. Check your connection and try again.")]
    NetworkUnavailable,
    #[error("Login timed out after {}.", describe_timeout(.0))]
    TimedOut(Duration),
    #[error("Login cancelled.")]
    Cancelled,
}

/// Whole seconds when exact, milliseconds otherwise
fn describe_timeout(timeout: &Duration) -> String {
    match timeout.as_millis() {
        1000 => "1 second".to_string(),
        ms if ms % 1000 == 0 => format!("{} seconds", ms / 1000),
        ms => format!("{ms} ms"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_out_message_names_seconds() {
        let err = AuthError::TimedOut(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Login timed out after 10 seconds.");
    }

    #[test]
    fn test_cancelled_message() {
        assert_eq!(AuthError::Cancelled.to_string(), "Login cancelled.");
    }

    #[test]
    fn test_sub_second_timeout_message_names_milliseconds() {
        let err = AuthError::TimedOut(Duration::from_millis(500));
        assert_eq!(err.to_string(), "Login timed out after 500 ms.");

        let err = AuthError::TimedOut(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Login timed out after 1500 ms.");

        let err = AuthError::TimedOut(Duration::from_secs(1));
        assert_eq!(err.to_string(), "Login timed out after 1 second.");
    }
}
