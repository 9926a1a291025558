//! Client-side credential validation

use thiserror::Error;

/// Exact number of characters a mobile number must have
pub const MOBILE_NUMBER_LENGTH: usize = 10;

/// Validation failures, surfaced inline on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a valid 10-digit mobile number.")]
    InvalidMobileNumber,
    #[error("Password cannot be empty.")]
    EmptyPassword,
}

/// Check the rules in order: mobile number first, then password.
pub fn validate_credentials(mobile_number: &str, password: &str) -> Result<(), ValidationError> {
    if mobile_number.chars().count() != MOBILE_NUMBER_LENGTH {
        return Err(ValidationError::InvalidMobileNumber);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(())
}
