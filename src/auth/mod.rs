//! Authentication collaborator
//!
//! The login form hands validated credentials to an [`Authenticator`]. The
//! only backend today is [`SimulatedAuthenticator`], which resolves after a
//! fixed delay.

mod error;
mod simulated;
mod traits;

pub use error::AuthError;
pub use simulated::SimulatedAuthenticator;
pub use traits::Authenticator;

#[cfg(test)]
pub use traits::MockAuthenticator;
