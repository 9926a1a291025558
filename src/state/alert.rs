//! Modal notifications

use super::forms::SocialPlatform;

/// A titled message shown modally until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn login_successful() -> Self {
        Self::new("Login Successful", "Welcome back!")
    }

    pub fn social_login(platform: SocialPlatform) -> Self {
        Self::new(
            format!("{platform} Login"),
            "Social login functionality coming soon!",
        )
    }
}
