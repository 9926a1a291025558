//! Login form state and submission lifecycle

use super::field::FormField;
use super::validation::{validate_credentials, ValidationError};
use crate::auth::AuthError;
use crate::state::Alert;
use std::fmt;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    /// The focused text field, if focus is on one
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
}

/// Lifecycle of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Failed,
    Succeeded,
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating",
            Self::Submitting => "Signing in",
            Self::Failed => "Failed",
            Self::Succeeded => "Signed in",
        }
    }
}

/// Focus ring of the login screen, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    MobileNumber,
    Password,
    PasswordToggle,
    RememberMe,
    LoginButton,
    Social(SocialPlatform),
}

impl LoginFocus {
    pub const ALL: [LoginFocus; 8] = [
        LoginFocus::MobileNumber,
        LoginFocus::Password,
        LoginFocus::PasswordToggle,
        LoginFocus::RememberMe,
        LoginFocus::LoginButton,
        LoginFocus::Social(SocialPlatform::Facebook),
        LoginFocus::Social(SocialPlatform::Apple),
        LoginFocus::Social(SocialPlatform::Google),
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Third-party login providers offered as placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    Facebook,
    Apple,
    Google,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 3] = [Self::Facebook, Self::Apple, Self::Google];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Apple => "Apple",
            Self::Google => "Google",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Credentials snapshot handed to the authenticator
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub mobile_number: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("mobile_number", &self.mobile_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a `submit` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight; nothing happened
    Ignored,
    /// Validation failed; the form is back to idle with a message set
    Rejected(ValidationError),
    /// Validation passed; the caller must authenticate these credentials
    Dispatched(Credentials),
}

/// Login screen form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub mobile_number: FormField,
    pub password: FormField,
    pub password_visible: bool,
    /// Tracked for display only; never persisted
    pub remember_me: bool,
    pub submission: SubmissionState,
    pub validation_message: Option<String>,
    pub active_field_index: usize,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            mobile_number: FormField::digits("mobile_number", "Mobile Number"),
            password: FormField::secret("password", "Password"),
            password_visible: false,
            remember_me: false,
            submission: SubmissionState::Idle,
            validation_message: None,
            active_field_index: 0,
        }
    }

    pub fn focus(&self) -> LoginFocus {
        LoginFocus::from_index(self.active_field_index)
    }

    pub fn set_focus(&mut self, focus: LoginFocus) {
        self.active_field_index = focus.index();
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    /// The login button is disabled while a submission is in flight
    pub fn is_submit_enabled(&self) -> bool {
        !self.is_submitting()
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::debug!("Login form: {:?} -> {:?}", self.submission, next);
        self.submission = next;
    }

    /// Return a finished attempt to idle. Called at the start of each interaction.
    pub fn acknowledge(&mut self) {
        if matches!(
            self.submission,
            SubmissionState::Failed | SubmissionState::Succeeded
        ) {
            self.transition(SubmissionState::Idle);
        }
    }

    /// Validate the fields and, if they pass, move to `Submitting`.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_submitting() {
            tracing::debug!("Login already in flight, ignoring submit");
            return SubmitOutcome::Ignored;
        }

        self.validation_message = None;
        self.transition(SubmissionState::Validating);

        let checked = validate_credentials(self.mobile_number.as_text(), self.password.as_text());
        if let Err(err) = checked {
            self.validation_message = Some(err.to_string());
            self.transition(SubmissionState::Idle);
            return SubmitOutcome::Rejected(err);
        }

        self.transition(SubmissionState::Submitting);
        SubmitOutcome::Dispatched(Credentials {
            mobile_number: self.mobile_number.as_text().to_string(),
            password: self.password.as_text().to_string(),
        })
    }

    /// Apply the authenticator's verdict. Returns the alert to show, if any.
    pub fn authentication_resolved(&mut self, outcome: Result<(), AuthError>) -> Option<Alert> {
        if !self.is_submitting() {
            tracing::warn!(
                "Authentication resolved while {:?}, ignoring",
                self.submission
            );
            return None;
        }

        match outcome {
            Ok(()) => {
                self.transition(SubmissionState::Succeeded);
                Some(Alert::login_successful())
            }
            Err(err) => {
                self.validation_message = Some(err.to_string());
                self.transition(SubmissionState::Failed);
                None
            }
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn toggle_remember_me(&mut self) {
        self.remember_me = !self.remember_me;
    }

    /// Placeholder for third-party login
    pub fn social_login(&self, platform: SocialPlatform) -> Alert {
        tracing::info!("{platform} login requested");
        Alert::social_login(platform)
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    fn field_count(&self) -> usize {
        LoginFocus::ALL.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(LoginFocus::ALL.len() - 1);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.focus() {
            LoginFocus::MobileNumber => Some(&mut self.mobile_number),
            LoginFocus::Password => Some(&mut self.password),
            _ => None,
        }
    }
}
