//! Form domain layer
//!
//! Field value objects, credential validation, and the login form's
//! submission state machine.

mod field;
mod login_form;
mod validation;

pub use field::FormField;
pub use login_form::{
    Credentials, Form, LoginFocus, LoginForm, SocialPlatform, SubmissionState, SubmitOutcome,
};
