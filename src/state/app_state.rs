//! Application state definitions

use super::{Alert, LoginForm};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use uuid::Uuid;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
}

impl View {
    /// Display title shown in the header bar
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Login",
        }
    }
}

/// Identity of the authentication call currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginAttempt {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl LoginAttempt {
    pub fn start() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// State of the mounted login screen
    pub login: LoginForm,
    /// At most one outstanding authentication call
    pub in_flight: Option<LoginAttempt>,
    /// Alerts waiting to be shown, oldest first
    alerts: VecDeque<Alert>,
    pub status_message: Option<String>,
}

impl AppState {
    /// Mount a view with fresh state
    pub fn mount(&mut self, view: View) {
        tracing::debug!("Mounting {:?}", view);
        self.current_view = view;
        self.login = LoginForm::new();
        self.in_flight = None;
    }

    pub fn push_alert(&mut self, alert: Alert) {
        tracing::debug!("Alert queued: {}", alert.title);
        self.alerts.push_back(alert);
    }

    /// The alert currently on screen
    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SocialPlatform, SubmissionState};

    mod alerts {
        use super::*;

        #[test]
        fn test_no_alerts_by_default() {
            let state = AppState::default();
            assert!(!state.has_alerts());
            assert!(state.current_alert().is_none());
        }

        #[test]
        fn test_alerts_are_fifo() {
            let mut state = AppState::default();
            state.push_alert(Alert::social_login(SocialPlatform::Facebook));
            state.push_alert(Alert::login_successful());

            assert_eq!(state.current_alert().unwrap().title, "Facebook Login");
            state.dismiss_alert();
            assert_eq!(state.current_alert().unwrap().title, "Login Successful");
            state.dismiss_alert();
            assert!(!state.has_alerts());
        }

        #[test]
        fn test_dismiss_on_empty_is_noop() {
            let mut state = AppState::default();
            state.dismiss_alert(); // Should not panic
            assert!(!state.has_alerts());
        }
    }

    mod view {
        use super::*;

        #[test]
        fn test_default_view_is_login() {
            assert_eq!(View::default(), View::Login);
            assert_eq!(View::Login.title(), "Login");
        }

        #[test]
        fn test_mount_resets_form() {
            let mut state = AppState::default();
            state.login.mobile_number.push_str("9876543210");
            state.login.password.push_str("secret");
            state.login.toggle_remember_me();
            state.login.submit();
            state.in_flight = Some(LoginAttempt::start());

            state.mount(View::Login);

            assert_eq!(state.login.mobile_number.as_text(), "");
            assert!(!state.login.remember_me);
            assert_eq!(state.login.submission, SubmissionState::Idle);
            assert!(state.in_flight.is_none());
        }
    }

    #[test]
    fn test_login_attempts_have_distinct_ids() {
        assert_ne!(LoginAttempt::start().id, LoginAttempt::start().id);
    }
}
