//! Application state and core logic

use crate::auth::{AuthError, Authenticator, SimulatedAuthenticator};
use crate::config::TuiConfig;
use crate::platform::PASTE_MODIFIER;
use crate::state::{
    AppState, Credentials, Form, LoginAttempt, LoginFocus, SubmissionState, SubmitOutcome, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Modifiers that turn a character key into a shortcut rather than input
const SHORTCUT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER);

/// Verdict of one authentication call, tagged with the attempt it belongs to
#[derive(Debug)]
pub struct AuthResult {
    pub attempt_id: Uuid,
    pub outcome: Result<(), AuthError>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Authentication backend
    authenticator: Arc<dyn Authenticator>,
    /// Upper bound on one authentication call
    auth_timeout: Duration,
    auth_tx: mpsc::UnboundedSender<AuthResult>,
    auth_rx: mpsc::UnboundedReceiver<AuthResult>,
    /// Task running the in-flight authentication call
    auth_task: Option<JoinHandle<()>>,
    /// Frame counter driving the progress indicator
    pub tick: u64,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance with the simulated authenticator
    pub fn new(config: &TuiConfig) -> Self {
        let authenticator = Arc::new(SimulatedAuthenticator::new(config.auth_delay()));
        Self::with_authenticator(authenticator, config.auth_timeout())
    }

    pub fn with_authenticator(
        authenticator: Arc<dyn Authenticator>,
        auth_timeout: Duration,
    ) -> Self {
        let (auth_tx, auth_rx) = mpsc::unbounded_channel();
        let mut state = AppState::default();
        state.mount(View::Login);

        Self {
            state,
            authenticator,
            auth_timeout,
            auth_tx,
            auth_rx,
            auth_task: None,
            tick: 0,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.cancel_login();
        self.quit = true;
    }

    /// Advance animation state once per frame
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Alerts are modal: keys only dismiss them
        if self.state.has_alerts() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_alert();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Login => self.handle_login_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        // Esc cancels an in-flight login
        if key.code == KeyCode::Esc {
            if self.state.login.is_submitting() {
                self.cancel_login();
            } else {
                self.acknowledge_attempt();
            }
            return Ok(());
        }

        let focus = self.state.login.focus();
        let presses_social = matches!(focus, LoginFocus::Social(_))
            && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
        // Social buttons leave the submission state untouched
        if !presses_social {
            self.acknowledge_attempt();
        }

        if key.code == KeyCode::Char('v') && key.modifiers.contains(PASTE_MODIFIER) {
            self.paste_into_active_field();
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.login.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.login.prev_field(),
            KeyCode::Enter => match focus {
                LoginFocus::MobileNumber => self.state.login.set_focus(LoginFocus::Password),
                LoginFocus::Password => self.submit_login(),
                _ => self.activate(focus),
            },
            KeyCode::Char(' ')
                if !matches!(focus, LoginFocus::MobileNumber | LoginFocus::Password) =>
            {
                self.activate(focus)
            }
            KeyCode::Char(c) if !key.modifiers.intersects(SHORTCUT_MODIFIERS) => {
                if let Some(field) = self.state.login.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.login.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Return a finished attempt to idle, dropping its status line
    fn acknowledge_attempt(&mut self) {
        if self.state.login.submission == SubmissionState::Succeeded {
            self.state.status_message = None;
        }
        self.state.login.acknowledge();
    }

    /// Press the focused button
    fn activate(&mut self, focus: LoginFocus) {
        match focus {
            LoginFocus::PasswordToggle => self.state.login.toggle_password_visibility(),
            LoginFocus::RememberMe => self.state.login.toggle_remember_me(),
            LoginFocus::LoginButton => self.submit_login(),
            LoginFocus::Social(platform) => {
                let alert = self.state.login.social_login(platform);
                self.state.push_alert(alert);
            }
            LoginFocus::MobileNumber | LoginFocus::Password => {}
        }
    }

    /// Validate the form and start authentication if it passes
    pub fn submit_login(&mut self) {
        match self.state.login.submit() {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Rejected(err) => {
                tracing::debug!("Login rejected by validation: {err:?}");
                self.state.status_message = None;
            }
            SubmitOutcome::Dispatched(credentials) => self.dispatch_login(credentials),
        }
    }

    fn dispatch_login(&mut self, credentials: Credentials) {
        let attempt = LoginAttempt::start();
        tracing::info!("Starting login attempt {}", attempt.id);

        let authenticator = Arc::clone(&self.authenticator);
        let tx = self.auth_tx.clone();
        let timeout = self.auth_timeout;
        let attempt_id = attempt.id;

        let handle = tokio::spawn(async move {
            let call =
                authenticator.authenticate(&credentials.mobile_number, &credentials.password);
            let outcome = match tokio::time::timeout(timeout, call).await {
                Ok(outcome) => outcome,
                Err(_) => Err(AuthError::TimedOut(timeout)),
            };
            // Receiver only goes away on shutdown
            let _ = tx.send(AuthResult {
                attempt_id,
                outcome,
            });
        });

        self.state.in_flight = Some(attempt);
        self.state.status_message = Some(format!(
            "Signing in (started {})",
            attempt.started_at.format("%H:%M:%S")
        ));
        self.auth_task = Some(handle);
    }

    /// Abort the in-flight authentication call, if any
    pub fn cancel_login(&mut self) {
        if let Some(handle) = self.auth_task.take() {
            handle.abort();
        }
        if let Some(attempt) = self.state.in_flight {
            tracing::info!("Login attempt {} cancelled", attempt.id);
            self.apply_auth_result(AuthResult {
                attempt_id: attempt.id,
                outcome: Err(AuthError::Cancelled),
            });
        }
    }

    /// Apply every authentication result that has arrived
    pub fn drain_auth_results(&mut self) {
        while let Ok(result) = self.auth_rx.try_recv() {
            self.apply_auth_result(result);
        }
    }

    /// Wait for the next authentication result
    #[cfg(test)]
    pub async fn next_auth_result(&mut self) -> Option<AuthResult> {
        self.auth_rx.recv().await
    }

    pub fn apply_auth_result(&mut self, result: AuthResult) {
        let is_current = self
            .state
            .in_flight
            .is_some_and(|attempt| attempt.id == result.attempt_id);
        if !is_current {
            tracing::debug!("Discarding result of stale attempt {}", result.attempt_id);
            return;
        }

        self.state.in_flight = None;
        self.auth_task = None;

        match &result.outcome {
            Ok(()) => {
                tracing::info!("Login attempt {} succeeded", result.attempt_id);
                self.state.status_message = Some("Signed in".to_string());
            }
            Err(err) => {
                tracing::warn!("Login attempt {} failed: {err}", result.attempt_id);
                self.state.status_message = None;
            }
        }

        if let Some(alert) = self.state.login.authentication_resolved(result.outcome) {
            self.state.push_alert(alert);
        }
    }

    fn paste_into_active_field(&mut self) {
        let Some(field) = self.state.login.get_active_field_mut() else {
            return;
        };
        match read_clipboard() {
            Ok(text) => {
                let kept = field.paste(&text);
                tracing::debug!("Pasted {kept} characters into {}", field.name);
            }
            Err(err) => {
                tracing::warn!("Clipboard unavailable: {err}");
                self.state.status_message = Some("Clipboard unavailable".to_string());
            }
        }
    }
}

fn read_clipboard() -> Result<String> {
    let mut clipboard = arboard::Clipboard::new()?;
    Ok(clipboard.get_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockAuthenticator;
    use crate::state::SocialPlatform;
    use async_trait::async_trait;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn succeeding_authenticator(times: usize) -> Arc<dyn Authenticator> {
        let mut mock = MockAuthenticator::new();
        mock.expect_authenticate()
            .times(times)
            .returning(|_, _| Ok(()));
        Arc::new(mock)
    }

    /// Never resolves, so only timeout or cancellation can end the call
    struct StalledAuthenticator;

    #[async_trait]
    impl Authenticator for StalledAuthenticator {
        async fn authenticate(&self, _: &str, _: &str) -> Result<(), AuthError> {
            std::future::pending().await
        }
    }

    fn fill_valid(app: &mut App) {
        type_str(app, "9876543210");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_str(app, "secret");
    }

    mod keyboard {
        use super::*;

        #[tokio::test]
        async fn test_modified_characters_are_not_typed() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(0),
                Duration::from_secs(1),
            );
            app.handle_key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::ALT))
                .unwrap();
            assert_eq!(app.state.login.mobile_number.as_text(), "");
        }

        #[tokio::test]
        async fn test_typing_fills_focused_field() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(0),
                Duration::from_secs(1),
            );
            type_str(&mut app, "98a76");
            assert_eq!(app.state.login.mobile_number.as_text(), "9876");

            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.state.login.mobile_number.as_text(), "987");

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.login.focus(), LoginFocus::Password);
            type_str(&mut app, "p w");
            assert_eq!(app.state.login.password.as_text(), "p w");
        }

        #[tokio::test]
        async fn test_space_toggles_focused_buttons() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(0),
                Duration::from_secs(1),
            );
            app.state.login.set_focus(LoginFocus::PasswordToggle);
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            assert!(app.state.login.password_visible);

            app.handle_key(key(KeyCode::Down)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.state.login.remember_me);
        }

        #[tokio::test]
        async fn test_invalid_submit_sets_message() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(0),
                Duration::from_secs(1),
            );
            type_str(&mut app, "12345");
            app.state.login.set_focus(LoginFocus::LoginButton);
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.state.login.submission, SubmissionState::Idle);
            assert_eq!(
                app.state.login.validation_message.as_deref(),
                Some("Enter a valid 10-digit mobile number.")
            );
            assert!(app.state.in_flight.is_none());
        }

        #[tokio::test]
        async fn test_social_button_shows_alert_and_keys_are_modal() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(0),
                Duration::from_secs(1),
            );
            app.state
                .login
                .set_focus(LoginFocus::Social(SocialPlatform::Google));
            app.handle_key(key(KeyCode::Enter)).unwrap();

            let alert = app.state.current_alert().unwrap();
            assert!(alert.title.contains("Google"));
            assert_eq!(app.state.login.submission, SubmissionState::Idle);

            // Typing while the alert is up does nothing
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(
                app.state.login.focus(),
                LoginFocus::Social(SocialPlatform::Google)
            );

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(!app.state.has_alerts());
        }
    }

    mod submission {
        use super::*;

        async fn failed_app() -> App {
            let mut mock = MockAuthenticator::new();
            mock.expect_authenticate()
                .times(1)
                .returning(|_, _| Err(AuthError::NetworkUnavailable));
            let mut app = App::with_authenticator(Arc::new(mock), Duration::from_secs(5));
            fill_valid(&mut app);
            app.submit_login();
            let result = app.next_auth_result().await.unwrap();
            app.apply_auth_result(result);
            app
        }

        #[tokio::test]
        async fn test_social_button_keeps_failed_state() {
            let mut app = failed_app().await;
            assert_eq!(app.state.login.submission, SubmissionState::Failed);

            app.state
                .login
                .set_focus(LoginFocus::Social(SocialPlatform::Apple));
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.state.current_alert().unwrap().title, "Apple Login");
            assert_eq!(app.state.login.submission, SubmissionState::Failed);

            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            assert_eq!(app.state.login.submission, SubmissionState::Failed);
            assert!(app.state.has_alerts());
        }

        #[tokio::test]
        async fn test_escape_acknowledges_failed_attempt() {
            let mut app = failed_app().await;
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.login.submission, SubmissionState::Idle);
        }

        #[tokio::test]
        async fn test_signed_in_status_cleared_on_next_interaction() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(1),
                Duration::from_secs(5),
            );
            fill_valid(&mut app);
            app.submit_login();
            let result = app.next_auth_result().await.unwrap();
            app.apply_auth_result(result);
            assert_eq!(app.state.status_message.as_deref(), Some("Signed in"));

            // Dismissing the alert is not an interaction with the form
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.login.submission, SubmissionState::Succeeded);

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.login.submission, SubmissionState::Idle);
            assert!(app.state.status_message.is_none());
        }

        #[tokio::test]
        async fn test_validation_failure_clears_status() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(0),
                Duration::from_secs(5),
            );
            app.state.status_message = Some("Signed in".to_string());
            app.submit_login();

            assert!(app.state.status_message.is_none());
            assert_eq!(
                app.state.login.validation_message.as_deref(),
                Some("Enter a valid 10-digit mobile number.")
            );
        }

        #[tokio::test]
        async fn test_successful_login_flow() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(1),
                Duration::from_secs(5),
            );
            fill_valid(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.state.login.submission, SubmissionState::Submitting);
            assert!(!app.state.login.is_submit_enabled());
            assert!(app.state.in_flight.is_some());

            let result = app.next_auth_result().await.unwrap();
            app.apply_auth_result(result);

            assert_eq!(app.state.login.submission, SubmissionState::Succeeded);
            assert!(app.state.in_flight.is_none());
            assert_eq!(app.state.current_alert().unwrap().title, "Login Successful");
        }

        #[tokio::test]
        async fn test_simulated_backend_resolves_after_delay() {
            let config = TuiConfig {
                auth_delay_ms: Some(10),
                auth_timeout_ms: Some(5000),
            };
            let mut app = App::new(&config);
            fill_valid(&mut app);
            app.submit_login();

            let result = app.next_auth_result().await.unwrap();
            assert!(result.outcome.is_ok());
            app.apply_auth_result(result);
            assert_eq!(app.state.login.submission, SubmissionState::Succeeded);
        }

        #[tokio::test]
        async fn test_second_submit_while_in_flight_calls_backend_once() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(1),
                Duration::from_secs(5),
            );
            fill_valid(&mut app);
            app.submit_login();
            let first_attempt = app.state.in_flight.unwrap();

            app.submit_login();
            app.state.login.set_focus(LoginFocus::LoginButton);
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.state.in_flight.unwrap(), first_attempt);
            assert_eq!(app.state.login.submission, SubmissionState::Submitting);

            let result = app.next_auth_result().await.unwrap();
            app.apply_auth_result(result);
            assert_eq!(app.state.login.submission, SubmissionState::Succeeded);
        }

        #[tokio::test]
        async fn test_rejected_credentials_fail_inline() {
            let mut mock = MockAuthenticator::new();
            mock.expect_authenticate()
                .times(1)
                .returning(|_, _| Err(AuthError::AuthenticationRejected));
            let mut app = App::with_authenticator(Arc::new(mock), Duration::from_secs(5));
            fill_valid(&mut app);
            app.submit_login();

            let result = app.next_auth_result().await.unwrap();
            app.apply_auth_result(result);

            assert_eq!(app.state.login.submission, SubmissionState::Failed);
            assert_eq!(
                app.state.login.validation_message.as_deref(),
                Some("Invalid mobile number or password.")
            );
            assert!(!app.state.has_alerts());
            assert!(app.state.login.is_submit_enabled());

            // Next interaction returns the form to idle
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(app.state.login.submission, SubmissionState::Idle);
        }

        #[tokio::test]
        async fn test_timeout_fails_login() {
            let mut app = App::with_authenticator(
                Arc::new(StalledAuthenticator),
                Duration::from_millis(20),
            );
            fill_valid(&mut app);
            app.submit_login();

            let result = app.next_auth_result().await.unwrap();
            assert!(matches!(result.outcome, Err(AuthError::TimedOut(_))));
            app.apply_auth_result(result);
            assert_eq!(app.state.login.submission, SubmissionState::Failed);
        }

        #[tokio::test]
        async fn test_escape_cancels_in_flight_login() {
            let mut app = App::with_authenticator(
                Arc::new(StalledAuthenticator),
                Duration::from_secs(60),
            );
            fill_valid(&mut app);
            app.submit_login();

            app.handle_key(key(KeyCode::Esc)).unwrap();

            assert_eq!(app.state.login.submission, SubmissionState::Failed);
            assert_eq!(
                app.state.login.validation_message.as_deref(),
                Some("Login cancelled.")
            );
            assert!(app.state.in_flight.is_none());
        }

        #[tokio::test]
        async fn test_stale_result_is_discarded() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(0),
                Duration::from_secs(5),
            );
            app.apply_auth_result(AuthResult {
                attempt_id: Uuid::new_v4(),
                outcome: Ok(()),
            });
            assert_eq!(app.state.login.submission, SubmissionState::Idle);
            assert!(!app.state.has_alerts());
        }

        #[tokio::test]
        async fn test_drain_applies_pending_results() {
            let mut app = App::with_authenticator(
                succeeding_authenticator(1),
                Duration::from_secs(5),
            );
            fill_valid(&mut app);
            app.submit_login();

            while app.state.in_flight.is_some() {
                tokio::task::yield_now().await;
                app.drain_auth_results();
            }
            assert_eq!(app.state.login.submission, SubmissionState::Succeeded);
        }
    }

    #[tokio::test]
    async fn test_request_quit() {
        let mut app = App::with_authenticator(succeeding_authenticator(0), Duration::from_secs(1));
        assert!(!app.should_quit());
        app.request_quit();
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_tick_advances() {
        let mut app = App::with_authenticator(succeeding_authenticator(0), Duration::from_secs(1));
        app.on_tick();
        app.on_tick();
        assert_eq!(app.tick, 2);
    }
}
