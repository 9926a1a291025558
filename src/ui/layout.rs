//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::PASTE_SHORTCUT;
use crate::state::{LoginFocus, SubmissionState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the screen title bar
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(app.state.current_view.title())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.login;
    let badge_color = match form.submission {
        SubmissionState::Failed => Color::Red,
        SubmissionState::Succeeded => Color::Green,
        _ => Color::Cyan,
    };
    let mut spans = vec![Span::styled(
        format!(" {} ", form.submission.label()),
        Style::default().fg(Color::Black).bg(badge_color),
    )];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        get_hints(form.focus(), form.is_submitting()),
        Style::default().fg(Color::Gray),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the focused control
fn get_hints(focus: LoginFocus, is_submitting: bool) -> String {
    if is_submitting {
        return "Esc:cancel".to_string();
    }
    match focus {
        LoginFocus::MobileNumber => format!("Tab:next  Enter:password  {PASTE_SHORTCUT}:paste"),
        LoginFocus::Password => format!("Tab:next  Enter:login  {PASTE_SHORTCUT}:paste"),
        LoginFocus::PasswordToggle | LoginFocus::RememberMe => {
            "Tab:next  Space:toggle".to_string()
        }
        LoginFocus::LoginButton | LoginFocus::Social(_) => "Tab:next  Enter:press".to_string(),
    }
}
