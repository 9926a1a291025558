//! Login screen rendering

use super::components::{render_button, render_checkbox, spinner_frame, BUTTON_HEIGHT};
use super::forms::draw_field;
use super::logo;
use crate::app::App;
use crate::state::{LoginFocus, SocialPlatform};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

/// Widest the form column gets on large terminals
const FORM_WIDTH: u16 = 56;

/// Brand color for a social login button
fn platform_color(platform: SocialPlatform) -> Color {
    match platform {
        SocialPlatform::Facebook => Color::Blue,
        SocialPlatform::Apple => Color::White,
        SocialPlatform::Google => Color::Red,
    }
}

/// Draw the login form centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.login;
    let focus = form.focus();

    let width = FORM_WIDTH.min(area.width);
    let column = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Title
            Constraint::Length(logo::logo_height()), // Logo
            Constraint::Length(3),                  // Mobile number
            Constraint::Length(3),                  // Password row
            Constraint::Length(1),                  // Validation message
            Constraint::Length(1),                  // Remember me
            Constraint::Length(BUTTON_HEIGHT),      // Login
            Constraint::Length(1),                  // Forgot password
            Constraint::Length(BUTTON_HEIGHT),      // Social row
            Constraint::Min(0),
        ])
        .split(column);

    let title = Paragraph::new("Welcome Back")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(title, chunks[0]);

    logo::draw(frame, chunks[1]);

    draw_field(
        frame,
        chunks[2],
        &form.mobile_number,
        focus == LoginFocus::MobileNumber,
        false,
    );

    let password_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(chunks[3]);
    draw_field(
        frame,
        password_row[0],
        &form.password,
        focus == LoginFocus::Password,
        form.password_visible,
    );
    render_button(
        frame,
        password_row[1],
        if form.password_visible { "Hide" } else { "Show" },
        focus == LoginFocus::PasswordToggle,
        true,
        None,
    );

    if let Some(message) = &form.validation_message {
        frame.render_widget(
            Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red)),
            chunks[4],
        );
    }

    render_checkbox(
        frame,
        chunks[5],
        "Remember Me",
        form.remember_me,
        focus == LoginFocus::RememberMe,
    );

    let login_label = if form.is_submitting() {
        spinner_frame(app.tick)
    } else {
        "Login"
    };
    render_button(
        frame,
        chunks[6],
        login_label,
        focus == LoginFocus::LoginButton,
        form.is_submit_enabled(),
        Some(Color::LightRed),
    );

    let forgot = Paragraph::new("Forgot Password?")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(forgot, chunks[7]);

    let social_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[8]);
    for (platform, area) in SocialPlatform::ALL.iter().zip(social_row.iter()) {
        render_button(
            frame,
            *area,
            platform.name(),
            focus == LoginFocus::Social(*platform),
            true,
            Some(platform_color(*platform)),
        );
    }
}
