//! Alert dialog component

use super::base::{render_dialog, DialogConfig};
use crate::state::Alert;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render an alert overlay centered on the screen
pub fn render_alert_dialog(frame: &mut Frame, alert: &Alert) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to dismiss"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: &alert.title,
            title_color: Color::Yellow,
            border_color: Color::Yellow,
            message: &alert.message,
            hint: Some(hint),
            max_width: 50,
        },
    );
}
