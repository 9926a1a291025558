//! Application logo

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Bundled at build time from a project-relative path
const APP_ICON: &str = include_str!("../../assets/app_icon.txt");

/// Rows the logo occupies
pub fn logo_height() -> u16 {
    APP_ICON.lines().count() as u16
}

/// Draw the logo centered in `area`
pub fn draw(frame: &mut Frame, area: Rect) {
    let style = Style::default().fg(Color::LightRed);
    let lines: Vec<Line> = APP_ICON
        .lines()
        .map(|l| Line::styled(l.trim_end(), style))
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
