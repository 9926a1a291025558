//! Reusable UI components

mod button;
mod dialog;
mod spinner;

pub use button::{render_button, render_checkbox, BUTTON_HEIGHT};
pub use dialog::render_alert_dialog;
pub use spinner::spinner_frame;
