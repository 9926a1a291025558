//! Progress indicator

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frames advance every other tick so the spinner reads at ~60fps polling
pub fn spinner_frame(tick: u64) -> &'static str {
    FRAMES[((tick / 2) % FRAMES.len() as u64) as usize]
}
