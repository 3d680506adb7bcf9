//! Animated spinner shown while a month is being fetched

use ratatui::{
    style::{Color, Style},
    text::Span,
};
use std::time::{Duration, Instant};

const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug)]
pub struct Spinner {
    frames: &'static [&'static str],
    current_frame: usize,
    last_update: Instant,
    frame_duration: Duration,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frames: DOTS,
            current_frame: 0,
            last_update: Instant::now(),
            frame_duration: Duration::from_millis(80),
        }
    }

    /// Advance the animation if a frame interval has passed (call on each render)
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if now.duration_since(self.last_update) >= self.frame_duration {
            self.current_frame = (self.current_frame + 1) % self.frames.len();
            self.last_update = now;
        }
    }

    pub fn render(&self) -> Span<'static> {
        Span::styled(
            self.frames[self.current_frame],
            Style::default().fg(Color::Cyan),
        )
    }

    pub fn current_frame(&self) -> &'static str {
        self.frames[self.current_frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_advances_after_interval() {
        let mut spinner = Spinner::new();
        let start = spinner.last_update;

        spinner.tick_at(start + Duration::from_millis(10));
        assert_eq!(spinner.current_frame(), "⠋");

        spinner.tick_at(start + Duration::from_millis(100));
        assert_eq!(spinner.current_frame(), "⠙");
    }

    #[test]
    fn test_spinner_wraps() {
        let mut spinner = Spinner::new();
        let mut now = spinner.last_update;
        for _ in 0..DOTS.len() {
            now += Duration::from_millis(80);
            spinner.tick_at(now);
        }
        assert_eq!(spinner.current_frame, 0);
    }
}
