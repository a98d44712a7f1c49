//! Scroll state for the history view.
//!
//! The view is centred on one generation (the focus). New generations appear
//! below it; after a spawn the focus stays put for a short pause, then jumps
//! to the newest row.

use crate::commands::ViewCommand;
use crate::config::DisplayConfig;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Viewport {
    /// Generation drawn at the vertical centre
    focus: usize,
    /// Newest generation known to the view
    latest: usize,
    visible_rows: usize,
    pause: Duration,
    /// Deadline of the post-spawn pause
    hold_until: Option<Instant>,
}

impl Viewport {
    pub fn new(visible_rows: usize, pause: Duration) -> Self {
        Self {
            focus: 0,
            latest: 0,
            visible_rows: visible_rows.max(1),
            pause,
            hold_until: None,
        }
    }

    pub fn from_config(display: &DisplayConfig) -> Self {
        Self::new(
            display.visible_rows,
            Duration::from_millis(display.spawn_pause_ms),
        )
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn latest(&self) -> usize {
        self.latest
    }

    /// Still waiting to follow a freshly spawned row
    pub fn is_holding(&self) -> bool {
        self.hold_until.is_some()
    }

    pub fn apply(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::ScrollBack => self.scroll(1),
            ViewCommand::ScrollForward => self.scroll(-1),
        }
    }

    /// Move the focus by `rows`, positive towards older generations.
    /// Clamped to `[0, latest]`.
    pub fn scroll(&mut self, rows: i64) {
        let target = self.focus as i64 - rows;
        self.focus = target.clamp(0, self.latest as i64) as usize;
    }

    /// A new generation was appended; start the pause
    pub fn on_spawn(&mut self, latest: usize, now: Instant) {
        self.latest = latest;
        self.hold_until = Some(now + self.pause);
    }

    /// Advance the timer. Returns true when the focus moved to the newest row.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hold_until {
            Some(deadline) if now >= deadline => {
                self.hold_until = None;
                let moved = self.focus != self.latest;
                self.focus = self.latest;
                moved
            }
            _ => false,
        }
    }

    /// Time left before the view follows the newest row
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.hold_until
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Vertical centre of a row: the focus sits mid-view, older rows above
    pub fn row_center_y(&self, generation: usize, row_height: f32, view_height: f32) -> f32 {
        let delta = generation as f32 - self.focus as f32;
        view_height / 2.0 + delta * row_height
    }

    /// Generations that intersect the view
    pub fn visible_generations(&self) -> RangeInclusive<usize> {
        let half = self.visible_rows / 2 + 1;
        let first = self.focus.saturating_sub(half);
        let last = (self.focus + half).min(self.latest);
        first..=last
    }
}
