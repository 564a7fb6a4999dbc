//! Session clock - elapsed play time in whole seconds.
//!
//! The clock accumulates the monotonic frame deltas handed to it by the
//! frontend, so it never goes backwards and is easy to drive from tests.

use crate::types::CLOCK_TICK_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionClock {
    running: bool,
    elapsed_ms: u64,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop counting. Elapsed time is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and zero the clock.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn elapsed_seconds(&self) -> u32 {
        let secs = self.elapsed_ms / CLOCK_TICK_MS as u64;
        u32::try_from(secs).unwrap_or(u32::MAX)
    }

    /// Advance by `elapsed_ms` while running.
    ///
    /// Returns the number of whole-second boundaries crossed (the number of
    /// ticks the display should observe).
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.running {
            return 0;
        }
        let before = self.elapsed_seconds();
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms as u64);
        self.elapsed_seconds() - before
    }
}

/// Live timer format: zero-padded `MM:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Leaderboard duration format: `M:SS`.
pub fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
