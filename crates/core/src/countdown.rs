//! Countdown module - the game clock shown to the player.

use arrayvec::ArrayString;
use std::fmt::Write;

use crate::schedule::TimerHandle;

/// Fixed-capacity clock text (`"m:ss"`); fits any `u32` second count.
pub type ClockText = ArrayString<16>;

/// Format seconds as `m:ss` (seconds zero-padded to two digits).
///
/// ```
/// use tui_memory_core::format_clock;
///
/// assert_eq!(format_clock(60).as_str(), "1:00");
/// assert_eq!(format_clock(59).as_str(), "0:59");
/// assert_eq!(format_clock(5).as_str(), "0:05");
/// assert_eq!(format_clock(0).as_str(), "0:00");
/// ```
pub fn format_clock(secs: u32) -> ClockText {
    let mut out = ClockText::new();
    // Cannot fail: the longest output ("71582788:15") is under the capacity.
    let _ = write!(out, "{}:{:02}", secs / 60, secs % 60);
    out
}

/// Remaining time plus the scheduler task that drives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    limit_secs: u32,
    remaining_secs: u32,
    handle: Option<TimerHandle>,
}

impl Countdown {
    /// An inert countdown at the full limit.
    pub fn new(limit_secs: u32) -> Self {
        Self {
            limit_secs,
            remaining_secs: limit_secs,
            handle: None,
        }
    }

    pub fn limit_secs(&self) -> u32 {
        self.limit_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// True while the countdown task is scheduled.
    pub fn active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    pub fn display(&self) -> ClockText {
        format_clock(self.remaining_secs)
    }

    pub(crate) fn start(&mut self, handle: TimerHandle) {
        self.handle = Some(handle);
    }

    /// Detach the task handle; the caller cancels it in the scheduler.
    pub(crate) fn stop(&mut self) -> Option<TimerHandle> {
        self.handle.take()
    }

    /// Count down one second. Returns true when time ran out.
    pub(crate) fn step(&mut self) -> bool {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.remaining_secs == 0
    }
}
