//! Fixed-timestep pacing that never loses wall time.
//!
//! The loop wakes roughly every `step_ms`, but wake-ups run late. Each due
//! call hands back the full time since the previous one, so the engine clock
//! tracks the wall clock no matter how late a frame is.

#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: u64,
    last_ms: u64,
}

impl FrameClock {
    pub fn new(step_ms: u32, start_ms: u64) -> Self {
        Self {
            step_ms: u64::from(step_ms.max(1)),
            last_ms: start_ms,
        }
    }

    /// Milliseconds to advance the engine by at `now_ms`, or `None` while
    /// less than one step has passed.
    pub fn advance(&mut self, now_ms: u64) -> Option<u32> {
        let elapsed = now_ms.saturating_sub(self.last_ms);
        if elapsed < self.step_ms {
            return None;
        }
        let elapsed = elapsed.min(u64::from(u32::MAX));
        self.last_ms += elapsed;
        Some(elapsed as u32)
    }

    /// Time left until the next step is due (input poll timeout).
    pub fn until_next(&self, now_ms: u64) -> u64 {
        (self.last_ms + self.step_ms).saturating_sub(now_ms)
    }
}
