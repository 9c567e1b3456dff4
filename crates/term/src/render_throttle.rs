//! Frame pacing for the terminal loop.
//!
//! The board only changes on input or a countdown step, so most ticks need no
//! repaint. A frame is drawn when the caller's fingerprint changes, and
//! otherwise at most once per `heartbeat_ms` to repair terminal damage.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    heartbeat_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(heartbeat_ms: u64) -> Self {
        Self {
            heartbeat_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    /// Forget the last frame so the next call renders (resize, focus gain).
    pub fn force(&mut self) {
        self.last_fingerprint = None;
    }

    /// Whether a frame with `fingerprint` should be drawn at `now_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.heartbeat_ms;
        if changed || stale {
            self.last_render_ms = now_ms;
            self.last_fingerprint = Some(fingerprint);
            return true;
        }
        false
    }
}
