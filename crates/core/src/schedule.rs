//! Scheduler module - cancellable timed tasks on a virtual clock
//!
//! The engine never reads a wall clock. Callers advance time explicitly and
//! the scheduler hands back due tasks one at a time, earliest first, so each
//! task runs to completion before the next one is considered. A task can be
//! cancelled through the handle returned when it was scheduled; a cancelled
//! handle never fires.

/// Identifies one scheduled task.
///
/// Handles are never reused within a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// What a task does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One step of the game countdown
    CountdownTick,
    /// Turn a mismatched pair face down again
    ResolveMismatch,
}

/// A task that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    /// Episode the task was scheduled in
    pub episode: u32,
    /// Virtual time the task was due at
    pub due_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct Task {
    handle: TimerHandle,
    kind: TimerKind,
    episode: u32,
    due_ms: u64,
    period_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    now_ms: u64,
    next_handle: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_handle: 1,
            // Countdown + one pending mismatch is the steady state.
            tasks: Vec::with_capacity(4),
        }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live (not yet fired or cancelled) tasks.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Schedule a task that fires once, `delay_ms` from now.
    pub fn schedule_once(&mut self, kind: TimerKind, delay_ms: u32, episode: u32) -> TimerHandle {
        self.push(kind, delay_ms as u64, None, episode)
    }

    /// Schedule a task that fires every `period_ms`, first one period from now.
    ///
    /// A zero period is treated as 1ms so the task cannot fire forever at one instant.
    pub fn schedule_repeating(
        &mut self,
        kind: TimerKind,
        period_ms: u32,
        episode: u32,
    ) -> TimerHandle {
        let period = (period_ms as u64).max(1);
        self.push(kind, period, Some(period), episode)
    }

    fn push(
        &mut self,
        kind: TimerKind,
        delay_ms: u64,
        period_ms: Option<u64>,
        episode: u32,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.tasks.push(Task {
            handle,
            kind,
            episode,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
        });
        handle
    }

    /// Cancel a task. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    /// Cancel every live task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Pop the earliest task due at or before `until_ms`.
    ///
    /// Ties are broken by scheduling order. The clock moves to the task's due
    /// time; repeating tasks are re-armed one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle))
            .map(|(i, _)| i)?;

        let task = self.tasks[idx];
        self.now_ms = self.now_ms.max(task.due_ms);

        match task.period_ms {
            Some(period) => self.tasks[idx].due_ms = task.due_ms.saturating_add(period),
            None => {
                self.tasks.swap_remove(idx);
            }
        }

        Some(Fired {
            handle: task.handle,
            kind: task.kind,
            episode: task.episode,
            due_ms: task.due_ms,
        })
    }

    /// Move the clock to `until_ms` once every due task has been popped.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
