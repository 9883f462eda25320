//! One-shot timers as plain values
//!
//! Timers never call back. The owner polls them with the current time from
//! an injected clock and decides what firing means. This keeps the state
//! machines testable without wall-clock waits.

/// A single scheduled firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduledTask {
    /// Absolute time (ms) at which the task becomes due
    pub fire_at_ms: u64,
    /// Set when the owner cancelled the task
    pub cancelled: bool,
}

impl ScheduledTask {
    /// Create a task due at `fire_at_ms`
    pub const fn at(fire_at_ms: u64) -> Self {
        Self {
            fire_at_ms,
            cancelled: false,
        }
    }

    /// Check whether the task should fire at `now_ms`
    pub fn is_due(&self, now_ms: u64) -> bool {
        !self.cancelled && now_ms >= self.fire_at_ms
    }

    /// Mark the task cancelled (idempotent)
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// Holder for at most one outstanding task
///
/// Scheduling replaces whatever was pending, so a slot can never hold two
/// live tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSlot {
    task: Option<ScheduledTask>,
}

impl TimerSlot {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self { task: None }
    }

    /// Schedule a firing `delay_ms` after `now_ms`, replacing any pending task
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u32) {
        self.task = Some(ScheduledTask::at(now_ms.saturating_add(delay_ms as u64)));
    }

    /// Cancel the pending task
    ///
    /// Cancelling an empty, fired or already cancelled slot is a no-op.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.as_mut() {
            task.cancel();
        }
        self.task = None;
    }

    /// Fire the task if it is due
    ///
    /// Returns true exactly once per scheduled task; the slot is empty
    /// afterwards.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.task {
            Some(task) if task.is_due(now_ms) => {
                self.task = None;
                true
            }
            _ => false,
        }
    }

    /// Check if a live task is pending
    pub fn is_pending(&self) -> bool {
        matches!(self.task, Some(task) if !task.cancelled)
    }

    /// Time at which the pending task fires
    pub fn deadline(&self) -> Option<u64> {
        self.task.filter(|t| !t.cancelled).map(|t| t.fire_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut slot = TimerSlot::new();
        slot.schedule(1000, 300);

        assert!(!slot.poll(1299));
        assert!(slot.poll(1300));
        assert!(!slot.poll(1301));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut slot = TimerSlot::new();
        slot.schedule(0, 100);
        slot.schedule(50, 100);

        assert_eq!(slot.deadline(), Some(150));
        assert!(!slot.poll(120));
        assert!(slot.poll(150));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut slot = TimerSlot::new();
        slot.cancel();
        slot.schedule(0, 10);
        slot.cancel();
        slot.cancel();

        assert!(!slot.is_pending());
        assert!(!slot.poll(1000));

        // Cancelling after firing does nothing either
        slot.schedule(0, 10);
        assert!(slot.poll(10));
        slot.cancel();
        assert!(!slot.poll(20));
    }

    #[test]
    fn test_cancelled_task_never_due() {
        let mut task = ScheduledTask::at(10);
        assert!(task.is_due(10));
        task.cancel();
        assert!(!task.is_due(10_000));
    }
}
