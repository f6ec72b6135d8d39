//! Cancelable task scheduling on a virtual clock.
//!
//! The engine's two suspension mechanisms — debounce and simulated check
//! latency — are cooperative timers, not threads. This scheduler keeps a
//! deadline-ordered queue over a clock that only moves when the host
//! calls `advance`, which makes every timing behavior in the engine
//! deterministic under test.
//!
//! Cancellation is hard: a canceled or superseded token's task is removed
//! from the queue and can never fire. "Reschedule cancels prior pending
//! task" is built by callers from `cancel` + `schedule`.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled task; canceling it prevents the task from ever
/// firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskToken(u64);

/// Deadline-ordered task queue over a virtual clock.
///
/// Tasks scheduled for the same instant fire in scheduling order (the
/// token is the tiebreaker, and tokens are monotonic).
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_token: u64,
    queue: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_token: 1,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// The current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedule `task` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskToken {
        let token = self.next_token;
        self.next_token += 1;
        let deadline = self.now + delay;
        self.queue.insert((deadline, token), task);
        self.deadlines.insert(token, deadline);
        TaskToken(token)
    }

    /// Cancel a pending task. Returns `true` if the task was still
    /// queued; a canceled task never fires.
    pub fn cancel(&mut self, token: TaskToken) -> bool {
        match self.deadlines.remove(&token.0) {
            Some(deadline) => self.queue.remove(&(deadline, token.0)).is_some(),
            None => false,
        }
    }

    /// Pop the earliest task due at or before `target`, moving the clock
    /// to its deadline. Returns `None` once no task is due, leaving the
    /// clock where the last pop put it.
    ///
    /// Callers drive an advance as a loop so that tasks scheduled *by*
    /// fired tasks still run within the same window:
    ///
    /// ```ignore
    /// let target = scheduler.now() + elapsed;
    /// while let Some((_, task)) = scheduler.pop_due(target) {
    ///     run(task); // may call scheduler.schedule(...)
    /// }
    /// scheduler.settle(target);
    /// ```
    pub fn pop_due(&mut self, target: Duration) -> Option<(TaskToken, T)> {
        let &(deadline, token) = self.queue.keys().next()?;
        if deadline > target {
            return None;
        }
        let task = self.queue.remove(&(deadline, token))?;
        self.deadlines.remove(&token);
        self.now = deadline;
        Some((TaskToken(token), task))
    }

    /// Move the clock forward to `target` after a pop loop has drained
    /// everything due. Does nothing if the clock is already past it.
    pub fn settle(&mut self, target: Duration) {
        if target > self.now {
            self.now = target;
        }
    }

    /// Convenience for tests and simple hosts: advance by `elapsed` and
    /// collect everything that fired, in deadline order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        let target = self.now + elapsed;
        let mut fired = Vec::new();
        while let Some((_, task)) = self.pop_due(target) {
            fired.push(task);
        }
        self.settle(target);
        fired
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(30 * MS, "c");
        s.schedule(10 * MS, "a");
        s.schedule(20 * MS, "b");
        assert_eq!(s.advance(30 * MS), vec!["a", "b", "c"]);
        assert_eq!(s.pending(), 0);
        assert_eq!(s.now(), 30 * MS);
    }

    #[test]
    fn same_deadline_fires_in_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(5 * MS, 1);
        s.schedule(5 * MS, 2);
        s.schedule(5 * MS, 3);
        assert_eq!(s.advance(5 * MS), vec![1, 2, 3]);
    }

    #[test]
    fn canceled_task_never_fires() {
        let mut s = Scheduler::new();
        let token = s.schedule(10 * MS, "doomed");
        s.schedule(10 * MS, "survivor");
        assert!(s.cancel(token));
        assert!(!s.cancel(token)); // second cancel is a no-op
        assert_eq!(s.advance(20 * MS), vec!["survivor"]);
    }

    #[test]
    fn tasks_past_target_stay_queued() {
        let mut s = Scheduler::new();
        s.schedule(100 * MS, "later");
        assert!(s.advance(50 * MS).is_empty());
        assert_eq!(s.pending(), 1);
        assert_eq!(s.advance(50 * MS), vec!["later"]);
    }

    #[test]
    fn pop_due_moves_clock_to_each_deadline() {
        let mut s = Scheduler::new();
        s.schedule(10 * MS, "a");
        let target = s.now() + 40 * MS;
        let (_, task) = s.pop_due(target).expect("due task");
        assert_eq!(task, "a");
        assert_eq!(s.now(), 10 * MS);
        // A task scheduled mid-advance still lands inside the window.
        s.schedule(10 * MS, "b");
        let (_, task) = s.pop_due(target).expect("cascaded task");
        assert_eq!(task, "b");
        assert_eq!(s.now(), 20 * MS);
        assert!(s.pop_due(target).is_none());
        s.settle(target);
        assert_eq!(s.now(), 40 * MS);
    }

    #[test]
    fn reschedule_pattern_keeps_single_pending() {
        let mut s = Scheduler::new();
        let first = s.schedule(10 * MS, "stale");
        s.cancel(first);
        s.schedule(10 * MS, "fresh");
        assert_eq!(s.pending(), 1);
        assert_eq!(s.advance(10 * MS), vec!["fresh"]);
    }
}
