//! Cooperative task scheduler
//!
//! Deferred steps (wheel drains, deceleration ticks, touch capture) are
//! queued here instead of being driven by threads or busy loops. The owner
//! advances the clock and pops due tasks one at a time, which keeps every
//! mutation on the owner's thread and in a deterministic order.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TaskId;
}

/// Smallest delay a task can be scheduled with, in milliseconds.
///
/// Tasks rescheduled while the queue is being drained always land in the
/// future, so a drain pass terminates.
pub const MIN_DELAY_MS: f64 = 1.0;

/// Monotonic token identifying which interaction a deferred task belongs to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub const INITIAL: Generation = Generation(0);

    /// The generation that supersedes this one
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

struct ScheduledTask<T> {
    /// Due time in milliseconds
    due: f64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    task: T,
}

/// Queue of deferred tasks on a virtual millisecond clock
pub struct TaskScheduler<T> {
    tasks: SlotMap<TaskId, ScheduledTask<T>>,
    now: f64,
    next_seq: u64,
}

impl<T> TaskScheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            now: 0.0,
            next_seq: 0,
        }
    }

    /// Current clock value in milliseconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward. The clock never runs backwards.
    pub fn advance_clock(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Queue `task` to run `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: f64, task: T) -> TaskId {
        let delay = if delay_ms.is_finite() {
            delay_ms.max(MIN_DELAY_MS)
        } else {
            MIN_DELAY_MS
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now + delay;
        tracing::trace!("task #{} scheduled, due at {:.1}ms", seq, due);

        self.tasks.insert(ScheduledTask {
            due,
            seq,
            task,
        })
    }

    /// Cancel a pending task, returning it if it had not run yet
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        self.tasks.remove(id).map(|t| t.task)
    }

    /// Check if a task is still waiting to run
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<f64> {
        self.tasks
            .values()
            .map(|t| t.due)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Remove and return the earliest task due at or before `limit`, moving
    /// the clock to its due time so the task observes an on-time clock.
    ///
    /// Draining with this up to a target time replays every timer in order,
    /// including ones scheduled by earlier tasks in the same drain.
    pub fn pop_until(&mut self, limit: f64) -> Option<(TaskId, T)> {
        let (id, due) = self
            .tasks
            .iter()
            .filter(|(_, t)| t.due <= limit)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(id, t)| (id, t.due))?;

        self.advance_clock(due);
        self.tasks.remove(id).map(|t| (id, t.task))
    }

    /// Get the number of pending tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if no tasks are pending
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
