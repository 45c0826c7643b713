//! A small queue of deferred invocations.
//!
//! Each task has a start time and a deadline and must run between the two. Waking up costs
//! energy, so the queue suggests waking at the earliest deadline, by which time as many tasks
//! as possible have become runnable and can run together.
//!
//! The queue is expected to hold only a handful of tasks. It has a hard capacity of
//! [`TimerQueue::CAPACITY`] and uses linear scans throughout.

use std::fmt;
use std::ops::Range;
use std::time::{Duration, Instant};

use evbridge_core::error::CapacityError;
use evbridge_core::handle::InvocationCapability;

const SIZE_BITS: u32 = 6;
const SIZE: usize = 1 << SIZE_BITS;

/// Refers to a task in a [`TimerQueue`].
///
/// Handles are never reused, so a stale handle can't cancel a newer task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HInvoke(u64);

impl HInvoke {
    fn new(slot: usize, id: u64) -> Self {
        debug_assert_eq!(id % SIZE as u64, 0);
        Self(id | slot as u64)
    }

    fn slot(self) -> usize {
        self.0 as usize % SIZE
    }
}

struct Task {
    handle: HInvoke,
    start: Instant,
    deadline: Instant,
    capability: InvocationCapability,
}

pub struct TimerQueue {
    slots: Vec<Option<Task>>,
    next_id: u64,
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerQueue {
    pub const CAPACITY: usize = SIZE;

    pub fn new() -> Self {
        Self { slots: (0..SIZE).map(|_| None).collect(), next_id: 0 }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Schedule `capability` to fire within `window`.
    ///
    /// If the queue is full the capability is cancelled and an error is returned.
    pub fn insert(
        &mut self,
        window: Range<Instant>,
        capability: InvocationCapability,
    ) -> Result<HInvoke, CapacityError> {
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            tracing::warn!(capacity = SIZE, "timer queue is full");
            capability.cancel();
            return Err(CapacityError::new(SIZE));
        };

        let id = self.next_id;
        self.next_id = id.wrapping_add(SIZE as u64);

        let handle = HInvoke::new(slot, id);
        let deadline = window.end.max(window.start);
        tracing::trace!(?handle, ?window, "scheduling invocation");
        self.slots[slot] = Some(Task { handle, start: window.start, deadline, capability });
        Ok(handle)
    }

    /// Schedule `capability` to fire after a delay in `delay`, counted from `now`.
    pub fn insert_after(
        &mut self,
        now: Instant,
        delay: Range<Duration>,
        capability: InvocationCapability,
    ) -> Result<HInvoke, CapacityError> {
        self.insert((now + delay.start)..(now + delay.end), capability)
    }

    /// Cancel a pending task.
    ///
    /// Returns `false` if the task already fired or was cancelled.
    pub fn cancel(&mut self, handle: HInvoke) -> bool {
        match self.take(handle) {
            Some(task) => {
                tracing::trace!(?handle, "cancelling invocation");
                task.capability.cancel();
                true
            },
            None => false,
        }
    }

    /// Remove every task whose start time is not later than `now`, in start order.
    pub fn drain_runnable(&mut self, now: Instant) -> Vec<(HInvoke, InvocationCapability)> {
        let mut runnable: Vec<Task> = self
            .slots
            .iter_mut()
            .filter(|slot| slot.as_ref().is_some_and(|task| task.start <= now))
            .filter_map(Option::take)
            .collect();
        runnable.sort_by_key(|task| (task.start, task.handle.0 / SIZE as u64));
        runnable.into_iter().map(|task| (task.handle, task.capability)).collect()
    }

    /// Fire every runnable task. Returns how many fired.
    pub fn poll(&mut self, now: Instant) -> usize {
        let runnable = self.drain_runnable(now);
        let count = runnable.len();
        for (handle, capability) in runnable {
            tracing::trace!(?handle, "firing invocation");
            capability.fire();
        }
        count
    }

    /// The time the caller should wake up at to run the next batch of tasks.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.slots.iter().flatten().map(|task| task.deadline).min()
    }

    /// Cancel every pending task.
    pub fn clear(&mut self) {
        for task in self.slots.iter_mut().filter_map(Option::take) {
            task.capability.cancel();
        }
    }

    fn take(&mut self, handle: HInvoke) -> Option<Task> {
        let slot = &mut self.slots[handle.slot()];
        match slot {
            Some(task) if task.handle == handle => slot.take(),
            _ => None,
        }
    }
}

impl Drop for TimerQueue {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().flatten().map(|task| (task.handle, task.start..task.deadline)))
            .finish()
    }
}
