use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`], used to cancel a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Single-threaded timer queue on a virtual clock.
///
/// Time only moves when the owner calls [`TimerQueue::advance_to`]. The
/// interactive loop feeds it wall-clock time; tests feed it whatever they like.
/// Timers sharing a due time fire in the order they were scheduled.
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    // (due, seq) keeps equal due times in scheduling order
    pending: BTreeMap<(Duration, u64), T>,
    due_by_id: HashMap<TimerId, Duration>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let due = self.now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;

        let id = TimerId(seq);
        self.pending.insert((due, seq), payload);
        self.due_by_id.insert(id, due);
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.due_by_id.remove(&id) {
            Some(due) => self.pending.remove(&(due, id.0)).is_some(),
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_by_id.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Time left until the earliest pending timer, saturating at zero.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_due().map(|due| due.saturating_sub(self.now))
    }

    /// Move the clock forward to `target`, firing every timer due on the way.
    ///
    /// The clock is set to each timer's own due time before its handler runs,
    /// so a handler that reschedules does so relative to when it fired. A
    /// target in the past leaves the clock where it is.
    pub fn advance_to(&mut self, target: Duration, mut on_fire: impl FnMut(&mut Self, T)) {
        while let Some(due) = self.next_due() {
            if due > target {
                break;
            }
            let Some(((due, seq), payload)) = self.pending.pop_first() else {
                break;
            };
            self.due_by_id.remove(&TimerId(seq));
            if due > self.now {
                self.now = due;
            }
            on_fire(self, payload);
        }

        if target > self.now {
            self.now = target;
        }
    }

    /// Convenience wrapper around [`TimerQueue::advance_to`].
    #[cfg(test)]
    pub fn advance_by(&mut self, delta: Duration, on_fire: impl FnMut(&mut Self, T)) {
        let target = self.now + delta;
        self.advance_to(target, on_fire);
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.due_by_id.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
