//! Timer queue for engine continuations
//!
//! Holds work items against a virtual clock that only moves when told to.
//! Items due at the same instant come out in the order they were scheduled.

use std::time::Duration;

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    seq: u64,
    item: T,
}

/// A due-time ordered queue with its own clock.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue `item` to run `delay` from now.
    pub fn schedule(&mut self, delay: Duration, item: T) {
        let entry = Entry {
            due: self.now + delay,
            seq: self.next_seq,
            item,
        };
        self.next_seq += 1;
        self.entries.push(entry);
    }

    fn earliest(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)
    }

    /// Remove the earliest item due by `deadline`, moving the clock to its
    /// due time. Items it schedules are timed from that moment.
    pub fn pop_until(&mut self, deadline: Duration) -> Option<T> {
        let index = self.earliest()?;
        if self.entries[index].due > deadline {
            return None;
        }
        let entry = self.entries.remove(index);
        self.now = self.now.max(entry.due);
        Some(entry.item)
    }

    /// Remove the earliest item regardless of its due time, moving the
    /// clock forward to it.
    pub fn pop_next(&mut self) -> Option<T> {
        let index = self.earliest()?;
        let entry = self.entries.remove(index);
        self.now = self.now.max(entry.due);
        Some(entry.item)
    }

    /// Move the clock forward to `deadline` (never backwards).
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    /// Drop every pending item.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
