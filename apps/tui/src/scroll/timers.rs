use std::time::Duration;

/// Delayed actions keyed by session time. Each entry carries the
/// generation it was scheduled under so the owner can discard stale
/// callbacks when they fire.
#[derive(Debug)]
pub struct TimerQueue<T> {
    pending: Vec<Scheduled<T>>,
}

#[derive(Debug)]
struct Scheduled<T> {
    due: Duration,
    generation: u64,
    action: T,
}

impl<T> TimerQueue<T> {
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, due: Duration, generation: u64, action: T) {
        // Keep insertion order for equal deadlines.
        let index = self.pending.partition_point(|entry| entry.due <= due);
        self.pending.insert(
            index,
            Scheduled {
                due,
                generation,
                action,
            },
        );
    }

    /// Removes and returns the earliest action due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(u64, T)> {
        if self.pending.first().is_some_and(|entry| entry.due <= now) {
            let entry = self.pending.remove(0);
            return Some((entry.generation, entry.action));
        }
        None
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.first().map(|entry| entry.due)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
