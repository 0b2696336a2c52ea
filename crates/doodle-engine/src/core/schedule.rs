#[derive(Debug)]
struct Timer<T> {
    due: f64,
    seq: u64,
    task: T,
}

/// Single-threaded queue of deferred tasks.
///
/// Tasks run in order of due time; tasks due at the same time run in the
/// order they were scheduled. The queue never runs anything itself: the host
/// asks for `next_deadline`, waits, and drains whatever is due.
#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `task` to become due at `due` (seconds).
    pub fn schedule(&mut self, due: f64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer { due, seq, task });
    }

    /// Earliest due time, if anything is scheduled.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.iter().map(|t| t.due).min_by(f64::total_cmp)
    }

    /// Remove and return every task due at or before `now`, in run order.
    /// Tasks scheduled while the returned ones run wait for the next drain.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|t| t.task).collect()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_due_then_insertion_order() {
        let mut q = TimerQueue::new();
        q.schedule(2.0, "late");
        q.schedule(1.0, "first");
        q.schedule(1.0, "second");
        q.schedule(5.0, "future");

        assert_eq!(q.next_deadline(), Some(1.0));
        assert_eq!(q.drain_due(2.0), vec!["first", "second", "late"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_deadline(), Some(5.0));
    }

    #[test]
    fn nothing_due_yet() {
        let mut q = TimerQueue::new();
        q.schedule(1.0, ());
        assert!(q.drain_due(0.5).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        q.schedule(1.0, 'a');
        q.schedule(2.0, 'b');
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
        assert!(q.drain_due(5.0).is_empty());
    }
}
