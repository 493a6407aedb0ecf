use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Deferred events on a virtual clock.
///
/// The clock only moves when the owner drives it, which keeps game timing deterministic in tests
/// and decoupled from frame rate in the window loop. Typical use per frame:
///
/// ```
/// # use std::time::Duration;
/// # use engine::timers::TimerQueue;
/// let mut timers = TimerQueue::new();
/// timers.schedule(Duration::from_millis(10), "ping");
///
/// let deadline = timers.now() + Duration::from_millis(16);
/// while let Some(event) = timers.pop_due(deadline) {
///     // `timers.now()` is the event's own fire time here, so anything scheduled from the
///     // handler is relative to when the event was due, not to the end of the frame.
///     assert_eq!(event, "ping");
/// }
/// timers.advance_to(deadline);
/// ```
///
/// Nothing is ever cancelled: owners that need to invalidate pending events tag them (e.g. with
/// a generation counter) and drop stale ones when they fire.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Pending<E>>,
}

#[derive(Debug)]
struct Pending<E> {
    at: Duration,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Pending<E> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<E> Eq for Pending<E> {}

impl<E> PartialOrd for Pending<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Pending<E> {
    // Reversed: `BinaryHeap` is a max-heap and we want the earliest (then first scheduled) on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedules `event` to fire `delay` after the current clock.
    ///
    /// Returns the absolute fire time.
    pub fn schedule(&mut self, delay: Duration, event: E) -> Duration {
        let at = self.now.saturating_add(delay);
        self.pending.push(Pending {
            at,
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
        at
    }

    /// Fire time of the earliest pending event.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.peek().map(|p| p.at)
    }

    /// Pops the earliest event due at or before `deadline` and moves the clock to its fire time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<E> {
        if self.next_due()? > deadline {
            return None;
        }
        let next = self.pending.pop()?;
        self.now = self.now.max(next.at);
        Some(next.event)
    }

    /// Moves the clock forward to `deadline` without firing anything.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}
