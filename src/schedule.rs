//! Timer scheduling on a monotonic timeline.
//!
//! Controllers never sleep; they schedule typed events at deadlines
//! measured as `Duration` since application start. The event loop
//! pops due events and dispatches them. Tests drive the timeline by
//! hand, so every timer sequence is deterministic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Events the timer queue can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerEvent {
    /// One step of the typewriter loop (type, pause, erase, pause).
    TypingStep,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: Duration,
    /// Insertion counter. Breaks ties so equal deadlines fire in
    /// the order they were scheduled.
    seq: u64,
    event: TimerEvent,
}

/// A min-heap of pending timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    seq: u64,
    timers: BinaryHeap<Reverse<Entry>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        TimerQueue::default()
    }

    /// Schedule `event` to fire `delay` after `now`.
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, event: TimerEvent) {
        self.timers.push(Reverse(Entry {
            due: now + delay,
            seq: self.seq,
            event,
        }));
        self.seq += 1;
    }

    /// Deadline of the soonest pending timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.peek().map(|Reverse(e)| e.due)
    }

    /// Pop the next timer that is due at `now`, earliest first.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerEvent> {
        if self.timers.peek().is_some_and(|Reverse(e)| e.due <= now) {
            self.timers.pop().map(|Reverse(e)| e.event)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
