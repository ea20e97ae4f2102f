//! Frame continuation scheduling
//!
//! The engine never sleeps or spawns. It hands each continuation to a
//! [`FrameScheduler`] and the owner of the event loop feeds due ticks back.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::time::{Duration, Instant};

/// A request to render `frame` of run `session`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameTick {
    pub session: u64,
    pub frame: u32,
}

/// Accepts frame continuations from the chart engine
pub trait FrameScheduler {
    fn schedule(&mut self, delay: Duration, tick: FrameTick);
}

/// Deadline queue polled by the terminal event loop
///
/// Ticks with the same deadline come out in the order they were scheduled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<(Instant, u64, FrameTick)>>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule at an absolute deadline
    pub fn schedule_at(&mut self, deadline: Instant, tick: FrameTick) {
        self.seq += 1;
        self.heap.push(Reverse((deadline, self.seq, tick)));
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse((deadline, _, _))| *deadline)
    }

    /// Time until the earliest deadline, zero if already due
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Remove and return every tick due at or before `now`
    pub fn pop_due(&mut self, now: Instant) -> Vec<FrameTick> {
        let mut due = Vec::new();
        while let Some(Reverse((deadline, _, _))) = self.heap.peek() {
            if *deadline > now {
                break;
            }
            if let Some(Reverse((_, _, tick))) = self.heap.pop() {
                due.push(tick);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl FrameScheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, tick: FrameTick) {
        self.schedule_at(Instant::now() + delay, tick);
    }
}

/// Scheduler that ignores delays and hands ticks out in order on demand
///
/// Used to run an animation to completion without a clock, e.g. from the
/// command line.
#[derive(Debug, Default)]
pub struct StepScheduler {
    pending: VecDeque<FrameTick>,
    scheduled: usize,
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&mut self) -> Option<FrameTick> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Ticks ever scheduled through this scheduler
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }
}

impl FrameScheduler for StepScheduler {
    fn schedule(&mut self, _delay: Duration, tick: FrameTick) {
        self.scheduled += 1;
        self.pending.push_back(tick);
    }
}
