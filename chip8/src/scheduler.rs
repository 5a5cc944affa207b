use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use octet_core::TimerKind;

/// A timer tick waiting to be delivered
#[derive(Debug, Clone, Copy)]
pub struct PendingTick {
    pub due: Duration,
    pub timer: TimerKind,
    pub epoch: u32,
    seq: u64,
}

impl PartialEq for PendingTick {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingTick {}

impl PartialOrd for PendingTick {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingTick {
    // Reversed so that the heap pops the earliest deadline first; ties go to
    // whichever was scheduled first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// # Timer Queue
/// Timer ticks requested by the interpreter, ordered by when they're due.
///
/// Deadlines are measured on the run loop's clock, i.e. time since it started.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: BinaryHeap<PendingTick>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, timer: TimerKind, epoch: u32) {
        self.seq += 1;
        self.pending.push(PendingTick {
            due,
            timer,
            epoch,
            seq: self.seq,
        });
    }

    /// Removes and returns the earliest tick if it's due by `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<PendingTick> {
        match self.pending.peek() {
            Some(tick) if tick.due <= now => self.pending.pop(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
