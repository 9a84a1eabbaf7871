use ordered_float::OrderedFloat;

use crate::model::prelude::*;

/// An event consumed exactly once by the main loop.
#[derive(Clone, Copy, Debug)]
pub enum EventKind {
    TaskArrival(TaskId),
    TaskCompletion(TaskId),
    BudgetReplenish(ComponentId),
}

/// A scheduled occurrence, ordered by `time` first and by insertion sequence
/// second so that events with identical timestamps are processed in
/// insertion order.
#[derive(Clone, Copy, Debug)]
pub struct Event {
    pub time: Time,
    pub kind: EventKind,
    sequence: u64,
}

impl Event {
    pub fn new(time: Time, kind: EventKind, sequence: u64) -> Self {
        Self { time, kind, sequence }
    }

    fn key(&self) -> (OrderedFloat<f64>, u64) {
        (OrderedFloat(self.time.value()), self.sequence)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}
