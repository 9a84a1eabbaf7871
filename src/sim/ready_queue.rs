use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::model::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct QueueKey(OrderedFloat<f64>, TaskId);

/// One terminal component's ready queue: a min-heap over task priority keys
/// (RM period / EDF absolute deadline), ties broken by task id.
#[derive(Clone, Debug, Default)]
pub struct ReadyQueue {
    heap: BinaryHeap<Reverse<QueueKey>>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new() }
    }

    pub fn push(&mut self, task_id: TaskId, key: f64) {
        self.heap.push(Reverse(QueueKey(OrderedFloat(key), task_id)));
    }

    pub fn peek(&self) -> Option<TaskId> {
        self.heap.peek().map(|Reverse(QueueKey(_, id))| *id)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// A binary heap has no arbitrary-element removal, so an aborted or
    /// just-dispatched task's stale entry is dropped by rebuilding the whole
    /// heap rather than tracking a lazy-deletion epoch — acceptable here
    /// since per-component task sets are small.
    pub fn remove(&mut self, task_id: TaskId) {
        let remaining: Vec<Reverse<QueueKey>> = self.heap.drain()
            .filter(|Reverse(QueueKey(_, id))| *id != task_id)
            .collect();
        self.heap = remaining.into_iter().collect();
    }
}
