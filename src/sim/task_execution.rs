use crate::model::prelude::*;

/// A `TaskExecution`'s lifecycle state. `Running` implies this is the
/// simulation's single `running_task`; `Ready` implies it sits in its home
/// component's ready queue; neither holds for `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Ready,
    Running,
}

/// The single mutable record reused across every job of a [`Task`] — not a
/// fresh object per arrival.
#[derive(Clone, Debug)]
pub struct TaskExecution {
    pub task_id: TaskId,
    pub component_id: ComponentId,
    pub period: Time,
    pub priority: i64,

    pub state: TaskState,
    pub absolute_deadline: Time,
    pub remaining_exec_time: Time,
    pub arrival_time: Time,
    pub exec_count: u64,

    pub response_times: Vec<Time>,
    pub completion_times: Vec<Time>,
    pub deadlines_met: u64,
    pub deadlines_missed: u64,
    pub schedulable: bool,
}

impl TaskExecution {
    pub fn idle(task: &Task) -> Self {
        Self {
            task_id: task.id,
            component_id: task.component_id,
            period: task.period,
            priority: task.priority,
            state: TaskState::Idle,
            absolute_deadline: Time::ZERO,
            remaining_exec_time: Time::ZERO,
            arrival_time: Time::ZERO,
            exec_count: 0,
            response_times: Vec::new(),
            completion_times: Vec::new(),
            deadlines_met: 0,
            deadlines_missed: 0,
            schedulable: true,
        }
    }

    /// Starts a fresh job on this same record, regardless of whatever job
    /// preceded it (the caller has already applied the abort policy for an
    /// overrunning previous job).
    pub fn arrive(&mut self, task: &Task, time: Time) {
        self.state = TaskState::Ready;
        self.arrival_time = time;
        self.remaining_exec_time = task.wcet;
        self.absolute_deadline = time + task.period;
        self.exec_count += 1;
    }

    /// The key a parent scheduler sorts this execution's component's ready
    /// queue by — period under RM, absolute deadline under EDF.
    pub fn priority_key(&self, scheduler: Scheduler) -> f64 {
        match scheduler {
            Scheduler::RateMonotonic => self.period.value(),
            Scheduler::EarliestDeadlineFirst => self.absolute_deadline.value(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_exec_time.is_close_to_zero()
    }
}
