use crate::model::prelude::*;
use super::event::EventKind;
use super::simulation::Simulation;
use super::task_execution::TaskState;

impl Simulation {
    pub(super) fn dispatch(&mut self, time: Time, kind: EventKind) {
        match kind {
            EventKind::TaskArrival(task_id) => self.handle_task_arrival(task_id, time),
            EventKind::TaskCompletion(task_id) => self.handle_task_completion(task_id, time),
            EventKind::BudgetReplenish(component_id) => self.handle_budget_replenish(component_id, time),
        }
    }

    /// An overrunning previous job is aborted (its miss counted, its
    /// remnants cleared from wherever it lived), then a fresh job starts on
    /// the same `TaskExecution` record.
    fn handle_task_arrival(&mut self, task_id: TaskId, time: Time) {
        let idx = task_id.0 as usize;
        let component_id = self.task_execs[idx].component_id;
        let previous_state = self.task_execs[idx].state;

        if previous_state != TaskState::Idle {
            self.task_execs[idx].deadlines_missed += 1;
            self.task_execs[idx].schedulable = false;

            match previous_state {
                TaskState::Running => {
                    if self.running_task == Some(task_id) {
                        self.running_task = None;
                    }
                }
                TaskState::Ready => self.ready_queues[component_id.0 as usize].remove(task_id),
                TaskState::Idle => unreachable!(),
            }
        }

        let task = self.topology.task(task_id);
        let period = task.period;
        self.task_execs[idx].arrive(task, time);

        let scheduler = self.topology.component(component_id).scheduler;
        let key = self.task_execs[idx].priority_key(scheduler);
        self.ready_queues[component_id.0 as usize].push(task_id, key);

        self.schedule(time + period, EventKind::TaskArrival(task_id));
    }

    /// Filters stale completions left over from an aborted job: only a
    /// still-`Running` execution whose remaining time is actually exhausted
    /// completes here.
    fn handle_task_completion(&mut self, task_id: TaskId, time: Time) {
        let idx = task_id.0 as usize;
        if self.task_execs[idx].state != TaskState::Running || !self.task_execs[idx].is_complete() {
            return;
        }

        self.task_execs[idx].state = TaskState::Idle;
        let response = time - self.task_execs[idx].arrival_time;
        self.task_execs[idx].response_times.push(response);
        self.task_execs[idx].completion_times.push(time);
        self.task_execs[idx].deadlines_met += 1;

        if self.running_task == Some(task_id) {
            self.running_task = None;
        }
    }

    /// Restores `current_budget` to full and schedules the next
    /// replenishment. Never scheduled for the synthetic root.
    fn handle_budget_replenish(&mut self, component_id: ComponentId, time: Time) {
        let component = self.topology.component_mut(component_id);
        component.current_budget = component.budget;
        let period = component.period;
        component.next_replenish_time = time + period;

        self.schedule(time + period, EventKind::BudgetReplenish(component_id));
    }
}
