use ordered_float::OrderedFloat;

use crate::model::prelude::*;
use super::simulation::Simulation;
use super::task_execution::TaskState;

impl Simulation {
    /// Re-selects after any event or budget change. Preempts the running
    /// task when a strictly higher-priority one (possibly in a different
    /// component) becomes eligible; otherwise leaves it running.
    pub(super) fn make_scheduling_decision(&mut self) {
        let Some(component_id) = self.select_component(self.topology.root) else {
            if let Some(running) = self.running_task.take() {
                self.requeue(running);
            }
            return;
        };

        // A different component than the one hosting running_task was
        // selected: that component no longer wins the walk, so its task is
        // preempted even before we look at what else is eligible inside it.
        if let Some(running) = self.running_task {
            if self.task_execs[running.0 as usize].component_id != component_id {
                self.running_task = None;
                self.requeue(running);
            }
        }

        let scheduler = self.topology.component(component_id).scheduler;
        let ready_best = self.ready_queues[component_id.0 as usize].peek()
            .map(|id| (OrderedFloat(self.task_execs[id.0 as usize].priority_key(scheduler)), id));
        let running_here = self.running_task
            .filter(|&id| self.task_execs[id.0 as usize].component_id == component_id)
            .map(|id| (OrderedFloat(self.task_execs[id.0 as usize].priority_key(scheduler)), id));

        // Compare only the priority key here, not the `(key, id)` pair: a
        // tied key must never preempt the running task, even though the
        // ready queue itself breaks ties on id to pick among several ready
        // entries.
        let chosen = match (ready_best, running_here) {
            (Some(ready), Some(running)) => Some(if ready.0 < running.0 { ready.1 } else { running.1 }),
            (Some((_, id)), None) => Some(id),
            (None, Some((_, id))) => Some(id),
            (None, None) => None,
        };

        let Some(chosen_task) = chosen else { return };

        if self.running_task != Some(chosen_task) {
            if let Some(old) = self.running_task.take() {
                self.requeue(old);
            }
            self.ready_queues[component_id.0 as usize].remove(chosen_task);
            self.task_execs[chosen_task.0 as usize].state = TaskState::Running;
            self.running_task = Some(chosen_task);
        }
    }

    /// Depth-first walk choosing, at each non-leaf, the child with the
    /// smallest priority key; backtracks to the next-best child when a leaf
    /// candidate is rejected for lacking budget or eligible work.
    fn select_component(&self, component_id: ComponentId) -> Option<ComponentId> {
        let component = self.topology.component(component_id);
        match &component.children {
            ComponentChildren::Terminal(_) => {
                let available = self.path_available_budget(component_id);
                let hosts_running = self.running_task
                    .is_some_and(|t| self.task_execs[t.0 as usize].component_id == component_id);
                let ready_non_empty = !self.ready_queues[component_id.0 as usize].is_empty();

                (available.value() > EPSILON && (ready_non_empty || hosts_running))
                    .then_some(component_id)
            }
            ComponentChildren::NonTerminal(children) => {
                let mut candidates: Vec<ComponentId> = children.clone();
                candidates.sort_by(|&a, &b| {
                    let ka = self.topology.component(a).priority_key(component.scheduler);
                    let kb = self.topology.component(b).priority_key(component.scheduler);
                    ka.partial_cmp(&kb).unwrap().then_with(|| a.cmp(&b))
                });
                candidates.into_iter().find_map(|child| self.select_component(child))
            }
        }
    }

    /// `min(current_budget)` over the path from root to `component_id`,
    /// root excluded.
    pub(super) fn path_available_budget(&self, component_id: ComponentId) -> Time {
        self.topology.ancestors_excluding_root(component_id).into_iter()
            .map(|id| self.topology.component(id).current_budget)
            .fold(Time::new(f64::INFINITY), Time::min)
    }

    pub(super) fn requeue(&mut self, task_id: TaskId) {
        let exec = &mut self.task_execs[task_id.0 as usize];
        exec.state = TaskState::Ready;
        let component_id = exec.component_id;
        let key = exec.priority_key(self.topology.component(component_id).scheduler);
        self.ready_queues[component_id.0 as usize].push(task_id, key);
    }
}
