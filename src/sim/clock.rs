use crate::model::prelude::*;
use super::error::SimError;
use super::event::EventKind;
use super::simulation::Simulation;

impl Simulation {
    /// Charges elapsed time to the running task and every ancestor's budget
    /// (root excluded), recursing on budget exhaustion so the remaining
    /// interval is re-dispatched to whichever task the scheduling decision
    /// picks next.
    pub(super) fn process_idle_time(&mut self, delta: Time) -> Result<(), SimError> {
        let Some(running) = self.running_task else {
            self.current_time += delta;
            return Ok(());
        };

        let component_id = self.task_execs[running.0 as usize].component_id;
        let path = self.topology.ancestors_excluding_root(component_id);
        let path_budget = path.iter()
            .map(|&id| self.topology.component(id).current_budget)
            .fold(Time::new(f64::INFINITY), Time::min);

        let remaining = self.task_execs[running.0 as usize].remaining_exec_time;
        let slice = remaining.min(path_budget).min(delta);

        self.task_execs[running.0 as usize].remaining_exec_time -= slice;
        for &id in &path {
            self.topology.component_mut(id).current_budget -= slice;
        }
        for &id in &path {
            let budget = self.topology.component(id).current_budget;
            if budget.value() < -EPSILON {
                return Err(SimError::NegativeBudget { component_id: id, current_budget: budget.value() });
            }
        }

        self.current_time += slice;

        if self.task_execs[running.0 as usize].is_complete() {
            let completion_time = self.current_time;
            self.schedule(completion_time, EventKind::TaskCompletion(running));
            return Ok(());
        }

        if (path_budget - slice).is_close_to_zero() {
            self.running_task = None;
            self.requeue(running);
            self.make_scheduling_decision();

            let remaining_delta = delta - slice;
            if remaining_delta.value() > EPSILON {
                return self.process_idle_time(remaining_delta);
            }
        }

        Ok(())
    }
}
