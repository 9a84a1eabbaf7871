use crate::model::prelude::*;
use super::task_execution::TaskExecution;

/// The per-task output row, one per [`Task`] in the topology.
#[derive(Clone, Debug)]
#[derive(serde::Serialize)]
pub struct TaskStats {
    pub task_name: String,
    pub component_id: String,
    pub core_id: String,
    pub task_schedulable: bool,
    pub component_schedulable: bool,
    pub avg_response_time: f64,
    pub max_response_time: f64,
    pub deadlines_met: u64,
    pub deadlines_missed: u64,
}

impl TaskStats {
    pub(super) fn from_execution(topology: &Topology, task: &Task, exec: &TaskExecution) -> Self {
        let count = exec.response_times.len();
        let avg_response_time = if count == 0 {
            0.0
        } else {
            exec.response_times.iter().map(Time::value).sum::<f64>() / count as f64
        };
        let max_response_time = exec.response_times.iter()
            .map(Time::value)
            .fold(0.0, f64::max);

        TaskStats {
            task_name: task.name.clone(),
            component_id: topology.component(task.component_id).name.clone(),
            core_id: topology.core.id.clone(),
            task_schedulable: exec.schedulable,
            // Filled in once every task's row exists; see `fill_component_schedulable`.
            component_schedulable: false,
            avg_response_time,
            max_response_time,
            deadlines_met: exec.deadlines_met,
            deadlines_missed: exec.deadlines_missed,
        }
    }
}

/// True iff every task of `component_id` is `task_schedulable`.
pub fn component_schedulable(tasks: &[TaskStats], component_id: &str) -> bool {
    tasks.iter()
        .filter(|t| t.component_id == component_id)
        .all(|t| t.task_schedulable)
}

/// Back-fills each row's `component_schedulable` from the full set of rows,
/// since the per-task verdict can't be known until every task of its
/// component has been turned into a [`TaskStats`].
pub(super) fn fill_component_schedulable(tasks: &mut [TaskStats]) {
    let verdicts: Vec<bool> = tasks.iter()
        .map(|t| component_schedulable(tasks, &t.component_id))
        .collect();
    for (task, verdict) in tasks.iter_mut().zip(verdicts) {
        task.component_schedulable = verdict;
    }
}

/// The full output of one [`super::Simulation::run`]: a stats row per task.
#[derive(Clone, Debug)]
#[derive(serde::Serialize)]
pub struct SimulationReport {
    pub tasks: Vec<TaskStats>,
}
