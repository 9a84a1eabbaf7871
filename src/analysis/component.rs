//! Per-component schedulability, sweeping the DBF against the component's
//! BDR supply bound.

use crate::model::prelude::*;
use super::dbf::{dbf_edf, dbf_rm, hyperperiod};

/// Result of analysing one terminal component: overall schedulability plus
/// a per-task verdict, in task order as stored on the component.
#[derive(Clone, Debug)]
#[derive(serde::Serialize)]
pub struct ComponentAnalysisResult {
    pub component_id: ComponentId,
    pub schedulable: bool,
    pub task_schedulable: Vec<(TaskId, bool)>,
}

/// Runs the RM or EDF component test depending on `component.scheduler`.
/// Only meaningful for terminal components; callers are expected to only
/// invoke this on components whose children are tasks.
pub fn analyse_component(topology: &Topology, component: &Component) -> ComponentAnalysisResult {
    let task_ids = component.children.tasks().unwrap_or(&[]);
    let tasks: Vec<&Task> = task_ids.iter().map(|&id| topology.task(id)).collect();

    if tasks.is_empty() {
        return ComponentAnalysisResult {
            component_id: component.id,
            schedulable: true,
            task_schedulable: Vec::new(),
        };
    }

    match component.scheduler {
        Scheduler::RateMonotonic => analyse_rm(component, &tasks),
        Scheduler::EarliestDeadlineFirst => analyse_edf(component, &tasks),
    }
}

/// Tasks are considered in ascending-priority order (ties broken by task id
/// so the order is a strict total order); task `i` is schedulable iff some
/// sampled `t` in `0..=period` satisfies `DBF_RM(t) <= SBF(t)`.
fn analyse_rm(component: &Component, tasks: &[&Task]) -> ComponentAnalysisResult {
    let mut sorted: Vec<&Task> = tasks.to_vec();
    sorted.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));

    let mut task_schedulable = Vec::with_capacity(sorted.len());
    let mut schedulable = true;

    for (index, task) in sorted.iter().enumerate() {
        let mut ok = false;
        let period_units = task.period.value().round() as u64;

        let mut t_units = 0u64;
        while t_units <= period_units {
            let t = Time::new(t_units as f64);
            let demand = dbf_rm(&sorted, index, t);
            let supply = component_supply_bound(component, t);

            if demand <= supply {
                ok = true;
                break;
            }
            t_units += 1;
        }

        task_schedulable.push((task.id, ok));
        schedulable &= ok;
    }

    ComponentAnalysisResult { component_id: component.id, schedulable, task_schedulable }
}

/// Sweeps `t` over `0..=hyperperiod`; the first sample where demand exceeds
/// supply is conclusive, so the whole component (every task in it) is
/// reported unschedulable together.
fn analyse_edf(component: &Component, tasks: &[&Task]) -> ComponentAnalysisResult {
    let hyperperiod_units = hyperperiod(tasks).value().round() as u64;

    let mut schedulable = true;
    let mut t_units = 0u64;
    while t_units <= hyperperiod_units {
        let t = Time::new(t_units as f64);
        let demand = dbf_edf(tasks, t);
        let supply = component_supply_bound(component, t);

        if demand > supply {
            schedulable = false;
            break;
        }
        t_units += 1;
    }

    let task_schedulable = tasks.iter().map(|task| (task.id, schedulable)).collect();
    ComponentAnalysisResult { component_id: component.id, schedulable, task_schedulable }
}

/// A component with `period == 0` has no BDR interface and is guarded as
/// supplying zero resource at every instant.
fn component_supply_bound(component: &Component, t: Time) -> Time {
    match &component.interface {
        Some(interface) => interface.supply_bound(t),
        None => Time::ZERO,
    }
}
