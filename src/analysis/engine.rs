//! Top-level analyser facade tying the core admission test together with
//! per-component schedulability.

use crate::model::prelude::*;
use super::component::{analyse_component, ComponentAnalysisResult};
use super::core_admission;

/// Outcome of analysing an entire core: the admission verdict, plus a
/// per-component result for every terminal component reachable from the
/// root — empty when admission itself failed, in which case every component
/// is implicitly unschedulable.
#[derive(Clone, Debug)]
#[derive(serde::Serialize)]
pub struct CoreAnalysisResult {
    pub core_admitted: bool,
    pub components: Vec<ComponentAnalysisResult>,
}

impl CoreAnalysisResult {
    pub fn is_component_schedulable(&self, component_id: ComponentId) -> bool {
        self.core_admitted
            && self.components.iter()
                .find(|c| c.component_id == component_id)
                .is_some_and(|c| c.schedulable)
    }
}

/// Runs the full analyser over `topology`'s core.
pub fn analyse_core(topology: &Topology) -> CoreAnalysisResult {
    let direct_children: Vec<&Component> = topology.root_children().iter()
        .map(|&id| topology.component(id))
        .collect();

    if !core_admission::is_schedulable(&topology.core, &direct_children) {
        return CoreAnalysisResult { core_admitted: false, components: Vec::new() };
    }

    let mut components = Vec::new();
    let mut stack: Vec<ComponentId> = topology.root_children().to_vec();

    while let Some(id) = stack.pop() {
        let component = topology.component(id);
        match &component.children {
            ComponentChildren::Terminal(_) => components.push(analyse_component(topology, component)),
            ComponentChildren::NonTerminal(children) => stack.extend(children.iter().copied()),
        }
    }

    components.sort_by_key(|c| c.component_id);
    CoreAnalysisResult { core_admitted: true, components }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_for(scheduler: &str, budget: f64, period: f64, wcet: f64, task_period: i64) ->
        (Vec<crate::model::ArchitectureRow>, Vec<crate::model::BudgetRow>, Vec<crate::model::TaskRow>)
    {
        let architecture = vec![crate::model::ArchitectureRow {
            core_id: "core0".to_string(), speed_factor: 1.0, scheduler: scheduler.to_string(),
        }];
        let budgets = vec![crate::model::BudgetRow {
            component_id: "compA".to_string(), scheduler: scheduler.to_string(),
            budget, period, core_id: "core0".to_string(), priority: 0,
        }];
        let tasks = vec![crate::model::TaskRow {
            task_name: "t1".to_string(), wcet, period: task_period,
            component_id: "compA".to_string(), priority: 0,
        }];
        (architecture, budgets, tasks)
    }

    #[test]
    fn admitted_core_runs_component_analysis() {
        let (architecture, budgets, tasks) = rows_for("RM", 2.0, 4.0, 1.0, 4);
        let topology = Topology::build(&architecture, &budgets, &tasks, "core0").unwrap();

        let result = analyse_core(&topology);
        assert!(result.core_admitted);
        assert_eq!(result.components.len(), 1);
        assert!(result.components[0].schedulable);
    }

    #[test]
    fn failed_admission_skips_component_analysis() {
        // Two components at utilisation 0.5 each: total 1.0 exceeds the
        // two-child RM bound of 2*(2^0.5 - 1) ~= 0.8284, so admission fails
        // and no component is analysed further.
        let architecture = vec![crate::model::ArchitectureRow {
            core_id: "core0".to_string(), speed_factor: 1.0, scheduler: "RM".to_string(),
        }];
        let budgets = vec![
            crate::model::BudgetRow {
                component_id: "compA".to_string(), scheduler: "RM".to_string(),
                budget: 5.0, period: 10.0, core_id: "core0".to_string(), priority: 0,
            },
            crate::model::BudgetRow {
                component_id: "compB".to_string(), scheduler: "RM".to_string(),
                budget: 5.0, period: 10.0, core_id: "core0".to_string(), priority: 1,
            },
        ];
        let tasks = vec![
            crate::model::TaskRow {
                task_name: "t1".to_string(), wcet: 1.0, period: 10,
                component_id: "compA".to_string(), priority: 0,
            },
            crate::model::TaskRow {
                task_name: "t2".to_string(), wcet: 1.0, period: 10,
                component_id: "compB".to_string(), priority: 0,
            },
        ];
        let topology = Topology::build(&architecture, &budgets, &tasks, "core0").unwrap();

        let result = analyse_core(&topology);
        assert!(!result.core_admitted);
        assert!(result.components.is_empty());
    }
}
