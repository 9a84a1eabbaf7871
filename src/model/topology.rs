use std::collections::HashMap;

use super::{BdrInterface, Component, ComponentChildren, ComponentId, ConfigError, Scheduler, Task, TaskId, Time};

/// The platform a [`Topology`] runs on: a single core with a speed factor
/// and a top-level admission scheduler for the core utilisation test.
#[derive(Clone, Debug)]
pub struct Core {
    pub id: String,
    pub speed_factor: f64,
    pub scheduler: Scheduler,
}

/// One row of the externally-parsed "architecture" table. Already
/// deserialized from CSV/JSON/whatever by the caller — this crate never
/// reads a CSV file itself.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ArchitectureRow {
    pub core_id: String,
    pub speed_factor: f64,
    pub scheduler: String,
}

/// One row of the externally-parsed "budgets" table.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct BudgetRow {
    pub component_id: String,
    pub scheduler: String,
    pub budget: f64,
    pub period: f64,
    pub core_id: String,
    pub priority: i64,
}

/// One row of the externally-parsed "tasks" table. `wcet` here is the raw
/// value from the table; [`Topology::build`] divides it by the owning
/// core's speed factor before storing it.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TaskRow {
    pub task_name: String,
    pub wcet: f64,
    pub period: i64,
    pub component_id: String,
    pub priority: i64,
}

/// The arena owning a single core's component tree and task set.
///
/// The three row tables only ever describe a flat hierarchy (every budget
/// row is a direct child of the synthetic root, since the table has no
/// parent-component column) — but [`Component`]/[`ComponentChildren`]
/// themselves support arbitrary nesting, so a caller assembling a `Topology`
/// by hand (as the tests below do) can build deeper trees than the row
/// format can express. See DESIGN.md.
#[derive(Clone, Debug)]
pub struct Topology {
    pub core: Core,
    pub root: ComponentId,
    components: Vec<Component>,
    tasks: Vec<Task>,
    name_to_component: HashMap<String, ComponentId>,
    name_to_task: HashMap<String, TaskId>,
}

impl Topology {
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.0 as usize]
    }

    pub fn component_mut(&mut self, id: ComponentId) -> &mut Component {
        &mut self.components[id.0 as usize]
    }

    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id.0 as usize]
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn component_by_name(&self, name: &str) -> Option<ComponentId> {
        self.name_to_component.get(name).copied()
    }

    pub fn task_by_name(&self, name: &str) -> Option<TaskId> {
        self.name_to_task.get(name).copied()
    }

    /// Ancestors of `id`, nearest first, stopping before the root (the root
    /// is excluded from every budget computation).
    pub fn ancestors_excluding_root(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut chain = Vec::new();
        let mut current = id;

        loop {
            if current == self.root {
                break;
            }
            chain.push(current);
            match self.component(current).parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        chain
    }

    /// Direct children of the core root.
    pub fn root_children(&self) -> &[ComponentId] {
        match &self.component(self.root).children {
            ComponentChildren::NonTerminal(children) => children,
            ComponentChildren::Terminal(_) => &[],
        }
    }

    /// Build a [`Topology`] for `target_core_id` from already-parsed rows,
    /// validating every configuration-error case. All errors found are
    /// returned together rather than stopping at the first.
    pub fn build(
        architecture: &[ArchitectureRow],
        budgets: &[BudgetRow],
        tasks: &[TaskRow],
        target_core_id: &str,
    ) -> Result<Topology, Vec<ConfigError>> {
        let mut errors = Vec::new();
        let known_cores: HashMap<&str, &ArchitectureRow> =
            architecture.iter().map(|row| (row.core_id.as_str(), row)).collect();

        let core_row = match known_cores.get(target_core_id) {
            Some(row) => *row,
            None => {
                errors.push(ConfigError::UnknownCore {
                    component_id: "<core root>".to_string(),
                    core_id: target_core_id.to_string(),
                });
                return Err(errors);
            }
        };

        if core_row.speed_factor <= 0.0 {
            errors.push(ConfigError::NonPositiveSpeedFactor {
                core_id: core_row.core_id.clone(),
                speed_factor: core_row.speed_factor,
            });
        }
        let core_scheduler = parse_scheduler(&core_row.scheduler, &core_row.core_id, &mut errors);

        let mut components = Vec::new();
        let mut name_to_component = HashMap::new();

        // Synthetic root: Q = P = 0, no interface, owns the direct children.
        let root_id = ComponentId(0);
        components.push(Component {
            id: root_id,
            name: format!("{target_core_id}::root"),
            parent: None,
            scheduler: core_scheduler.unwrap_or_default(),
            budget: Time::ZERO,
            period: Time::ZERO,
            priority: 0,
            interface: None,
            children: ComponentChildren::NonTerminal(Vec::new()),
            current_budget: Time::ZERO,
            next_replenish_time: Time::ZERO,
        });

        let mut root_children = Vec::new();

        for row in budgets.iter().filter(|row| row.core_id == target_core_id) {
            if !known_cores.contains_key(row.core_id.as_str()) {
                errors.push(ConfigError::UnknownCore {
                    component_id: row.component_id.clone(),
                    core_id: row.core_id.clone(),
                });
                continue;
            }
            if row.budget < 0.0 {
                errors.push(ConfigError::NegativeBudget {
                    component_id: row.component_id.clone(),
                    budget: row.budget,
                });
            }
            if row.period < 0.0 {
                errors.push(ConfigError::NegativePeriod {
                    component_id: row.component_id.clone(),
                    period: row.period,
                });
            }
            if row.budget > row.period {
                errors.push(ConfigError::BudgetExceedsPeriod {
                    component_id: row.component_id.clone(),
                    budget: row.budget,
                    period: row.period,
                });
            }
            let scheduler = parse_scheduler(&row.scheduler, &row.component_id, &mut errors);
            let Some(scheduler) = scheduler else { continue };
            if row.budget < 0.0 || row.period < 0.0 || row.budget > row.period {
                continue;
            }

            let budget = Time::new(row.budget);
            let period = Time::new(row.period);
            let id = ComponentId(components.len() as u32);

            components.push(Component {
                id,
                name: row.component_id.clone(),
                parent: Some(root_id),
                scheduler,
                budget,
                period,
                priority: row.priority,
                interface: BdrInterface::from_budget_period(budget, period),
                children: ComponentChildren::Terminal(Vec::new()),
                current_budget: budget,
                next_replenish_time: period,
            });

            name_to_component.insert(row.component_id.clone(), id);
            root_children.push(id);
        }

        components[root_id.0 as usize].children = ComponentChildren::NonTerminal(root_children);

        let mut task_list = Vec::new();
        let mut name_to_task = HashMap::new();

        for row in tasks {
            let Some(&component_id) = name_to_component.get(&row.component_id) else {
                // Only an error if the task's component claims to live on this
                // core's budgets but wasn't found there; tasks belonging to
                // other cores are simply not part of this topology.
                if budgets.iter().any(|b| b.component_id == row.component_id && b.core_id != target_core_id) {
                    continue;
                }
                errors.push(ConfigError::UnknownComponent {
                    task_name: row.task_name.clone(),
                    component_id: row.component_id.clone(),
                });
                continue;
            };

            if row.wcet <= 0.0 {
                errors.push(ConfigError::NonPositiveWcet { task_name: row.task_name.clone(), wcet: row.wcet });
            }
            if row.period <= 0 {
                errors.push(ConfigError::NonPositivePeriod { task_name: row.task_name.clone(), period: row.period });
            }

            let task_id = TaskId(task_list.len() as u32);
            let wcet = Time::new(row.wcet / core_row.speed_factor);

            task_list.push(Task {
                id: task_id,
                name: row.task_name.clone(),
                wcet,
                period: Time::new(row.period as f64),
                component_id,
                priority: row.priority,
            });
            name_to_task.insert(row.task_name.clone(), task_id);

            match &mut components[component_id.0 as usize].children {
                ComponentChildren::Terminal(children) => children.push(task_id),
                ComponentChildren::NonTerminal(_) => {
                    errors.push(ConfigError::MixedChildren { component_id: row.component_id.clone() });
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Topology {
            core: Core {
                id: core_row.core_id.clone(),
                speed_factor: core_row.speed_factor,
                scheduler: core_scheduler.unwrap(),
            },
            root: root_id,
            components,
            tasks: task_list,
            name_to_component,
            name_to_task,
        })
    }
}

impl Topology {
    /// Hand-assembles a [`Topology`] from already-built components/tasks,
    /// for tests that need a deeper hierarchy than the row-based `build`
    /// can express (its rows only ever describe a flat core -> components ->
    /// tasks tree, per the struct doc comment above).
    #[cfg(test)]
    pub(crate) fn from_parts(core: Core, root: ComponentId, components: Vec<Component>, tasks: Vec<Task>) -> Topology {
        let name_to_component = components.iter().map(|c| (c.name.clone(), c.id)).collect();
        let name_to_task = tasks.iter().map(|t| (t.name.clone(), t.id)).collect();
        Topology { core, root, components, tasks, name_to_component, name_to_task }
    }
}

fn parse_scheduler(value: &str, owner: &str, errors: &mut Vec<ConfigError>) -> Option<Scheduler> {
    match value {
        "RM" => Some(Scheduler::RateMonotonic),
        "EDF" => Some(Scheduler::EarliestDeadlineFirst),
        other => {
            errors.push(ConfigError::InvalidScheduler { owner: owner.to_string(), value: other.to_string() });
            None
        }
    }
}
