//! The core-level utilisation admission test, treating each direct child
//! component as a periodic task with execution `Q` and period `P`.
//!
//! Mirrors `algorithms/.../fixed_priority/rate_monotonic73.rs::Analysis`'s
//! Liu & Layland bound, generalized from a task set to a component set.

use crate::model::prelude::*;

/// `U = sum(Q_c / P_c)` over the core's direct children. Schedulable iff
/// `U <= n * (2^(1/n) - 1)` under RM, or `U <= 1.0` under EDF.
pub fn is_schedulable(core: &Core, children: &[&Component]) -> bool {
    if children.is_empty() {
        return true;
    }

    let utilisation: f64 = children.iter()
        .map(|c| c.budget.value() / c.period.value())
        .sum();

    match core.scheduler {
        Scheduler::RateMonotonic => {
            let n = children.len() as f64;
            utilisation <= n * (2f64.powf(1.0 / n) - 1.0)
        }
        Scheduler::EarliestDeadlineFirst => utilisation <= 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(budget: f64, period: f64) -> Component {
        let budget = Time::new(budget);
        let period = Time::new(period);
        Component {
            id: ComponentId(1),
            name: "compA".to_string(),
            parent: Some(ComponentId(0)),
            scheduler: Scheduler::RateMonotonic,
            budget,
            period,
            priority: 0,
            interface: BdrInterface::from_budget_period(budget, period),
            children: ComponentChildren::Terminal(Vec::new()),
            current_budget: budget,
            next_replenish_time: period,
        }
    }

    #[test]
    fn edf_core_passes_at_utilisation_one() {
        let core = Core { id: "core0".to_string(), speed_factor: 1.0, scheduler: Scheduler::EarliestDeadlineFirst };
        let a = component(1.0, 2.0);
        let b = component(1.0, 2.0);
        assert!(is_schedulable(&core, &[&a, &b]));
    }

    #[test]
    fn edf_core_fails_above_utilisation_one() {
        let core = Core { id: "core0".to_string(), speed_factor: 1.0, scheduler: Scheduler::EarliestDeadlineFirst };
        let a = component(2.0, 2.0);
        let b = component(1.0, 2.0);
        assert!(!is_schedulable(&core, &[&a, &b]));
    }

    #[test]
    fn rm_core_uses_liu_layland_bound() {
        let core = Core { id: "core0".to_string(), speed_factor: 1.0, scheduler: Scheduler::RateMonotonic };
        // Two components at utilisation 0.41 each => total 0.82, under the
        // two-task LUB of 2*(2^0.5 - 1) ~= 0.828.
        let a = component(0.41, 1.0);
        let b = component(0.41, 1.0);
        assert!(is_schedulable(&core, &[&a, &b]));
    }
}
