//! Demand-Bound Function primitives.

use crate::model::prelude::*;

/// The demand a higher-priority-ordered task set places on the component up
/// to `t`, for the task at `index` in `sorted_by_priority` (ascending
/// priority value — smaller means higher priority, so every task before
/// `index` is higher priority).
pub fn dbf_rm(sorted_by_priority: &[&Task], index: usize, t: Time) -> Time {
    let task = sorted_by_priority[index];
    let mut demand = task.wcet;

    for higher in &sorted_by_priority[..index] {
        demand += t.ceil_div(higher.period) * higher.wcet;
    }

    demand
}

/// Total demand of every task in the set at time `t`. Since deadline equals
/// period here, `ceil((t + P - D) / P)` reduces to `floor(t/P) + 1` for
/// `t >= 0`.
pub fn dbf_edf(tasks: &[&Task], t: Time) -> Time {
    tasks.iter()
        .map(|task| (t.floor_div(task.period) + 1.0) * task.wcet)
        .sum()
}

/// Least common multiple of the given task periods, with `lcm(0, x) = 0`.
/// `tasks` is assumed non-empty by callers (an empty terminal component is
/// vacuously schedulable and never reaches this sweep).
pub fn hyperperiod(tasks: &[&Task]) -> Time {
    let hyperperiod_units = tasks.iter()
        .map(|task| task.period.value().round() as u64)
        .fold(1u64, num::integer::lcm);

    Time::new(hyperperiod_units as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, wcet: f64, period: f64, priority: i64) -> Task {
        Task {
            id: TaskId(0),
            name: name.to_string(),
            wcet: Time::new(wcet),
            period: Time::new(period),
            component_id: ComponentId(0),
            priority,
        }
    }

    #[test]
    fn dbf_rm_includes_only_strictly_higher_priority_tasks() {
        let high = task("hi", 1.0, 5.0, 0);
        let low = task("lo", 2.0, 10.0, 1);
        let sorted = vec![&high, &low];

        let demand_hi = dbf_rm(&sorted, 0, Time::new(5.0));
        assert!(demand_hi.approx_eq(Time::new(1.0)));

        let demand_lo = dbf_rm(&sorted, 1, Time::new(5.0));
        assert!(demand_lo.approx_eq(Time::new(3.0)));
    }

    #[test]
    fn hyperperiod_of_single_task_is_its_period() {
        let t = task("t1", 1.0, 7.0, 0);
        assert!(hyperperiod(&[&t]).approx_eq(Time::new(7.0)));
    }

    #[test]
    fn dbf_edf_sums_all_tasks_at_zero() {
        let t1 = task("t1", 1.0, 5.0, 0);
        let t2 = task("t2", 2.0, 10.0, 0);
        let demand = dbf_edf(&[&t1, &t2], Time::ZERO);
        assert!(demand.approx_eq(Time::new(3.0)));
    }
}
