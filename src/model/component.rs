use super::{ComponentId, TaskId, Time};

/// Local scheduling policy of a [`Component`], or the platform-wide policy of
/// a [`super::Core`].
#[derive(Clone, Copy, Debug, Default)]
#[derive(PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Scheduler {
    #[default]
    #[serde(rename = "RM")]
    RateMonotonic,
    #[serde(rename = "EDF")]
    EarliestDeadlineFirst,
}

/// The Bounded-Delay Resource interface derived from a component's (budget,
/// period) pair: `alpha = Q / P` is the long-run availability factor, `delta
/// = 2 * (P - Q)` is the worst-case partition delay before supply starts
/// accruing at that rate.
#[derive(Clone, Copy, Debug)]
pub struct BdrInterface {
    pub alpha: f64,
    pub delta: Time,
}

impl BdrInterface {
    /// `None` when `period == 0`: the component has no meaningful interface
    /// (the synthetic root, or a misconfigured component caught earlier by
    /// validation) and is therefore guarded as having zero supply.
    pub fn from_budget_period(budget: Time, period: Time) -> Option<Self> {
        if period.is_close_to_zero() {
            return None;
        }

        Some(Self {
            alpha: budget.value() / period.value(),
            delta: 2.0 * (period - budget),
        })
    }

    /// The Supply-Bound Function: a lower bound on the resource supplied
    /// over an interval of length `t` since the component last started being
    /// serviced. Zero before the partition delay elapses.
    pub fn supply_bound(&self, t: Time) -> Time {
        if t >= self.delta {
            self.alpha * (t - self.delta)
        } else {
            Time::ZERO
        }
    }
}

/// A component's children are either all tasks (a *terminal* component) or
/// all components (non-terminal) — the two shapes are modelled as distinct
/// variants so the invariant "no mixing at one level" is enforced by
/// construction rather than checked at runtime.
#[derive(Clone, Debug)]
pub enum ComponentChildren {
    Terminal(Vec<TaskId>),
    NonTerminal(Vec<ComponentId>),
}

impl ComponentChildren {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ComponentChildren::Terminal(_))
    }

    pub fn tasks(&self) -> Option<&[TaskId]> {
        match self {
            ComponentChildren::Terminal(tasks) => Some(tasks),
            ComponentChildren::NonTerminal(_) => None,
        }
    }

    pub fn components(&self) -> Option<&[ComponentId]> {
        match self {
            ComponentChildren::Terminal(_) => None,
            ComponentChildren::NonTerminal(children) => Some(children),
        }
    }
}

/// A node in the scheduling hierarchy: either the synthetic core root, or a
/// budget/period-bounded component below it.
///
/// `current_budget`/`next_replenish_time` are present from construction (see
/// Design Notes: no dynamic attribute attachment at simulation time) but are
/// only meaningful once a [`crate::sim::Simulation`] has initialised them;
/// the analyser never reads them.
#[derive(Clone, Debug)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub parent: Option<ComponentId>,
    pub scheduler: Scheduler,
    pub budget: Time,
    pub period: Time,
    pub priority: i64,
    pub interface: Option<BdrInterface>,
    pub children: ComponentChildren,

    pub current_budget: Time,
    pub next_replenish_time: Time,
}

impl Component {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.children.is_terminal()
    }

    /// The priority key used by a parent scheduling over this component:
    /// period under RM, next replenishment time (a proxy for the next
    /// implicit deadline) under EDF. See the Open Question resolution in
    /// DESIGN.md for why EDF uses `next_replenish_time` rather than `period`.
    pub fn priority_key(&self, parent_scheduler: Scheduler) -> f64 {
        match parent_scheduler {
            Scheduler::RateMonotonic => self.period.value(),
            Scheduler::EarliestDeadlineFirst => self.next_replenish_time.value(),
        }
    }
}
