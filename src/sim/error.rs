use crate::model::prelude::*;

/// The one fatal category a simulation run can raise: an internal invariant
/// broke. Everything else a run can report — admission failure, deadline
/// misses — is a *result*, surfaced through [`super::SimulationReport`],
/// never this.
#[derive(Clone, Debug)]
pub enum SimError {
    NegativeBudget { component_id: ComponentId, current_budget: f64 },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::NegativeBudget { component_id, current_budget } =>
                write!(f, "{component_id} current_budget went negative ({current_budget:.9}) after charging"),
        }
    }
}

impl std::error::Error for SimError {}
