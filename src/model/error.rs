/// A configuration error found while building a [`super::Topology`] from the
/// externally-parsed architecture/budgets/tasks rows — caught before any
/// analysis or simulation runs, never surfaced mid-run.
///
/// [`super::Topology::build`] accumulates every error it finds rather than
/// stopping at the first one, so a caller can report all of them in one pass
/// (mirroring the teacher's `TasksetParseError`, which already names the
/// specific field that failed to parse).
#[derive(Clone, Debug)]
pub enum ConfigError {
    UnknownCore { component_id: String, core_id: String },
    UnknownComponent { task_name: String, component_id: String },
    NegativeBudget { component_id: String, budget: f64 },
    NegativePeriod { component_id: String, period: f64 },
    BudgetExceedsPeriod { component_id: String, budget: f64, period: f64 },
    InvalidScheduler { owner: String, value: String },
    NonPositiveSpeedFactor { core_id: String, speed_factor: f64 },
    NonPositiveWcet { task_name: String, wcet: f64 },
    NonPositivePeriod { task_name: String, period: i64 },
    MixedChildren { component_id: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnknownCore { component_id, core_id } =>
                write!(f, "component '{component_id}' refers to unknown core '{core_id}'"),
            ConfigError::UnknownComponent { task_name, component_id } =>
                write!(f, "task '{task_name}' refers to unknown component '{component_id}'"),
            ConfigError::NegativeBudget { component_id, budget } =>
                write!(f, "component '{component_id}' has negative budget {budget}"),
            ConfigError::NegativePeriod { component_id, period } =>
                write!(f, "component '{component_id}' has negative period {period}"),
            ConfigError::BudgetExceedsPeriod { component_id, budget, period } =>
                write!(f, "component '{component_id}' has budget {budget} greater than period {period}"),
            ConfigError::InvalidScheduler { owner, value } =>
                write!(f, "'{owner}' has invalid scheduler '{value}' (expected RM or EDF)"),
            ConfigError::NonPositiveSpeedFactor { core_id, speed_factor } =>
                write!(f, "core '{core_id}' has non-positive speed factor {speed_factor}"),
            ConfigError::NonPositiveWcet { task_name, wcet } =>
                write!(f, "task '{task_name}' has non-positive wcet {wcet}"),
            ConfigError::NonPositivePeriod { task_name, period } =>
                write!(f, "task '{task_name}' has non-positive period {period}"),
            ConfigError::MixedChildren { component_id } =>
                write!(f, "component '{component_id}' mixes task and component children"),
        }
    }
}

impl std::error::Error for ConfigError {}
