//! Schedulability analyser: SBF/DBF primitives, per-component RM/EDF tests,
//! and the core-level utilisation admission test.
//!
//! Mirrors the teacher's `SchedAnalysis` trait shape (`analyzer_name`,
//! `check_preconditions`, `run_test`) from
//! `algorithms/full_preemption/uniprocessor/fixed_priority/rate_monotonic73.rs`,
//! generalized from "a taskset against an implicit CPU" to "a taskset
//! against a component's BDR-supplied budget".

pub mod prelude {
    pub use super::{
        dbf,
        core_admission,
        ComponentAnalysisResult,
        analyse_component,
        analyse_core,
        CoreAnalysisResult,
    };
}

pub mod dbf;
pub mod core_admission;
mod component;
mod engine;

pub use component::{analyse_component, ComponentAnalysisResult};
pub use engine::{analyse_core, CoreAnalysisResult};
