//! Static data model: cores, components, tasks, and the arena that owns them.
//!
//! Components and tasks are stored by value in the [`Topology`] arena and
//! referenced by index ([`ComponentId`]/[`TaskId`]) rather than through
//! parent/child pointers, so the tree can be walked upward (leaf to root)
//! with a simple index loop instead of back-pointers forming a cycle.

pub mod prelude {
    pub use super::{
        Time, EPSILON,
        Scheduler, BdrInterface,
        ComponentId, TaskId,
        Core, Component, ComponentChildren, Task,
        Topology, ArchitectureRow, BudgetRow, TaskRow,
        ConfigError,
    };
}

mod time;
mod ids;
mod component;
mod task;
mod topology;
mod error;

pub use time::{Time, EPSILON};
pub use ids::{ComponentId, TaskId};
pub use component::{BdrInterface, Component, ComponentChildren, Scheduler};
pub use task::Task;
pub use topology::{ArchitectureRow, BudgetRow, Core, TaskRow, Topology};
pub use error::ConfigError;
