/// Arena index of a [`super::Component`] inside a [`super::Topology`].
///
/// Per the Design Notes' arena+index guidance: parent/child relations are
/// stored as indices rather than back-pointers, so walking from a leaf up to
/// the root is a plain loop instead of a cycle of `Rc`/`Weak` pointers.
#[derive(Clone, Copy, Debug, Default)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ComponentId(pub u32);

/// Arena index of a [`super::Task`] inside a [`super::Topology`].
#[derive(Clone, Copy, Debug, Default)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TaskId(pub u32);

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task#{}", self.0)
    }
}
