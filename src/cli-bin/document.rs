use hss_sim::prelude::*;

pub mod prelude {
    pub use super::{load_document, DocumentError, TopologyDocument};
}

/// The JSON document this CLI reads: the already-parsed architecture/
/// budgets/tasks tables, nested under one file so a single `-i` flag is
/// enough. CSV ingestion itself stays external — this is just the
/// construction step the library already owns (`Topology::build`) fed from
/// JSON instead of CSV.
#[derive(Clone, Debug)]
#[derive(serde::Deserialize)]
pub struct TopologyDocument {
    pub architecture: Vec<ArchitectureRow>,
    pub budgets: Vec<BudgetRow>,
    pub tasks: Vec<TaskRow>,
}

#[derive(Debug)]
pub enum DocumentError {
    IOError(std::io::Error),
    JSONError(serde_json::Error),
}

impl From<std::io::Error> for DocumentError {
    fn from(err: std::io::Error) -> Self {
        DocumentError::IOError(err)
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::JSONError(err)
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Topology document error, ")?;
        match self {
            DocumentError::IOError(err) => write!(f, "IO: {err}"),
            DocumentError::JSONError(err) => write!(f, "JSON: {err}"),
        }
    }
}

impl std::error::Error for DocumentError {}

pub fn load_document(path: &str) -> Result<TopologyDocument, DocumentError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
