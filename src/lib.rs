pub mod prelude {
    pub use super::model::prelude::*;
    pub use super::analysis::prelude::*;
    pub use super::sim::prelude::*;
}

pub mod model;
pub mod analysis;
pub mod sim;
