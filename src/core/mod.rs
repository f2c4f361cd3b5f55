pub mod cleaning;
pub mod pipeline;
pub mod runner;

pub use crate::domain::model::{ArtifactRef, ArtifactSpec, Table};
pub use crate::domain::ports::{ArtifactStore, ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
