pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpStore, LocalStore};
pub use config::StoreConfig;
pub use core::{pipeline::CleaningPipeline, runner::StepRunner};
pub use domain::model::{ArtifactRef, ArtifactSpec, Table};
pub use utils::error::{CleanError, Result};
