use crate::domain::model::{ArtifactRef, ArtifactSpec, Table};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Contract with the external tracking store: resolve a reference to a local
/// file, and register a local file plus metadata as a new artifact.
pub trait ArtifactStore: Send + Sync {
    fn fetch(
        &self,
        reference: &ArtifactRef,
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;

    fn publish(
        &self,
        spec: &ArtifactSpec,
        file: &Path,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_artifact(&self) -> &str;
    fn output_artifact(&self) -> &str;
    fn output_type(&self) -> &str;
    fn output_description(&self) -> &str;
    fn min_price(&self) -> f64;
    fn max_price(&self) -> f64;
    fn work_dir(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch(&self) -> Result<Table>;
    async fn clean(&self, table: Table) -> Result<Table>;
    async fn publish(&self, table: Table) -> Result<String>;
}
