use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::cleaning;
use crate::core::{ArtifactRef, ArtifactSpec, ArtifactStore, ConfigProvider, Pipeline, Table};
use crate::utils::error::Result;

/// The intermediate file left in the work directory before registration.
/// Kept on disk after the run, matching the behaviour of the wider pipeline.
pub const CLEANED_FILE_NAME: &str = "clean_sample.csv";

pub struct CleaningPipeline<S: ArtifactStore, C: ConfigProvider> {
    store: S,
    config: C,
}

impl<S: ArtifactStore, C: ConfigProvider> CleaningPipeline<S, C> {
    pub fn new(store: S, config: C) -> Self {
        Self { store, config }
    }
}

#[async_trait::async_trait]
impl<S: ArtifactStore, C: ConfigProvider> Pipeline for CleaningPipeline<S, C> {
    async fn fetch(&self) -> Result<Table> {
        let reference = ArtifactRef::parse(self.config.input_artifact());
        tracing::info!("📥 Getting input artifact '{}'", reference);

        let local_path = self.store.fetch(&reference).await?;
        tracing::debug!("Resolved '{}' to {}", reference, local_path.display());

        let table = read_table(&local_path)?;
        tracing::debug!(
            "Loaded {} rows, {} columns",
            table.len(),
            table.headers().len()
        );
        Ok(table)
    }

    async fn clean(&self, table: Table) -> Result<Table> {
        let min_price = self.config.min_price();
        let max_price = self.config.max_price();

        tracing::info!(
            "🧹 Dropping outliers outside the range ({}, {})",
            min_price,
            max_price
        );
        tracing::info!("📅 Converting last_review column to datetime format");

        cleaning::clean_table(&table, min_price, max_price)
    }

    async fn publish(&self, table: Table) -> Result<String> {
        let work_dir = Path::new(self.config.work_dir());
        fs::create_dir_all(work_dir)?;
        let cleaned_path = work_dir.join(CLEANED_FILE_NAME);

        tracing::info!("💾 Saving cleaned csv to {}", cleaned_path.display());
        write_table(&table, &cleaned_path)?;

        let mut run_config = BTreeMap::new();
        run_config.insert(
            "input_artifact".to_string(),
            self.config.input_artifact().to_string(),
        );
        run_config.insert("min_price".to_string(), self.config.min_price().to_string());
        run_config.insert("max_price".to_string(), self.config.max_price().to_string());

        let spec = ArtifactSpec::new(
            self.config.output_artifact(),
            self.config.output_type(),
            self.config.output_description(),
        )
        .with_run_config(run_config);

        tracing::info!("📤 Logging output artifact '{}'", spec.name);
        let locator = self.store.publish(&spec, &cleaned_path).await?;

        Ok(locator)
    }
}

fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(table)
}

fn write_table(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
