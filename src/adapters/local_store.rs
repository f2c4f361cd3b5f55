use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::model::{ArtifactRef, ArtifactSpec};
use crate::domain::ports::ArtifactStore;
use crate::utils::error::{CleanError, Result};

pub const METADATA_FILE: &str = "metadata.json";

/// Directory-backed artifact registry: `<root>/<name>/<vN>/` holds the data
/// file plus `metadata.json`. Versions count up from v0; `latest` (or an
/// absent version) resolves to the highest one.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub name: String,
    pub version: String,
    pub artifact_type: String,
    pub description: String,
    pub job_type: String,
    pub file_name: String,
    pub run_config: BTreeMap<String, String>,
    pub created_at: String,
}

impl LocalStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn not_found(reference: &ArtifactRef) -> CleanError {
        CleanError::NotFoundError {
            reference: reference.to_string(),
        }
    }

    fn resolve_version_dir(&self, reference: &ArtifactRef) -> Result<PathBuf> {
        let name_dir = self.root.join(&reference.name);
        if !name_dir.is_dir() {
            return Err(Self::not_found(reference));
        }

        match reference.version_or_latest() {
            "latest" => {
                let mut best: Option<(u64, PathBuf)> = None;
                for entry in fs::read_dir(&name_dir)? {
                    let entry = entry?;
                    if let Some(n) = entry.file_name().to_str().and_then(parse_version) {
                        if best.as_ref().map_or(true, |(b, _)| n > *b) {
                            best = Some((n, entry.path()));
                        }
                    }
                }
                best.map(|(_, path)| path)
                    .ok_or_else(|| Self::not_found(reference))
            }
            version => {
                let version_dir = name_dir.join(version);
                if version_dir.is_dir() {
                    Ok(version_dir)
                } else {
                    Err(Self::not_found(reference))
                }
            }
        }
    }

    fn next_version(&self, name: &str) -> Result<u64> {
        let name_dir = self.root.join(name);
        if !name_dir.is_dir() {
            return Ok(0);
        }

        let mut next = 0;
        for entry in fs::read_dir(&name_dir)? {
            let entry = entry?;
            if let Some(n) = entry.file_name().to_str().and_then(parse_version) {
                next = next.max(n + 1);
            }
        }
        Ok(next)
    }
}

fn parse_version(dir_name: &str) -> Option<u64> {
    dir_name.strip_prefix('v')?.parse().ok()
}

impl ArtifactStore for LocalStore {
    async fn fetch(&self, reference: &ArtifactRef) -> Result<PathBuf> {
        let version_dir = self.resolve_version_dir(reference)?;

        // The version directory holds exactly one data file next to the metadata.
        for entry in fs::read_dir(&version_dir)? {
            let entry = entry?;
            if entry.file_name() != METADATA_FILE && entry.path().is_file() {
                return Ok(entry.path());
            }
        }
        Err(Self::not_found(reference))
    }

    async fn publish(&self, spec: &ArtifactSpec, file: &Path) -> Result<String> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CleanError::PublishError {
                message: format!("{} has no usable file name", file.display()),
            })?;

        let version = format!("v{}", self.next_version(&spec.name)?);
        let version_dir = self.root.join(&spec.name).join(&version);
        fs::create_dir_all(&version_dir)?;

        let target = version_dir.join(file_name);
        fs::copy(file, &target)?;

        let metadata = ArtifactMetadata {
            name: spec.name.clone(),
            version,
            artifact_type: spec.artifact_type.clone(),
            description: spec.description.clone(),
            job_type: spec.job_type.clone(),
            file_name: file_name.to_string(),
            run_config: spec.run_config.clone(),
            created_at: Utc::now().to_rfc3339(),
        };
        let metadata_json = serde_json::to_string_pretty(&metadata)?;
        fs::write(version_dir.join(METADATA_FILE), metadata_json)?;

        Ok(target.display().to_string())
    }
}
