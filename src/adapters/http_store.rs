use reqwest::Client;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::model::{ArtifactRef, ArtifactSpec};
use crate::domain::ports::ArtifactStore;
use crate::utils::error::{CleanError, Result};

/// Client for a REST artifact tracking service. Fetched files land in
/// `download_dir`; publishing registers the artifact first, then uploads
/// the file bytes under the version the service assigned.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: String,
    download_dir: PathBuf,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct RegisteredArtifact {
    version: String,
}

impl HttpStore {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(base_url: S, download_dir: P) -> Self {
        Self::with_client(base_url, download_dir, Client::new())
    }

    pub fn with_timeout<S: Into<String>, P: Into<PathBuf>>(
        base_url: S,
        download_dir: P,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, download_dir, client))
    }

    fn with_client<S: Into<String>, P: Into<PathBuf>>(
        base_url: S,
        download_dir: P,
        client: Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            download_dir: download_dir.into(),
            client,
        }
    }

    fn version_url(&self, name: &str, version: &str) -> String {
        format!("{}/artifacts/{}/versions/{}", self.base_url, name, version)
    }
}

impl ArtifactStore for HttpStore {
    async fn fetch(&self, reference: &ArtifactRef) -> Result<PathBuf> {
        let version = reference.version_or_latest();
        let url = format!("{}/file", self.version_url(&reference.name, version));
        tracing::debug!("Downloading artifact from: {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CleanError::NotFoundError {
                reference: reference.to_string(),
            });
        }
        let bytes = response.error_for_status()?.bytes().await?;

        fs::create_dir_all(&self.download_dir)?;
        let target = self
            .download_dir
            .join(format!("{}-{}", version, reference.name));
        fs::write(&target, &bytes)?;

        tracing::debug!("Saved {} bytes to {}", bytes.len(), target.display());
        Ok(target)
    }

    async fn publish(&self, spec: &ArtifactSpec, file: &Path) -> Result<String> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CleanError::PublishError {
                message: format!("{} has no usable file name", file.display()),
            })?;

        let register_url = format!("{}/artifacts", self.base_url);
        tracing::debug!("Registering artifact at: {}", register_url);

        let body = serde_json::json!({
            "name": spec.name,
            "artifact_type": spec.artifact_type,
            "description": spec.description,
            "job_type": spec.job_type,
            "file_name": file_name,
            "run_config": spec.run_config,
        });
        let response = self.client.post(&register_url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(CleanError::PublishError {
                message: format!("registration of '{}' failed: {}", spec.name, response.status()),
            });
        }
        let registered: RegisteredArtifact = response.json().await?;

        let upload_url = format!("{}/file", self.version_url(&spec.name, &registered.version));
        tracing::debug!("Uploading file to: {}", upload_url);

        let data = fs::read(file)?;
        let response = self
            .client
            .put(&upload_url)
            .header("Content-Type", "text/csv")
            .body(data)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CleanError::PublishError {
                message: format!("upload of '{}' failed: {}", spec.name, response.status()),
            });
        }

        Ok(self.version_url(&spec.name, &registered.version))
    }
}
