use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Job type recorded with every published artifact, mirroring the pipeline
/// step name under which the orchestrator runs this binary.
pub const JOB_TYPE: &str = "basic_cleaning";

/// An in-memory tabular dataset. Cells stay text exactly as they appear in
/// the delimited file; the empty string is the missing-value marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Rows must match the header width; the CSV reader already enforces this
    /// for loaded data.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column)).map(String::as_str)
    }
}

/// Reference to a registered artifact: `name` or `name:version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub name: String,
    pub version: Option<String>,
}

impl ArtifactRef {
    /// Split on the last `:`; everything before it is the name. A missing or
    /// empty version means "latest".
    pub fn parse(reference: &str) -> Self {
        match reference.rsplit_once(':') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => Self {
                name: name.to_string(),
                version: Some(version.to_string()),
            },
            _ => Self {
                name: reference.trim_end_matches(':').to_string(),
                version: None,
            },
        }
    }

    pub fn version_or_latest(&self) -> &str {
        self.version.as_deref().unwrap_or("latest")
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Publish-side metadata for a new artifact. `run_config` carries the step
/// parameters so the store keeps provenance alongside the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub name: String,
    pub artifact_type: String,
    pub description: String,
    pub job_type: String,
    pub run_config: BTreeMap<String, String>,
}

impl ArtifactSpec {
    pub fn new(name: &str, artifact_type: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            artifact_type: artifact_type.to_string(),
            description: description.to_string(),
            job_type: JOB_TYPE.to_string(),
            run_config: BTreeMap::new(),
        }
    }

    pub fn with_run_config(mut self, run_config: BTreeMap<String, String>) -> Self {
        self.run_config = run_config;
        self
    }
}
