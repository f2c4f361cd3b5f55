use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Artifact not found: {reference}")]
    NotFoundError { reference: String },

    #[error("Artifact fetch failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input data has no '{column}' column")]
    MissingColumnError { column: String },

    #[error("Artifact publish failed: {message}")]
    PublishError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Network,
    Data,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CleanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CleanError::NotFoundError { .. } | CleanError::FetchError(_) => ErrorCategory::Network,
            CleanError::CsvError(_)
            | CleanError::MissingColumnError { .. }
            | CleanError::SerializationError(_) => ErrorCategory::Data,
            CleanError::IoError(_) | CleanError::PublishError { .. } => ErrorCategory::Storage,
            CleanError::ConfigError { .. } | CleanError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    /// Severity drives the process exit code. Medium failures are worth a
    /// re-run by the orchestrator before anything else.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CleanError::NotFoundError { .. }
            | CleanError::FetchError(_)
            | CleanError::PublishError { .. } => ErrorSeverity::Medium,
            CleanError::CsvError(_)
            | CleanError::MissingColumnError { .. }
            | CleanError::SerializationError(_)
            | CleanError::ConfigError { .. }
            | CleanError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            CleanError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CleanError::NotFoundError { reference } => format!(
                "Check that '{}' exists in the store and that the version tag is correct",
                reference
            ),
            CleanError::FetchError(_) => {
                "Check the store URL and network connectivity, then re-run the step".to_string()
            }
            CleanError::CsvError(_) => {
                "Inspect the input artifact: every row must match the header width".to_string()
            }
            CleanError::IoError(_) => {
                "Check disk space and directory permissions for the work directory".to_string()
            }
            CleanError::SerializationError(_) => {
                "The store returned or was given malformed JSON metadata".to_string()
            }
            CleanError::MissingColumnError { column } => format!(
                "The input dataset must carry a '{}' column; pick a different input artifact",
                column
            ),
            CleanError::PublishError { .. } => {
                "The artifact was cleaned but not registered; re-run to publish again".to_string()
            }
            CleanError::ConfigError { .. } | CleanError::InvalidConfigValueError { .. } => {
                "Fix the flagged argument or config field and re-run".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CleanError::NotFoundError { reference } => {
                format!("Input artifact '{}' could not be found", reference)
            }
            CleanError::FetchError(_) => "Could not reach the artifact store".to_string(),
            CleanError::CsvError(_) => "The input dataset is not valid CSV".to_string(),
            CleanError::IoError(e) => format!("File operation failed: {}", e),
            CleanError::SerializationError(_) => "Artifact metadata was malformed".to_string(),
            CleanError::MissingColumnError { column } => {
                format!("The input dataset has no '{}' column", column)
            }
            CleanError::PublishError { message } => {
                format!("Could not register the output artifact: {}", message)
            }
            CleanError::ConfigError { message } => message.clone(),
            CleanError::InvalidConfigValueError { field, reason, .. } => {
                format!("{}: {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
