use crate::config::StoreConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "listing-clean")]
#[command(about = "A very basic data cleaning step")]
pub struct CliConfig {
    #[arg(long = "input_artifact", help = "Name of the input artifact")]
    pub input_artifact: String,

    #[arg(long = "output_artifact", help = "Name of the output artifact")]
    pub output_artifact: String,

    #[arg(long = "output_type", help = "Output artifact type")]
    pub output_type: String,

    #[arg(long = "output_description", help = "Description about the output artifact")]
    pub output_description: String,

    #[arg(long = "min_price", help = "Minimum price to filter properties")]
    pub min_price: f64,

    #[arg(long = "max_price", help = "Maximum price to filter properties")]
    pub max_price: f64,

    #[arg(
        long,
        default_value = "./store",
        help = "Store root directory or tracking service URL"
    )]
    pub store: String,

    #[arg(long = "store_config", help = "TOML file describing the store, overrides --store")]
    pub store_config: Option<String>,

    #[arg(long = "work_dir", default_value = ".", help = "Directory for the cleaned csv")]
    pub work_dir: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log system resource usage")]
    pub monitor: bool,

    #[arg(long = "log_json", help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Resolves the effective store settings: `--store_config` wins over
    /// the plain `--store` location.
    pub fn store_settings(&self) -> Result<StoreConfig> {
        match &self.store_config {
            Some(path) => StoreConfig::from_file(path),
            None => Ok(StoreConfig::from_location(&self.store)),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn input_artifact(&self) -> &str {
        &self.input_artifact
    }

    fn output_artifact(&self) -> &str {
        &self.output_artifact
    }

    fn output_type(&self) -> &str {
        &self.output_type
    }

    fn output_description(&self) -> &str {
        &self.output_description
    }

    fn min_price(&self) -> f64 {
        self.min_price
    }

    fn max_price(&self) -> f64 {
        self.max_price
    }

    fn work_dir(&self) -> &str {
        &self.work_dir
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("input_artifact", &self.input_artifact)?;
        validate_non_empty_string("output_artifact", &self.output_artifact)?;
        validate_non_empty_string("output_type", &self.output_type)?;
        validate_non_empty_string("output_description", &self.output_description)?;
        validate_non_empty_string("work_dir", &self.work_dir)?;

        // min_price > max_price is allowed: the filter just keeps nothing.
        self.store_settings()?.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "listing-clean",
            "--input_artifact",
            "sample.csv:latest",
            "--output_artifact",
            "clean_sample.csv",
            "--output_type",
            "clean_sample",
            "--output_description",
            "Data with outliers and null prices removed",
            "--min_price",
            "10",
            "--max_price",
            "350",
        ]
    }

    #[test]
    fn test_parse_required_args() {
        let config = CliConfig::try_parse_from(base_args()).unwrap();

        assert_eq!(config.input_artifact, "sample.csv:latest");
        assert_eq!(config.output_artifact, "clean_sample.csv");
        assert_eq!(config.output_type, "clean_sample");
        assert_eq!(config.min_price, 10.0);
        assert_eq!(config.max_price, 350.0);
        assert_eq!(config.store, "./store");
        assert_eq!(config.work_dir, ".");
        assert!(!config.verbose);
        assert!(!config.monitor);
        assert!(!config.log_json);
    }

    #[test]
    fn test_missing_required_arg_fails() {
        let mut args = base_args();
        args.truncate(args.len() - 2); // drop --max_price and its value

        assert!(CliConfig::try_parse_from(args).is_err());
    }

    #[test]
    fn test_kebab_case_names_are_rejected() {
        let mut args = base_args();
        args[1] = "--input-artifact";

        assert!(CliConfig::try_parse_from(args).is_err());
    }

    #[test]
    fn test_optional_flags() {
        let mut args = base_args();
        args.extend([
            "--store",
            "https://tracker.example.com",
            "--work_dir",
            "/tmp/clean",
            "--verbose",
            "--monitor",
        ]);

        let config = CliConfig::try_parse_from(args).unwrap();
        assert_eq!(config.store, "https://tracker.example.com");
        assert_eq!(config.work_dir, "/tmp/clean");
        assert!(config.verbose);
        assert!(config.monitor);
    }

    #[test]
    fn test_validate_rejects_empty_output_type() {
        let mut args = base_args();
        args[6] = "";

        let config = CliConfig::try_parse_from(args).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_inverted_price_range() {
        let mut args = base_args();
        args[10] = "350";
        args[12] = "10";

        let config = CliConfig::try_parse_from(args).unwrap();
        assert!(config.validate().is_ok());
    }
}
