use clap::Parser;
use listing_clean::domain::ports::ArtifactStore;
use listing_clean::utils::{logger, validation::Validate};
use listing_clean::{CleaningPipeline, CliConfig, HttpStore, LocalStore, StepRunner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting listing-clean CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run(config, monitor_enabled).await {
        Ok(locator) => {
            tracing::info!("✅ Cleaning step completed successfully!");
            tracing::info!("📁 Output artifact: {}", locator);
            println!("✅ Cleaning step completed successfully!");
            println!("📁 Output artifact: {}", locator);
        }
        Err(e) => {
            tracing::error!(
                "❌ Cleaning step failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                listing_clean::utils::error::ErrorSeverity::Low => 0,
                listing_clean::utils::error::ErrorSeverity::Medium => 2,
                listing_clean::utils::error::ErrorSeverity::High => 1,
                listing_clean::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

/// Builds the configured store and runs the cleaning step against it.
async fn run(config: CliConfig, monitor: bool) -> listing_clean::Result<String> {
    let settings = config.store_settings()?;

    if settings.is_http() {
        let download_dir = settings.download_dir_or(&config.work_dir);
        let store = match settings.timeout() {
            Some(timeout) => HttpStore::with_timeout(settings.location(), download_dir, timeout)?,
            None => HttpStore::new(settings.location(), download_dir),
        };
        run_step(store, config, monitor).await
    } else {
        run_step(LocalStore::new(settings.location()), config, monitor).await
    }
}

async fn run_step<S: ArtifactStore>(
    store: S,
    config: CliConfig,
    monitor: bool,
) -> listing_clean::Result<String> {
    let pipeline = CleaningPipeline::new(store, config);
    let runner = StepRunner::new_with_monitoring(pipeline, monitor);
    runner.run().await
}
