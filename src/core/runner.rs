use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct StepRunner<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> StepRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Run the step strictly in order: fetch, clean, publish. Each phase
    /// failure propagates unchanged; the orchestrator owns re-runs.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting cleaning run");

        let raw = self.pipeline.fetch().await?;
        tracing::info!("Fetched {} rows", raw.len());
        self.monitor.log_stats("Fetch");

        let before = raw.len();
        let cleaned = self.pipeline.clean(raw).await?;
        tracing::info!("Kept {} of {} rows after cleaning", cleaned.len(), before);
        self.monitor.log_stats("Clean");

        let locator = self.pipeline.publish(cleaned).await?;
        tracing::info!("Published output artifact at {}", locator);
        self.monitor.log_stats("Publish");
        self.monitor.log_final_stats();

        Ok(locator)
    }
}
