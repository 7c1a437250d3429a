// Telemetry sampler: two reads across a fixed window, differenced and rendered as text.

mod delta;
pub mod format;

pub use delta::{calculate_cpu_usage, cpu_usages, interface_rates};

use crate::counters::{CounterError, CounterSource};
use crate::models::CpuSample;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Wait between the two reads of each counter family.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

/// Interfaces never reported: loopback and the VPN tunnel.
pub const EXCLUDED_INTERFACES: &[&str] = &["lo", "pvpnksintrf0"];

const CPU_UNREADABLE: &str = "Error: Unable to read CPU stats\n";
const CPU_MISMATCH: &str = "Error: CPU stats mismatch\n";
const MEMORY_UNAVAILABLE: &str = "Error: Unable to retrieve memory stats\n";
const DISK_UNAVAILABLE: &str = "Disk capacity info unavailable\n";
const NETWORK_UNAVAILABLE: &str = "Error: Unable to read network stats\n";

/// Builds the `/stats` report. Holds the CPU baseline shared by all requests.
pub struct StatsSampler {
    source: Arc<dyn CounterSource>,
    /// Last CPU sample seen; the "before" half of the next report.
    baseline: Mutex<CpuSample>,
}

impl StatsSampler {
    /// Takes the first CPU baseline immediately (blocking read).
    pub fn new(source: Arc<dyn CounterSource>) -> Self {
        let baseline = source.cpu_sample().unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "cpu_sample", "initial CPU baseline unavailable");
            CpuSample::new()
        });
        Self {
            source,
            baseline: Mutex::new(baseline),
        }
    }

    /// Render a full report. Never fails: unreadable sources become inline error lines.
    /// Takes at least two sample intervals.
    pub async fn report(&self) -> String {
        let mut report = self.cpu_section().await;
        report.push_str(&self.memory_section().await);
        report.push_str(&self.disk_section().await);
        report.push_str(&self.network_section().await);
        report
    }

    async fn read<T, F>(&self, operation: &'static str, f: F) -> Result<T, CounterError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CounterSource) -> Result<T, CounterError> + Send + 'static,
    {
        let source = self.source.clone();
        tokio::task::spawn_blocking(move || f(source.as_ref()))
            .await
            .map_err(|e| CounterError::unavailable(operation, format!("task join: {}", e)))?
    }

    async fn cpu_section(&self) -> String {
        // Held across the sleep so concurrent reports don't race on the baseline.
        let mut baseline = self.baseline.lock().await;
        if baseline.is_empty() {
            match self.read("cpu_sample", |s| s.cpu_sample()).await {
                Ok(sample) => *baseline = sample,
                Err(e) => {
                    tracing::warn!(error = %e, operation = "cpu_sample", "CPU stats failed");
                    return CPU_UNREADABLE.to_string();
                }
            }
        }

        tokio::time::sleep(SAMPLE_INTERVAL).await;

        let current = match self.read("cpu_sample", |s| s.cpu_sample()).await {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!(error = %e, operation = "cpu_sample", "CPU stats failed");
                return CPU_UNREADABLE.to_string();
            }
        };
        let line = match cpu_usages(&baseline, &current) {
            Ok(usages) => format::cpu_load_line(&usages),
            Err(e) => {
                tracing::warn!(error = %e, operation = "cpu_usages", "CPU stats mismatch");
                CPU_MISMATCH.to_string()
            }
        };
        *baseline = current;
        line
    }

    async fn memory_section(&self) -> String {
        match self.read("memory", |s| s.memory()).await {
            Ok(mem) => format::memory_lines(&mem),
            Err(e) => {
                tracing::warn!(error = %e, operation = "memory", "memory stats failed");
                MEMORY_UNAVAILABLE.to_string()
            }
        }
    }

    async fn disk_section(&self) -> String {
        match self.read("disk", |s| s.disk()).await {
            Ok(disk) => format::disk_line(&disk),
            Err(e) => {
                tracing::warn!(error = %e, operation = "disk", "disk stats failed");
                DISK_UNAVAILABLE.to_string()
            }
        }
    }

    async fn network_section(&self) -> String {
        let mut section = String::from("Network Bandwidth Usage:\n");
        let before = self.read("network_sample", |s| s.network_sample()).await;
        let start = Instant::now();
        tokio::time::sleep(SAMPLE_INTERVAL).await;
        let after = self.read("network_sample", |s| s.network_sample()).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match (before, after) {
            (Ok(before), Ok(after)) => {
                for rate in interface_rates(&before, &after, elapsed_ms, EXCLUDED_INTERFACES) {
                    section.push_str(&format::interface_line(&rate));
                }
                tracing::debug!(
                    operation = "network_sample",
                    interfaces = after.len(),
                    elapsed_ms,
                    "network window sampled"
                );
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, operation = "network_sample", "network stats failed");
                section.push_str(NETWORK_UNAVAILABLE);
            }
        }
        section
    }
}
