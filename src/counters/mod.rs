// Counter readers: kernel counters and memory gauges (procfs), disk capacity (statvfs)

mod linux;

pub use linux::{parse_cpu_line, parse_meminfo, parse_net_dev, parse_proc_stat};

use crate::models::*;
use std::path::PathBuf;
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("{source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },
    #[error("CPU sample mismatch: {before} sources before, {after} after")]
    CpuSampleMismatch { before: usize, after: usize },
}

impl CounterError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        CounterError::Unavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// One instantaneous read of each counter family. Implementations may block.
pub trait CounterSource: Send + Sync + 'static {
    fn cpu_sample(&self) -> Result<CpuSample, CounterError>;
    fn network_sample(&self) -> Result<NetworkSample, CounterError>;
    fn memory(&self) -> Result<MemorySnapshot, CounterError>;
    fn disk(&self) -> Result<DiskSnapshot, CounterError>;
}

/// Live counters of the running Linux host. Every procfs read, memory included, is taken
/// under `proc_root`.
pub struct ProcfsCounters {
    proc_root: PathBuf,
    disk_mount: PathBuf,
}

impl Default for ProcfsCounters {
    fn default() -> Self {
        Self::new("/proc", "/")
    }
}

impl ProcfsCounters {
    pub fn new(proc_root: impl Into<PathBuf>, disk_mount: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
            disk_mount: disk_mount.into(),
        }
    }

    fn read_proc(&self, relative: &str) -> Result<String, CounterError> {
        let path = self.proc_root.join(relative);
        std::fs::read_to_string(&path)
            .map_err(|e| CounterError::unavailable(path.display().to_string(), e))
    }
}

impl CounterSource for ProcfsCounters {
    #[instrument(skip(self), fields(source = "procfs", operation = "cpu_sample"))]
    fn cpu_sample(&self) -> Result<CpuSample, CounterError> {
        let sample = linux::parse_proc_stat(&self.read_proc("stat")?);
        if sample.is_empty() {
            return Err(CounterError::unavailable("stat", "no cpu lines"));
        }
        Ok(sample)
    }

    #[instrument(skip(self), fields(source = "procfs", operation = "network_sample"))]
    fn network_sample(&self) -> Result<NetworkSample, CounterError> {
        Ok(linux::parse_net_dev(&self.read_proc("net/dev")?))
    }

    #[instrument(skip(self), fields(source = "procfs", operation = "memory"))]
    fn memory(&self) -> Result<MemorySnapshot, CounterError> {
        let snapshot = linux::parse_meminfo(&self.read_proc("meminfo")?)
            .ok_or_else(|| CounterError::unavailable("meminfo", "no MemTotal line"))?;
        if snapshot.total_ram == 0 {
            return Err(CounterError::unavailable("meminfo", "total memory reported as 0"));
        }
        Ok(snapshot)
    }

    #[instrument(skip(self), fields(source = "statvfs", operation = "disk"))]
    fn disk(&self) -> Result<DiskSnapshot, CounterError> {
        linux::statvfs_capacity(&self.disk_mount)
            .map_err(|e| CounterError::unavailable(self.disk_mount.display().to_string(), e))
    }
}
