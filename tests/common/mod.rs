// Shared test helpers: counter sources with scripted readings

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use sysmon_https::counters::{CounterError, CounterSource};
use sysmon_https::models::*;

pub const GIB: u64 = 1024 * 1024 * 1024;

/// Every read advances all counters by the same step: CPUs are exactly half busy and
/// eth0/lo/pvpnksintrf0 move 1000 bytes per read in each direction.
pub struct SteadyCounters {
    cores: usize,
    cpu_reads: AtomicU64,
    net_reads: AtomicU64,
}

impl SteadyCounters {
    pub fn new(cores: usize) -> Self {
        Self {
            cores,
            cpu_reads: AtomicU64::new(0),
            net_reads: AtomicU64::new(0),
        }
    }

    pub fn cpu_reads(&self) -> u64 {
        self.cpu_reads.load(Ordering::SeqCst)
    }
}

impl CounterSource for SteadyCounters {
    fn cpu_sample(&self) -> Result<CpuSample, CounterError> {
        let n = self.cpu_reads.fetch_add(1, Ordering::SeqCst) + 1;
        let times = CpuTimes {
            user: 100 * n,
            idle: 100 * n,
            ..Default::default()
        };
        Ok(vec![times; self.cores + 1])
    }

    fn network_sample(&self) -> Result<NetworkSample, CounterError> {
        let n = self.net_reads.fetch_add(1, Ordering::SeqCst) + 1;
        let counters = InterfaceCounters {
            rx_bytes: 1000 * n,
            tx_bytes: 1000 * n,
        };
        Ok(["eth0", "lo", "pvpnksintrf0"]
            .iter()
            .map(|name| (name.to_string(), counters))
            .collect())
    }

    fn memory(&self) -> Result<MemorySnapshot, CounterError> {
        Ok(MemorySnapshot {
            total_ram: 8 * GIB,
            free_ram: 2 * GIB,
            total_swap: GIB,
            free_swap: GIB,
        })
    }

    fn disk(&self) -> Result<DiskSnapshot, CounterError> {
        Ok(DiskSnapshot {
            total_bytes: 100 * GIB,
            free_bytes: 40 * GIB,
        })
    }
}

/// Nothing is readable.
pub struct FailingCounters;

impl CounterSource for FailingCounters {
    fn cpu_sample(&self) -> Result<CpuSample, CounterError> {
        Err(CounterError::unavailable("stat", "No such file or directory"))
    }

    fn network_sample(&self) -> Result<NetworkSample, CounterError> {
        Err(CounterError::unavailable("net/dev", "No such file or directory"))
    }

    fn memory(&self) -> Result<MemorySnapshot, CounterError> {
        Err(CounterError::unavailable("meminfo", "total memory reported as 0"))
    }

    fn disk(&self) -> Result<DiskSnapshot, CounterError> {
        Err(CounterError::unavailable("/", "Permission denied"))
    }
}

/// CPU count changes after the first read (hot-plugged core); other sources work.
pub struct HotplugCounters {
    cpu_reads: AtomicUsize,
    inner: SteadyCounters,
}

impl HotplugCounters {
    pub fn new() -> Self {
        Self {
            cpu_reads: AtomicUsize::new(0),
            inner: SteadyCounters::new(2),
        }
    }
}

impl CounterSource for HotplugCounters {
    fn cpu_sample(&self) -> Result<CpuSample, CounterError> {
        let mut sample = self.inner.cpu_sample()?;
        if self.cpu_reads.fetch_add(1, Ordering::SeqCst) > 0 {
            sample.push(CpuTimes::default());
        }
        Ok(sample)
    }

    fn network_sample(&self) -> Result<NetworkSample, CounterError> {
        self.inner.network_sample()
    }

    fn memory(&self) -> Result<MemorySnapshot, CounterError> {
        self.inner.memory()
    }

    fn disk(&self) -> Result<DiskSnapshot, CounterError> {
        self.inner.disk()
    }
}

/// eth0 moves 1 MB per read in each direction and every network read blocks for `delay`.
pub struct SlowNetworkCounters {
    delay: Duration,
    net_reads: AtomicU64,
    inner: SteadyCounters,
}

impl SlowNetworkCounters {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            net_reads: AtomicU64::new(0),
            inner: SteadyCounters::new(1),
        }
    }
}

impl CounterSource for SlowNetworkCounters {
    fn cpu_sample(&self) -> Result<CpuSample, CounterError> {
        self.inner.cpu_sample()
    }

    fn network_sample(&self) -> Result<NetworkSample, CounterError> {
        std::thread::sleep(self.delay);
        let n = self.net_reads.fetch_add(1, Ordering::SeqCst) + 1;
        let counters = InterfaceCounters {
            rx_bytes: 1_000_000 * n,
            tx_bytes: 1_000_000 * n,
        };
        Ok(NetworkSample::from([("eth0".to_string(), counters)]))
    }

    fn memory(&self) -> Result<MemorySnapshot, CounterError> {
        self.inner.memory()
    }

    fn disk(&self) -> Result<DiskSnapshot, CounterError> {
        self.inner.disk()
    }
}
