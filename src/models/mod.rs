// Counter samples and gauges read from the host

mod cpu;
mod memory;
mod network;

pub use cpu::{CpuSample, CpuTimes};
pub use memory::{DiskSnapshot, MemorySnapshot};
pub use network::{InterfaceCounters, InterfaceRate, NetworkSample};
