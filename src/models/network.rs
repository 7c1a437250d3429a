// Network interface counters and rates

use std::collections::BTreeMap;

/// Byte counters for one interface, cumulative since the interface was reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// One read of /proc/net/dev keyed by interface name (without the trailing colon).
pub type NetworkSample = BTreeMap<String, InterfaceCounters>;

/// Throughput of one interface over a sampling window, in bits per second.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRate {
    pub name: String,
    pub rx_bps: f64,
    pub tx_bps: f64,
}
