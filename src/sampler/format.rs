// Text rendering for report lines

use crate::models::{DiskSnapshot, InterfaceRate, MemorySnapshot};

const SIZE_SUFFIXES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Binary-scaled size with two decimals, e.g. 1536 -> "1.50 KB". Caps at TB.
pub fn human_readable_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut tier = 0;
    while size >= 1024.0 && tier < SIZE_SUFFIXES.len() - 1 {
        size /= 1024.0;
        tier += 1;
    }
    format!("{:.2} {}", size, SIZE_SUFFIXES[tier])
}

/// Decimal-scaled bit rate with two decimals, e.g. 1_500_000.0 -> "1.50 Mbps".
pub fn format_bps(bps: f64) -> String {
    if bps >= 1e9 {
        format!("{:.2} Gbps", bps / 1e9)
    } else if bps >= 1e6 {
        format!("{:.2} Mbps", bps / 1e6)
    } else if bps >= 1e3 {
        format!("{:.2} Kbps", bps / 1e3)
    } else {
        format!("{:.2} bps", bps)
    }
}

/// `CPU Load: 12.50% [1: 10.00%, 2: 15.00%]`; `usages[0]` is the aggregate.
pub fn cpu_load_line(usages: &[f64]) -> String {
    let aggregate = usages.first().copied().unwrap_or(0.0);
    let cores = usages
        .iter()
        .skip(1)
        .enumerate()
        .map(|(i, usage)| format!("{}: {:.2}%", i + 1, usage))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CPU Load: {:.2}% [{}]\n", aggregate, cores)
}

pub fn memory_lines(mem: &MemorySnapshot) -> String {
    format!(
        "Memory Usage: Used {} / Total {} / Free {}\nSwap Usage: {} / {} \n",
        human_readable_size(mem.used_ram()),
        human_readable_size(mem.total_ram),
        human_readable_size(mem.free_ram),
        human_readable_size(mem.used_swap()),
        human_readable_size(mem.total_swap),
    )
}

pub fn disk_line(disk: &DiskSnapshot) -> String {
    format!(
        "Disk Capacity: {} used / {} total ({} free)\n",
        human_readable_size(disk.used_bytes()),
        human_readable_size(disk.total_bytes),
        human_readable_size(disk.free_bytes),
    )
}

pub fn interface_line(rate: &InterfaceRate) -> String {
    format!(
        "{} - RX: {}, TX: {}\n",
        rate.name,
        format_bps(rate.rx_bps),
        format_bps(rate.tx_bps)
    )
}
