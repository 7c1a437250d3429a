// Linux-specific readers: /proc/stat, /proc/net/dev, /proc/meminfo, statvfs.

use crate::models::{
    CpuSample, CpuTimes, DiskSnapshot, InterfaceCounters, MemorySnapshot, NetworkSample,
};
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Number of header lines at the top of /proc/net/dev.
const NET_DEV_HEADER_LINES: usize = 2;
/// Column (after the interface name) holding transmitted bytes: eight receive columns come first.
const NET_DEV_TX_BYTES_COLUMN: usize = 8;

/// Parse one `cpu*` line. Missing or unparsable fields are 0.
pub fn parse_cpu_line(line: &str) -> CpuTimes {
    let mut fields = line
        .split_whitespace()
        .skip(1)
        .map(|f| f.parse::<u64>().unwrap_or(0));
    let mut next = || fields.next().unwrap_or(0);
    CpuTimes {
        user: next(),
        nice: next(),
        system: next(),
        idle: next(),
        iowait: next(),
        irq: next(),
        softirq: next(),
        steal: next(),
    }
}

/// Parse the leading `cpu` block of /proc/stat; stops at the first line that is not a cpu line.
pub fn parse_proc_stat(content: &str) -> CpuSample {
    content
        .lines()
        .take_while(|line| line.starts_with("cpu"))
        .map(parse_cpu_line)
        .collect()
}

/// Parse /proc/net/dev into per-interface byte counters. Malformed lines are skipped.
pub fn parse_net_dev(content: &str) -> NetworkSample {
    content
        .lines()
        .skip(NET_DEV_HEADER_LINES)
        .filter_map(parse_net_dev_line)
        .collect()
}

fn parse_net_dev_line(line: &str) -> Option<(String, InterfaceCounters)> {
    // Old kernels pack large counters against the colon ("eth0:12345"), so split on it.
    let (name, columns) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let columns: Vec<u64> = columns
        .split_whitespace()
        .map(|c| c.parse().ok())
        .collect::<Option<_>>()?;
    Some((
        name.to_string(),
        InterfaceCounters {
            rx_bytes: *columns.first()?,
            tx_bytes: *columns.get(NET_DEV_TX_BYTES_COLUMN)?,
        },
    ))
}

/// Parse /proc/meminfo into RAM and swap totals (kB values scaled to bytes).
/// Returns `None` when `MemTotal` is missing; absent swap lines read as no swap.
pub fn parse_meminfo(content: &str) -> Option<MemorySnapshot> {
    let mut total_ram = None;
    let mut snapshot = MemorySnapshot::default();
    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(kib) = rest
            .split_whitespace()
            .next()
            .and_then(|v| v.parse::<u64>().ok())
        else {
            continue;
        };
        let bytes = kib.saturating_mul(1024);
        match key {
            "MemTotal" => total_ram = Some(bytes),
            "MemFree" => snapshot.free_ram = bytes,
            "SwapTotal" => snapshot.total_swap = bytes,
            "SwapFree" => snapshot.free_swap = bytes,
            _ => {}
        }
    }
    snapshot.total_ram = total_ram?;
    Some(snapshot)
}

/// Capacity of the filesystem holding `path`: blocks and free blocks times fragment size.
pub(super) fn statvfs_capacity(path: &Path) -> std::io::Result<DiskSnapshot> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let ret = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if ret != 0 {
        return Err(std::io::Error::last_os_error());
    }
    let fragment_size = stat.f_frsize as u64;
    Ok(DiskSnapshot {
        total_bytes: (stat.f_blocks as u64).saturating_mul(fragment_size),
        free_bytes: (stat.f_bfree as u64).saturating_mul(fragment_size),
    })
}
