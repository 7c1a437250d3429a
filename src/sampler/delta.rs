// Two-sample differencing for CPU and network counters

use crate::counters::CounterError;
use crate::models::{CpuSample, CpuTimes, InterfaceRate, NetworkSample};

/// Busy percentage of one CPU source between two reads, rounded to two decimals.
/// A source that accumulated no ticks reports 0.0.
pub fn calculate_cpu_usage(prev: &CpuTimes, curr: &CpuTimes) -> f64 {
    let total_diff = curr.total().saturating_sub(prev.total());
    let idle_diff = curr.idle_total().saturating_sub(prev.idle_total());
    if total_diff == 0 {
        return 0.0;
    }
    let busy = 1.0 - (idle_diff as f64 / total_diff as f64);
    ((100.0 * busy * 100.0).round() / 100.0).clamp(0.0, 100.0)
}

/// Usage for every source, aggregate first. Both samples must describe the same sources.
pub fn cpu_usages(prev: &CpuSample, curr: &CpuSample) -> Result<Vec<f64>, CounterError> {
    if prev.is_empty() || curr.is_empty() || prev.len() != curr.len() {
        return Err(CounterError::CpuSampleMismatch {
            before: prev.len(),
            after: curr.len(),
        });
    }
    Ok(prev
        .iter()
        .zip(curr)
        .map(|(p, c)| calculate_cpu_usage(p, c))
        .collect())
}

/// Bits per second for each interface present in both samples and not excluded.
/// A counter that went backwards (interface reset) counts as zero traffic.
pub fn interface_rates(
    prev: &NetworkSample,
    curr: &NetworkSample,
    elapsed_ms: f64,
    excluded: &[&str],
) -> Vec<InterfaceRate> {
    let elapsed_ms = if elapsed_ms > 0.0 { elapsed_ms } else { 1.0 };
    curr.iter()
        .filter(|(name, _)| !excluded.contains(&name.as_str()))
        .filter_map(|(name, c)| {
            let p = prev.get(name)?;
            let rx_diff = c.rx_bytes.saturating_sub(p.rx_bytes);
            let tx_diff = c.tx_bytes.saturating_sub(p.tx_bytes);
            Some(InterfaceRate {
                name: name.clone(),
                rx_bps: rx_diff as f64 * 8.0 * 1000.0 / elapsed_ms,
                tx_bps: tx_diff as f64 * 8.0 * 1000.0 / elapsed_ms,
            })
        })
        .collect()
}
