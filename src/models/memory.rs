// Memory and disk gauges

/// RAM and swap in bytes, read once per report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total_ram: u64,
    pub free_ram: u64,
    pub total_swap: u64,
    pub free_swap: u64,
}

impl MemorySnapshot {
    pub fn used_ram(&self) -> u64 {
        self.total_ram.saturating_sub(self.free_ram)
    }

    pub fn used_swap(&self) -> u64 {
        self.total_swap.saturating_sub(self.free_swap)
    }
}

/// Filesystem capacity of a single mount point, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskSnapshot {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

impl DiskSnapshot {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.free_bytes)
    }
}
