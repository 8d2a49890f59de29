//! Resource-aware build parallelism
//!
//! Compiler memory use per translation unit, not core count, is usually what
//! kills highly parallel native builds. The job count is therefore bounded by
//! physical memory divided by a per-job footprint before it is capped at the
//! core count.

use anyhow::{bail, Context, Result};

use crate::exec::run_captured;
use crate::platform::HostOs;

/// Per-job footprint when the compiler exposes standard atomics (MB)
const MEM_PER_JOB_ATOMICS_MB: u64 = 1500;
/// Per-job footprint for older compiler families (MB)
const MEM_PER_JOB_LEGACY_MB: u64 = 3500;

/// Memory and CPU budget for one build invocation
#[derive(Debug, Clone, Copy)]
pub struct ResourceBudget {
    pub physical_memory_mb: u64,
    pub cpu_cores: usize,
    pub memory_per_job_mb: u64,
}

impl ResourceBudget {
    /// Build a budget from raw inputs
    ///
    /// Memory is floored to whole gigabytes before being re-expressed in
    /// megabytes; the truncation is intentional and determines the final
    /// thread ceiling.
    pub fn from_raw(mem_bytes: u64, cpu_cores: usize, has_std_atomics: bool) -> Self {
        ResourceBudget {
            physical_memory_mb: (mem_bytes >> 30) * 1024,
            cpu_cores,
            memory_per_job_mb: if has_std_atomics {
                MEM_PER_JOB_ATOMICS_MB
            } else {
                MEM_PER_JOB_LEGACY_MB
            },
        }
    }

    /// Detect the host budget, probing `compiler` for the atomics macro
    pub fn detect(os: HostOs, compiler: &str) -> Result<Self> {
        Ok(Self::from_raw(
            physical_memory_bytes(os)?,
            cpu_cores(),
            compiler_has_std_atomics(compiler),
        ))
    }

    /// Final parallelism level for this budget
    pub fn jobs(&self) -> usize {
        let memory_bound = (self.physical_memory_mb / self.memory_per_job_mb).max(1) as usize;
        memory_bound.min(self.cpu_cores.max(1))
    }
}

/// Get number of CPUs for parallel builds
pub fn cpu_cores() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Physical memory of the host in bytes
pub fn physical_memory_bytes(os: HostOs) -> Result<u64> {
    match os {
        HostOs::Linux => {
            let meminfo = std::fs::read_to_string("/proc/meminfo")
                .context("Failed to read /proc/meminfo")?;
            parse_meminfo_total_kb(&meminfo)
                .map(|kb| kb * 1024)
                .context("MemTotal not found in /proc/meminfo")
        }
        HostOs::Darwin => {
            let out = run_captured("sysctl", &["-n", "hw.memsize"])?;
            if !out.success {
                bail!("sysctl -n hw.memsize failed: {}", out.stderr.trim());
            }
            out.stdout
                .trim()
                .parse::<u64>()
                .context("Unparseable hw.memsize value")
        }
        HostOs::Other => bail!("Cannot determine physical memory on this OS"),
    }
}

/// Extract `MemTotal:` in kB from /proc/meminfo content
fn parse_meminfo_total_kb(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find_map(|line| line.strip_prefix("MemTotal:"))
        .and_then(|rest| rest.trim().split_whitespace().next())
        .and_then(|n| n.parse().ok())
}

/// Probe whether the compiler predefines the standard atomics macro
///
/// Runs the preprocessor macro dump on an empty input and searches for
/// `__ATOMIC_RELAXED`. A compiler that cannot be probed is treated as the
/// bigger-footprint family.
pub fn compiler_has_std_atomics(compiler: &str) -> bool {
    match run_captured(compiler, &["-dM", "-E", "-x", "c", "/dev/null"]) {
        Ok(out) if out.success => out.stdout.contains("__ATOMIC_RELAXED"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GB: u64 = 1 << 30;

    fn jobs(mem_bytes: u64, cores: usize, has_std_atomics: bool) -> usize {
        ResourceBudget::from_raw(mem_bytes, cores, has_std_atomics).jobs()
    }

    #[test]
    fn test_jobs_is_at_least_one() {
        assert_eq!(jobs(0, 8, true), 1);
        assert_eq!(jobs(512 * 1024 * 1024, 8, false), 1);
        assert_eq!(jobs(GB, 1, true), 1);
    }

    #[test]
    fn test_jobs_never_exceeds_core_count() {
        assert_eq!(jobs(256 * GB, 4, true), 4);
        assert_eq!(jobs(1024 * GB, 2, false), 2);
    }

    #[test]
    fn test_memory_bound_with_atomics_compiler() {
        // 8 GB -> 8192 MB / 1500 MB = 5 jobs
        assert_eq!(jobs(8 * GB, 64, true), 5);
    }

    #[test]
    fn test_memory_bound_with_legacy_compiler() {
        // 8 GB -> 8192 MB / 3500 MB = 2 jobs
        assert_eq!(jobs(8 * GB, 64, false), 2);
    }

    #[test]
    fn test_gb_truncation_is_preserved() {
        // 1.99 GB floors to 1 GB = 1024 MB, not 2037 MB
        let almost_two_gb = 2 * GB - 10 * 1024 * 1024;
        assert_eq!(jobs(almost_two_gb, 64, true), 1);
        // Exactly 3 GB -> 3072 MB / 1500 = 2
        assert_eq!(jobs(3 * GB, 64, true), 2);
    }

    #[test]
    fn test_monotone_in_memory() {
        let mut prev = 0;
        for gb in 1..=64u64 {
            let current = jobs(gb * GB, 1024, true);
            assert!(current >= prev, "jobs decreased at {} GB", gb);
            prev = current;
        }
    }

    #[test]
    fn test_atomics_family_never_yields_fewer_jobs() {
        for gb in [1u64, 4, 8, 16, 32, 128] {
            assert!(jobs(gb * GB, 1024, true) >= jobs(gb * GB, 1024, false));
        }
    }

    #[test]
    fn test_parse_meminfo_total() {
        let meminfo = "MemTotal:       16326656 kB\nMemFree:         2748096 kB\n";
        assert_eq!(parse_meminfo_total_kb(meminfo), Some(16326656));
    }

    #[test]
    fn test_parse_meminfo_missing_total() {
        assert_eq!(parse_meminfo_total_kb("MemFree: 1 kB\n"), None);
    }
}
