use std::fs::read_to_string;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::{ensure, ContextCompat, Result};

use crate::extract_num;

/// Current process memory, in bytes. `committed` is the full virtual
/// reservation (VmSize), `resident` the physically backed part (VmRSS).
#[derive(Debug, Clone, Copy)]
pub struct ProcessMemory {
    pub committed: usize,
    pub resident: usize,
}

pub fn process_memory() -> Result<ProcessMemory> {
    let status = read_to_string("/proc/self/status")?;
    let committed = extract_num(&status, "VmSize:").wrap_err("no VmSize in /proc/self/status")?;
    let resident = extract_num(&status, "VmRSS:").wrap_err("no VmRSS in /proc/self/status")?;
    Ok(ProcessMemory {
        committed: committed * 1024,
        resident: resident * 1024,
    })
}

/// One reading of the system-wide cumulative CPU tick counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuSample {
    pub idle: u64,
    pub total: u64,
}

pub fn system_cpu_sample() -> Result<CpuSample> {
    parse_stat(&read_to_string("/proc/stat")?)
}

fn parse_stat(stat: &str) -> Result<CpuSample> {
    let line = stat.lines().next().wrap_err("/proc/stat is empty")?;
    let mut fields = line.split_whitespace();
    ensure!(
        fields.next() == Some("cpu"),
        "first line of /proc/stat is not the cpu total"
    );
    let ticks = fields
        .map(|field| field.parse::<u64>())
        .collect::<Result<Vec<u64>, _>>()?;
    ensure!(ticks.len() >= 4, "cpu line has only {} fields", ticks.len());
    // idle proper plus iowait; both count time the cores spent off-task
    let idle = ticks[3] + ticks.get(4).copied().unwrap_or(0);
    Ok(CpuSample {
        idle,
        total: ticks.iter().sum(),
    })
}

/// `100 − Δidle/Δtotal × 100` over the two samples, clamped to [0, 100].
/// A stalled or non-monotonic counter pair reads as 0 rather than an error.
pub fn cpu_usage_percent(first: CpuSample, second: CpuSample) -> f64 {
    let total = second.total.saturating_sub(first.total);
    if total == 0 {
        return 0.0;
    }
    let idle = second.idle.saturating_sub(first.idle);
    (100.0 - idle as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// System-wide utilization over `interval`; blocks for its full length.
pub fn measure_cpu_usage(interval: Duration) -> Result<f64> {
    let first = system_cpu_sample()?;
    thread::sleep(interval);
    let second = system_cpu_sample()?;
    Ok(cpu_usage_percent(first, second))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn usage_follows_the_delta_formula() {
        let first = CpuSample {
            idle: 100,
            total: 200,
        };
        let second = CpuSample {
            idle: 150,
            total: 400,
        };
        // Δidle = 50, Δtotal = 200
        assert_eq!(cpu_usage_percent(first, second), 75.0);
    }

    #[test]
    fn fully_idle_interval_reads_zero() {
        let first = CpuSample { idle: 0, total: 0 };
        let second = CpuSample {
            idle: 100,
            total: 100,
        };
        assert_eq!(cpu_usage_percent(first, second), 0.0);
    }

    #[test]
    fn fully_busy_interval_reads_hundred() {
        let first = CpuSample {
            idle: 50,
            total: 100,
        };
        let second = CpuSample {
            idle: 50,
            total: 300,
        };
        assert_eq!(cpu_usage_percent(first, second), 100.0);
    }

    #[test]
    fn stalled_or_backwards_counters_read_zero() {
        let sample = CpuSample {
            idle: 10,
            total: 20,
        };
        assert_eq!(cpu_usage_percent(sample, sample), 0.0);
        let earlier = CpuSample { idle: 5, total: 10 };
        assert_eq!(cpu_usage_percent(sample, earlier), 0.0);
    }

    #[test]
    fn parses_a_stat_cpu_line() {
        let stat = "cpu  100 50 80 500 20 10 5 0 0 0\ncpu0 50 25 40 250 10 5 2 0 0 0\n";
        let sample = parse_stat(stat).unwrap();
        assert_eq!(
            sample,
            CpuSample {
                idle: 520,
                total: 765,
            }
        );
    }

    #[test]
    fn rejects_text_without_a_cpu_line() {
        assert!(parse_stat("intr 0 1 2\n").is_err());
        assert!(parse_stat("").is_err());
    }

    #[test]
    fn live_sample_is_consistent() {
        let sample = system_cpu_sample().unwrap();
        assert!(sample.total > 0);
        assert!(sample.idle <= sample.total);
    }

    #[test]
    fn live_process_memory_is_populated() {
        let usage = process_memory().unwrap();
        assert!(usage.resident > 0);
        assert!(usage.committed >= usage.resident);
    }
}
