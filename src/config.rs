use std::fs::read_to_string;
use std::time::Duration;

use color_eyre::eyre::{bail, ContextCompat, Result};

use crate::extract_num;

pub const GIB: usize = 1024 * 1024 * 1024;
pub const MIB: usize = 1024 * 1024;

/// Size of the burn-in slab. Tune to the machine: the whole block gets
/// committed up front, so on a 16 GiB box drop this to 12 or so.
/// `validated_reserve_bytes` refuses anything at or above MemTotal.
pub const RESERVE_GIB: usize = 22;

/// Written across the whole slab to force page commitment.
pub const FILL_BYTE: u8 = 1;

/// How long the workers get to ramp up before the usage reports.
pub const RAMP_UP: Duration = Duration::from_secs(10);

/// Square roots accumulated per round of the floating-point worker; the
/// stop flag is polled between rounds.
pub const SQRT_ROUND_ITERS: u64 = 100_000_000;

/// Candidates tested per round of the primality worker.
pub const PRIME_ROUND: u64 = 1 << 16;

/// `RESERVE_GIB` in bytes, checked against the machine.
pub fn validated_reserve_bytes() -> Result<usize> {
    reserve_bytes_for(RESERVE_GIB)
}

pub fn reserve_bytes_for(gib: usize) -> Result<usize> {
    let reserve = gib
        .checked_mul(GIB)
        .wrap_err("reserve size overflows usize")?;
    let meminfo = read_to_string("/proc/meminfo")?;
    let total_kb = extract_num(&meminfo, "MemTotal:").wrap_err("no MemTotal in /proc/meminfo")?;
    let total = total_kb * 1024;
    if reserve >= total {
        bail!(
            "a reserve of {} GiB is not below MemTotal ({} MiB)",
            gib,
            total / MIB
        );
    }
    Ok(reserve)
}
