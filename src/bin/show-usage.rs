use std::time::Duration;

use burnin::config::MIB;
use burnin::metrics;
use color_eyre::eyre::Result;

// one-shot report of the two burn-in metrics, without generating any load
fn main() -> Result<()> {
    color_eyre::install()?;

    let usage = metrics::process_memory()?;
    println!("VmSize: {} MB", usage.committed / MIB);
    println!("VmRSS: {} MB", usage.resident / MIB);

    let cpu = metrics::measure_cpu_usage(Duration::from_secs(1))?;
    println!("CPU: {:.1}%", cpu);
    Ok(())
}
