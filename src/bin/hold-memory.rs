use std::hint::black_box;

use burnin::config::{self, FILL_BYTE, MIB};
use burnin::mem;
use color_eyre::eyre::Result;
use rustix::event::pause;

// commits the configured slab and sits on it, with no CPU load; for
// watching VmRSS from another terminal
fn main() -> Result<()> {
    color_eyre::install()?;

    let bytes = config::validated_reserve_bytes()?;
    let block = mem::reserve_filled(bytes, FILL_BYTE)?;
    println!("committed {} MiB, pausing", block.len() / MIB);
    pause();
    black_box(&block);
    Ok(())
}
