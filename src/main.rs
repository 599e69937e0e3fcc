use std::io;
use std::process::exit;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use burnin::config::{self, MIB};
use burnin::{load, mem, metrics};

fn main() {
    color_eyre::install().unwrap();

    // report lines are localized; pick up the host locale like setlocale(LC_ALL, "")
    unsafe {
        libc::setlocale(libc::LC_ALL, b"\0".as_ptr().cast());
    }

    println!("Rezerwuję ok. {} GB pamięci...", config::RESERVE_GIB);

    let block = match config::validated_reserve_bytes()
        .and_then(|bytes| mem::reserve_filled(bytes, config::FILL_BYTE))
    {
        Ok(block) => block,
        Err(e) => {
            eprintln!("Nie udało się zaalokować pamięci! ({})", e);
            exit(1);
        }
    };

    // never set here: the workers outlive main's logic and die with the process
    let stop = Arc::new(AtomicBool::new(false));
    let handles = load::spawn_generators(num_cpus::get(), &stop);

    println!("\nCzekam 10 sekund na obciążenie...");
    thread::sleep(config::RAMP_UP);

    println!("Pamięć została przydzielona i wypełniona.");

    println!("\n=== Statystyki pamięci procesu ===");
    print_memory_usage();

    println!("\n=== Statystyki procesora ===");
    print_cpu_usage();

    println!("Naciśnij Enter, aby zakończyć...");
    let _ = io::stdin().read_line(&mut String::new());

    drop(block);
    drop(handles);
}

fn print_memory_usage() {
    match metrics::process_memory() {
        Ok(usage) => {
            println!("Pamięć wirtualna (VmSize): {} MB", usage.committed / MIB);
            println!("Pamięć fizyczna (VmRSS): {} MB", usage.resident / MIB);
        }
        Err(e) => eprintln!("Nie udało się uzyskać danych o pamięci! ({})", e),
    }
}

// blocks for the full one-second sample interval
fn print_cpu_usage() {
    match metrics::measure_cpu_usage(Duration::from_secs(1)) {
        Ok(usage) => println!("Obciążenie CPU: {:.1}%", usage),
        Err(e) => eprintln!("Nie udało się odczytać czasów procesora! ({})", e),
    }
}
