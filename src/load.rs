use std::hint::black_box;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::{PRIME_ROUND, SQRT_ROUND_ITERS};

/// Trial division with the 6k ± 1 stride.
pub fn is_prime(num: u64) -> bool {
    if num <= 1 {
        return false;
    }
    if num == 2 || num == 3 {
        return true;
    }
    if num % 2 == 0 || num % 3 == 0 {
        return false;
    }
    let mut i: u64 = 5;
    while i * i <= num {
        if num % i == 0 || num % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Floating-point worker: accumulates square roots in rounds of
/// `round_iters`, polling `stop` between rounds. The orchestrator never
/// sets the flag, so in a real run this loops until the process dies.
pub fn sqrt_load(round_iters: u64, stop: &AtomicBool) {
    let mut result = 0.0f64;
    while !stop.load(Ordering::Relaxed) {
        for i in 0..round_iters {
            result += (i as f64).sqrt();
        }
    }
    black_box(result);
}

/// Primality worker: walks successive candidates, discarding the verdicts.
pub fn prime_load(round: u64, stop: &AtomicBool) {
    let mut num: u64 = 2;
    while !stop.load(Ordering::Relaxed) {
        for _ in 0..round {
            black_box(is_prime(num));
            num = num.wrapping_add(1);
        }
    }
}

/// Starts `per_kind` workers of each generator, `2 × per_kind` threads in
/// total. Nothing joins these; the caller discards the handles and the OS
/// reaps the threads at process exit.
pub fn spawn_generators(per_kind: usize, stop: &Arc<AtomicBool>) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::with_capacity(per_kind * 2);
    for _ in 0..per_kind {
        let stop = Arc::clone(stop);
        handles.push(thread::spawn(move || sqrt_load(SQRT_ROUND_ITERS, &stop)));
    }
    for _ in 0..per_kind {
        let stop = Arc::clone(stop);
        handles.push(thread::spawn(move || prime_load(PRIME_ROUND, &stop)));
    }
    handles
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn rejects_non_primes() {
        for n in [0, 1, 4, 9, 15] {
            assert!(!is_prime(n), "{} should not be prime", n);
        }
    }

    #[test]
    fn accepts_primes() {
        for n in [2, 3, 5, 7, 11, 13, 97, 7919] {
            assert!(is_prime(n), "{} should be prime", n);
        }
    }

    #[test]
    fn rejects_a_large_square() {
        // 89 * 89, first composite the 6-stride could plausibly skip
        assert!(!is_prime(7921));
    }

    #[test]
    fn spawns_two_workers_per_kind() {
        let stop = Arc::new(AtomicBool::new(true));
        let handles = spawn_generators(3, &stop);
        assert_eq!(handles.len(), 6);
        // flag was pre-set, so every worker bails before its first round
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn workers_poll_the_stop_flag() {
        let stop = AtomicBool::new(false);
        thread::scope(|s| {
            let a = s.spawn(|| sqrt_load(1024, &stop));
            let b = s.spawn(|| prime_load(64, &stop));
            thread::sleep(Duration::from_millis(20));
            stop.store(true, Ordering::Relaxed);
            a.join().unwrap();
            b.join().unwrap();
        });
    }
}
