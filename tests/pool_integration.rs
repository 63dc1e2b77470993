//! Integration tests for the adaptive pool.
//!
//! These exercise cross-thread behavior and sustained workloads that the
//! unit tests don't cover.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bytepool::common::config::CALIBRATE_CALLS_THRESHOLD;
use bytepool::{Pool, STEPS};
use rand::Rng;

const WORKERS: usize = 5;
const DEADLINE: Duration = Duration::from_secs(3);

fn round_trip(pool: &Pool, scratch: &[u8], n: usize) {
    let mut buf = pool.acquire();
    assert!(buf.is_empty(), "non-empty buffer returned from acquire");
    buf.append(&scratch[..n]);
    pool.release(buf);
}

/// 42,001 releases of a 1004-byte payload with an occasional random size
/// (every 15th call) mixed in.
fn run_mixed_workload(pool: &Pool) {
    let mut rng = rand::thread_rng();
    let scratch = vec![0u8; 15_234];
    let mut steady = 0u64;
    let mut calls = 0u64;

    while steady <= CALIBRATE_CALLS_THRESHOLD {
        let n = if calls % 15 == 0 {
            rng.gen_range(0..15_234)
        } else {
            steady += 1;
            1004
        };
        round_trip(pool, &scratch, n);
        calls += 1;
    }
}

/// Round trips at `n`, `n - 1` and `n + 1` for every power of two across
/// the spectrum, plus a short run just above each boundary.
fn run_various_sizes(pool: &Pool) {
    let scratch = vec![0u8; (1 << STEPS) + 11];

    for i in 0..=STEPS {
        let n = 1usize << i;

        round_trip(pool, &scratch, n);
        round_trip(pool, &scratch, n + 1);
        round_trip(pool, &scratch, n - 1);

        for j in 0..10 {
            round_trip(pool, &scratch, n + j);
        }
    }
}

fn run_concurrently<F>(pool: Arc<Pool>, workload: F)
where
    F: Fn(&Pool) + Copy + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    for _ in 0..WORKERS {
        let pool = Arc::clone(&pool);
        let tx = tx.clone();
        thread::spawn(move || {
            workload(&pool);
            tx.send(()).unwrap();
        });
    }

    for _ in 0..WORKERS {
        rx.recv_timeout(DEADLINE)
            .expect("worker missed the deadline (deadlock?)");
    }
}

#[test]
fn test_mixed_workload_calibrates_serial() {
    let pool = Pool::new();

    run_mixed_workload(&pool);

    let snapshot = pool.stats().snapshot();
    assert!(snapshot.calibrations >= 1);
    // The steady 1004-byte payload dominates, so the default converges to
    // its class size.
    assert_eq!(pool.default_size(), 1024);
}

#[test]
fn test_mixed_workload_calibrates_concurrent() {
    let pool = Arc::new(Pool::new());

    run_concurrently(Arc::clone(&pool), run_mixed_workload);

    let snapshot = pool.stats().snapshot();
    assert!(snapshot.calibrations >= 1);
}

#[test]
fn test_various_sizes_serial() {
    let pool = Pool::new();

    run_various_sizes(&pool);
}

#[test]
fn test_various_sizes_concurrent() {
    let pool = Arc::new(Pool::new());

    run_concurrently(pool, run_various_sizes);
}

#[test]
fn test_pool_warms_up_for_repeated_payload() {
    let pool = Pool::new();
    let scratch = vec![0u8; 4096];

    for _ in 0..100 {
        round_trip(&pool, &scratch, 4000);
    }

    // Warm pool: the next acquire hands back a pre-sized buffer.
    let buf = pool.acquire();
    assert!(buf.capacity() >= 4000);

    let snapshot = pool.stats().snapshot();
    assert!(snapshot.hit_rate() > 0.9);
}

#[test]
fn test_segregated_pools_calibrate_independently() {
    let small = Pool::new();
    let large = Pool::new();
    let scratch = vec![0u8; 70_000];

    for _ in 0..=CALIBRATE_CALLS_THRESHOLD {
        round_trip(&small, &scratch, 200);
    }
    for _ in 0..=CALIBRATE_CALLS_THRESHOLD {
        round_trip(&large, &scratch, 60_000);
    }

    assert_eq!(small.default_size(), 256);
    assert_eq!(large.default_size(), 65_536);
}
