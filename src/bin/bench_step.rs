use lattice_life::{Coord, EngineConfig, LatticeLife, Rule};
use rand::RngCore;
use rand::SeedableRng;
use std::time::Instant;

fn bench_case(side: i64, density: f64, steps: u64, threads: usize) -> (f64, u64) {
    let config = EngineConfig::default()
        .thread_count(threads)
        .parallel_min_candidates(1);
    let mut engine = LatticeLife::with_config(Rule::default(), config);
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED_1234_ABCD_EF01);
    let threshold = (u64::MAX as f64 * density) as u64;
    let half = side / 2;

    for z in -half..=half {
        for y in -half..=half {
            for x in -half..=half {
                if rng.next_u64() <= threshold {
                    engine.set_cell(Coord::new(x, y, z), true);
                }
            }
        }
    }

    let start = Instant::now();
    engine.step_n(steps);
    let duration = start.elapsed();

    (duration.as_secs_f64() * 1000.0, engine.population())
}

fn main() {
    let threads: usize = std::env::var("BENCH_THREADS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    let cases: &[(i64, u64)] = &[
        (8, 200),  // small blob, serial territory
        (16, 100), // mid-size frontier
        (32, 50),
        (48, 20),
    ];

    println!(
        "{:<12} {:>8} {:>12} {:>12} {:>12}",
        "Seed", "Steps", "Final pop", "Total(ms)", "Avg(ms)"
    );
    println!("{}", "-".repeat(62));

    for &(side, steps) in cases {
        let (total_ms, pop) = bench_case(side, 0.12, steps, threads);
        let avg_ms = total_ms / steps as f64;
        println!(
            "{:<12} {:>8} {:>12} {:>12.1} {:>12.4}",
            format!("{side}^3"),
            steps,
            pop,
            total_ms,
            avg_ms
        );
    }
}
