#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use lattice_life::{Coord, EngineConfig, LatticeLife, Rule};
use rand::RngCore;
use rand::SeedableRng;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const SEED_SIDE: i64 = 24;
const LIVE_DENSITY: f64 = 0.12;
const TOTAL_STEPS: u64 = 200;
const REPORT_INTERVAL: u64 = 20;
const DEFAULT_RNG_SEED: u64 = 0x5EED_1234_ABCD_EF01;

struct MainArgs {
    config: EngineConfig,
    rule: Rule,
    steps: u64,
    seed_side: i64,
    density: f64,
    rng_seed: u64,
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut config = EngineConfig::default();
    let mut rule = Rule::default();
    let mut steps = TOTAL_STEPS;
    let mut seed_side = SEED_SIDE;
    let mut density = LIVE_DENSITY;
    let mut rng_seed = DEFAULT_RNG_SEED;
    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--threads" => {
                i += 1;
                let n: usize = next_arg(i, "--threads")
                    .parse()
                    .expect("--threads requires a positive integer");
                config = config.thread_count(n);
            }
            "--max-threads" => {
                i += 1;
                let n: usize = next_arg(i, "--max-threads")
                    .parse()
                    .expect("--max-threads requires a positive integer");
                config = config.max_threads(n);
            }
            "--rule" => {
                i += 1;
                rule = Rule::parse(next_arg(i, "--rule"))
                    .unwrap_or_else(|e| panic!("invalid --rule: {e}"));
            }
            "--steps" => {
                i += 1;
                steps = next_arg(i, "--steps")
                    .parse()
                    .expect("--steps requires a non-negative integer");
            }
            "--seed-side" => {
                i += 1;
                seed_side = next_arg(i, "--seed-side")
                    .parse()
                    .expect("--seed-side requires a positive integer");
            }
            "--density" => {
                i += 1;
                density = next_arg(i, "--density")
                    .parse()
                    .expect("--density requires a float in (0, 1]");
            }
            "--seed" => {
                i += 1;
                rng_seed = next_arg(i, "--seed")
                    .parse()
                    .expect("--seed requires a u64");
            }
            other => panic!(
                "unknown argument: {other}\nusage: lattice-life [--threads N] [--max-threads N] [--rule B4-5/S4-5] [--steps N] [--seed-side N] [--density F] [--seed N]"
            ),
        }
        i += 1;
    }
    MainArgs {
        config,
        rule,
        steps,
        seed_side,
        density,
        rng_seed,
    }
}

fn seed_random_block(engine: &mut LatticeLife, side: i64, density: f64, rng_seed: u64) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(rng_seed);
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
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args();
    let mut engine = LatticeLife::with_config(args.rule, args.config);
    seed_random_block(&mut engine, args.seed_side, args.density, args.rng_seed);

    println!(
        "rule B{}-{}/S{}-{}, seed block {side}x{side}x{side} at density {density:.2}, initial population {pop}",
        args.rule.birth_min(),
        args.rule.birth_max(),
        args.rule.survival_min(),
        args.rule.survival_max(),
        side = args.seed_side,
        density = args.density,
        pop = engine.population(),
    );

    let mut total_duration = std::time::Duration::ZERO;
    let mut done = 0u64;
    while done < args.steps {
        let batch = REPORT_INTERVAL.min(args.steps - done);
        let start = Instant::now();
        engine.step_n(batch);
        let elapsed = start.elapsed();
        total_duration += elapsed;
        done += batch;

        let batch_ms = elapsed.as_secs_f64() * 1000.0;
        let avg_ms = batch_ms / batch as f64;
        println!(
            "Generation {done}: population = {}, {batch_ms:.3} ms ({avg_ms:.4} ms/step)",
            engine.population()
        );
        if engine.is_empty() {
            println!("Extinct after {done} generations");
            break;
        }
    }

    let total_ms = total_duration.as_secs_f64() * 1000.0;
    println!("\n--- Summary ({done} steps) ---");
    println!(
        "{total_ms:.3} ms total, {:.4} ms/step, final population {}",
        total_ms / done.max(1) as f64,
        engine.population()
    );
}
