use std::collections::{HashMap, HashSet};

use lattice_life::{Coord, EngineConfig, LatticeLife, Rule};
use rand::Rng;
use rand::SeedableRng;

fn set_cells(engine: &mut LatticeLife, cells: &[(i64, i64, i64)]) {
    for &(x, y, z) in cells {
        engine.set_cell(Coord::new(x, y, z), true);
    }
}

fn collect_live(engine: &LatticeLife) -> HashSet<(i64, i64, i64)> {
    let mut out = HashSet::new();
    engine.for_each_live(|coord, _| {
        out.insert((coord.x, coord.y, coord.z));
    });
    out
}

fn collect_ages(engine: &LatticeLife) -> HashMap<(i64, i64, i64), u32> {
    let mut out = HashMap::new();
    engine.for_each_live(|coord, cell| {
        out.insert((coord.x, coord.y, coord.z), cell.age);
    });
    out
}

fn assert_alive(engine: &LatticeLife, cells: &[(i64, i64, i64)]) {
    for &(x, y, z) in cells {
        assert!(
            engine.get_cell(Coord::new(x, y, z)),
            "expected alive at ({x},{y},{z})"
        );
    }
}

fn assert_dead(engine: &LatticeLife, cells: &[(i64, i64, i64)]) {
    for &(x, y, z) in cells {
        assert!(
            !engine.get_cell(Coord::new(x, y, z)),
            "expected dead at ({x},{y},{z})"
        );
    }
}

const CUBE: [(i64, i64, i64); 8] = [
    (0, 0, 0),
    (0, 0, 1),
    (0, 1, 0),
    (0, 1, 1),
    (1, 0, 0),
    (1, 0, 1),
    (1, 1, 0),
    (1, 1, 1),
];

#[test]
fn cube_dissolves_into_face_shell_under_default_rule() {
    // Every cube cell sees the other 7, above survival_max = 5, so all die.
    // A dead site adjacent to the cube sees nx*ny*nz cube cells where each
    // axis overlap is 1 (coordinate in {-1, 2}) or 2 (coordinate in {0, 1});
    // only the 24 sites with exactly one axis in {-1, 2} count 4 and are born.
    let mut engine = LatticeLife::new(Rule::default());
    set_cells(&mut engine, &CUBE);

    engine.step();

    let mut expected = HashSet::new();
    for &outside in &[-1i64, 2] {
        for &a in &[0i64, 1] {
            for &b in &[0i64, 1] {
                expected.insert((outside, a, b));
                expected.insert((a, outside, b));
                expected.insert((a, b, outside));
            }
        }
    }
    assert_eq!(expected.len(), 24);
    assert_eq!(collect_live(&engine), expected);

    for age in collect_ages(&engine).values() {
        assert_eq!(*age, 1, "newborn cells must start at age 1");
    }
    assert_dead(&engine, &CUBE);
}

#[test]
fn isolated_cell_dies_without_births() {
    let mut engine = LatticeLife::new(Rule::default());
    engine.set_cell(Coord::new(0, 0, 0), true);

    engine.step();

    assert!(engine.is_empty());
    assert_eq!(engine.population(), 0);
}

#[test]
fn empty_universe_stays_empty() {
    let mut engine = LatticeLife::new(Rule::default());
    engine.step_n(10);
    assert_eq!(engine.population(), 0);
    assert!(engine.is_empty());
}

#[test]
fn births_stay_inside_candidate_frontier_even_with_birth_min_zero() {
    // With birth range [0, 26] every dead site in the frontier qualifies,
    // but sites farther than Chebyshev distance 1 from all life are never
    // candidates: exactly the 27-cell closed neighborhood comes alive.
    let rule = Rule::new(0, 26, 0, 26).unwrap();
    let mut engine = LatticeLife::new(rule);
    engine.set_cell(Coord::new(0, 0, 0), true);

    engine.step();

    assert_eq!(engine.population(), 27);
    let live = collect_live(&engine);
    for x in -1..=1 {
        for y in -1..=1 {
            for z in -1..=1 {
                assert!(live.contains(&(x, y, z)));
            }
        }
    }
    assert_dead(&engine, &[(2, 0, 0), (0, -2, 0), (0, 0, 3)]);
}

#[test]
fn survivors_age_each_generation() {
    // Cube cells see 7 neighbors; with survival [6, 7] and an unreachable
    // birth count the cube is a still life.
    let rule = Rule::new(8, 8, 6, 7).unwrap();
    let mut engine = LatticeLife::new(rule);
    set_cells(&mut engine, &CUBE);

    engine.step();
    for age in collect_ages(&engine).values() {
        assert_eq!(*age, 2);
    }

    engine.step();
    let ages = collect_ages(&engine);
    assert_eq!(ages.len(), 8);
    for age in ages.values() {
        assert_eq!(*age, 3);
    }
}

#[test]
fn step_is_deterministic() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xBADC_0FFE);
    let mut seed = Vec::new();
    for z in -4..=4 {
        for y in -4..=4 {
            for x in -4..=4 {
                if rng.random::<f64>() < 0.25 {
                    seed.push((x, y, z));
                }
            }
        }
    }

    let mut a = LatticeLife::new(Rule::default());
    let mut b = LatticeLife::new(Rule::default());
    set_cells(&mut a, &seed);
    set_cells(&mut b, &seed);

    for _ in 0..4 {
        a.step();
        b.step();
        assert_eq!(a.current(), b.current());
    }
}

#[test]
fn deterministic_across_thread_counts() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xD37E_A515);
    let mut seed = Vec::new();
    for z in -6..=6 {
        for y in -6..=6 {
            for x in -6..=6 {
                if rng.random::<f64>() < 0.2 {
                    seed.push((x, y, z));
                }
            }
        }
    }

    let run = |threads: usize| {
        // parallel_min_candidates of 1 forces the parallel path even on
        // small frontiers.
        let config = EngineConfig::default()
            .thread_count(threads)
            .parallel_min_candidates(1);
        let mut engine = LatticeLife::with_config(Rule::default(), config);
        set_cells(&mut engine, &seed);
        engine.step_n(6);
        (engine.population(), collect_ages(&engine))
    };

    let (pop1, ages1) = run(1);
    let (pop4, ages4) = run(4);

    assert_eq!(pop1, pop4);
    assert_eq!(ages1, ages4);
}

#[test]
fn mid_simulation_set_cell_mutation_works() {
    let mut engine = LatticeLife::new(Rule::new(0, 26, 0, 26).unwrap());
    engine.set_cell(Coord::new(0, 0, 0), true);

    engine.step();
    engine.set_cell(Coord::new(50, 50, 50), true);
    assert!(engine.get_cell(Coord::new(50, 50, 50)));

    engine.step();
    // The lone far-away cell had zero neighbors but survival range covers 0.
    assert!(engine.get_cell(Coord::new(50, 50, 50)));
}

#[test]
fn rule_update_applies_to_subsequent_steps() {
    let mut engine = LatticeLife::new(Rule::default());
    engine.set_cell(Coord::new(0, 0, 0), true);

    engine.set_rule(Rule::new(0, 26, 0, 26).unwrap());
    engine.step();

    assert_eq!(engine.population(), 27);
}

#[test]
fn invalid_rule_is_rejected_before_any_step() {
    assert!(Rule::new(5, 3, 4, 5).is_err());
    assert!(Rule::new(4, 5, 27, 27).is_err());
    assert!(Rule::new(4, 5, 4, 5).is_ok());
}
