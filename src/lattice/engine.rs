//! Generation engine: candidate frontier construction and rule application.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use super::coord::Coord;
use super::coord_set::CoordSet;
use super::generation::{Cell, Generation};
use super::rules::Rule;

/// Below this many candidates the serial path wins; parallel dispatch
/// overhead dominates on small frontiers.
const PARALLEL_MIN_CANDIDATES: usize = 2_048;

static AUTO_THREADS: OnceLock<usize> = OnceLock::new();

#[inline]
fn auto_pool_thread_count() -> usize {
    *AUTO_THREADS.get_or_init(|| std::thread::available_parallelism().map_or(1, |n| n.get()))
}

fn resolve_thread_count(config: &EngineConfig) -> usize {
    let mut threads = config.thread_count.unwrap_or_else(auto_pool_thread_count);
    if let Some(cap) = config.max_threads {
        threads = threads.min(cap);
    }
    threads.max(1)
}

/// Configuration for a `LatticeLife` engine instance.
///
/// Use `EngineConfig::default()` for auto-tuned defaults, or customise
/// individual knobs via the builder methods.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    /// Number of threads for the compute pool.
    /// `None` means auto-detect from available parallelism.
    pub thread_count: Option<usize>,
    /// Hard upper bound on threads regardless of auto-detection.
    /// `None` means no additional cap beyond `thread_count`.
    pub max_threads: Option<usize>,
    /// Minimum candidate-frontier size before evaluation goes parallel.
    /// `None` means the built-in default.
    pub parallel_min_candidates: Option<usize>,
}

impl EngineConfig {
    /// Set an explicit thread count for the compute pool.
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    /// Set a hard upper bound on threads.
    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = Some(n.max(1));
        self
    }

    /// Set the frontier size at which candidate evaluation goes parallel.
    pub fn parallel_min_candidates(mut self, n: usize) -> Self {
        self.parallel_min_candidates = Some(n);
        self
    }
}

/// Sparse 3D cellular automaton engine.
///
/// Holds exactly one current generation and advances it with [`step`].
/// Each step evaluates the candidate frontier (live cells plus their 26
/// Moore neighbors) against the pre-step generation only, then replaces
/// the current generation wholesale; no partial state is ever observable.
///
/// [`step`]: LatticeLife::step
pub struct LatticeLife {
    current: Generation,
    rule: Rule,
    generation: u64,
    pool: rayon::ThreadPool,
    threads: usize,
    parallel_min_candidates: usize,
    /// Reusable epoch-stamped deduper for frontier construction.
    candidates: CoordSet,
    /// Reusable frontier list, rebuilt each step.
    candidate_buf: Vec<Coord>,
}

impl LatticeLife {
    /// Create an empty engine with the given rule and default configuration.
    pub fn new(rule: Rule) -> Self {
        Self::with_config(rule, EngineConfig::default())
    }

    /// Create an empty engine with explicit configuration.
    pub fn with_config(rule: Rule, config: EngineConfig) -> Self {
        let threads = resolve_thread_count(&config);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("failed to build LatticeLife rayon thread pool");

        Self {
            current: Generation::new(),
            rule,
            generation: 0,
            pool,
            threads,
            parallel_min_candidates: config
                .parallel_min_candidates
                .unwrap_or(PARALLEL_MIN_CANDIDATES),
            candidates: CoordSet::new(),
            candidate_buf: Vec::new(),
        }
    }

    /// Create an engine seeded with `(coordinate, cell)` pairs.
    pub fn from_seed<I>(seed: I, rule: Rule) -> Self
    where
        I: IntoIterator<Item = (Coord, Cell)>,
    {
        let mut engine = Self::new(rule);
        engine.current = Generation::from_seed(seed);
        engine
    }

    /// Make the site at `coord` alive (as a newborn) or dead. Valid between
    /// steps; the change is visible to the next `step`.
    pub fn set_cell(&mut self, coord: Coord, alive: bool) {
        self.current.set_cell(coord, alive);
    }

    pub fn get_cell(&self, coord: Coord) -> bool {
        self.current.is_alive(coord)
    }

    /// Replace the rule for subsequent steps. `Rule` values are validated at
    /// construction, so no invalid thresholds can reach the engine.
    pub fn set_rule(&mut self, rule: Rule) {
        self.rule = rule;
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Read-only view of the current generation.
    pub fn current(&self) -> &Generation {
        &self.current
    }

    /// How many steps this engine has taken.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> u64 {
        self.current.population()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Visit every live cell of the current generation.
    pub fn for_each_live<F: FnMut(Coord, Cell)>(&self, mut f: F) {
        for (coord, cell) in self.current.iter() {
            f(coord, cell);
        }
    }

    /// Advance one generation.
    ///
    /// Candidates are the live cells and everything within Chebyshev
    /// distance 1 of one; a dead site with zero live neighbors can never be
    /// born, so nothing outside that frontier is evaluated. In particular,
    /// `birth_min == 0` does not cause spontaneous generation far from any
    /// life: a site two or more away from every live cell stays dead even
    /// though its neighbor count of zero falls in the birth range.
    pub fn step(&mut self) {
        let next = self.compute_next();
        self.current = next;
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            population = self.current.population(),
            "advanced generation"
        );
    }

    /// Advance `n` generations.
    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    fn compute_next(&mut self) -> Generation {
        self.candidates.begin_step();
        self.candidate_buf.clear();
        let live = self.current.population() as usize;
        // Dense blobs dedupe heavily; sparse dust approaches 27 slots per
        // live cell.
        self.candidates.reserve_for(live.saturating_mul(8));

        for (coord, _) in self.current.iter() {
            if self.candidates.insert(coord) {
                self.candidate_buf.push(coord);
            }
            for neighbor in coord.neighbors() {
                if self.candidates.insert(neighbor) {
                    self.candidate_buf.push(neighbor);
                }
            }
        }
        tracing::trace!(candidates = self.candidate_buf.len(), "frontier built");

        let rule = self.rule;
        let current = &self.current;
        let evaluate = move |coord: Coord| -> Option<(Coord, Cell)> {
            let neighbors = current.alive_neighbor_count(coord);
            match current.get(coord) {
                Some(cell) if rule.survives(neighbors) => Some((coord, cell.aged())),
                Some(_) => None,
                None if rule.born(neighbors) => Some((coord, Cell::new())),
                None => None,
            }
        };

        // Evaluation order is irrelevant: results are keyed by coordinate
        // and every count reads the immutable pre-step generation.
        let candidates = &self.candidate_buf;
        let cells: FxHashMap<Coord, Cell> =
            if self.threads > 1 && candidates.len() >= self.parallel_min_candidates {
                self.pool
                    .install(|| candidates.par_iter().copied().filter_map(evaluate).collect())
            } else {
                candidates.iter().copied().filter_map(evaluate).collect()
            };

        Generation::from_map(cells)
    }
}
