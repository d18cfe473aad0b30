//! Sparse cell store: the complete set of live cells at one step.

use rustc_hash::FxHashMap;

use super::coord::Coord;

/// A single live cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Generations this cell has been alive. 1 at birth, incremented each
    /// generation it survives. Saturates rather than wrapping.
    pub age: u32,
}

impl Cell {
    /// A newborn cell.
    pub const fn new() -> Self {
        Self { age: 1 }
    }

    pub const fn with_age(age: u32) -> Self {
        Self { age }
    }

    /// The same cell one survived generation later.
    #[inline]
    pub(crate) const fn aged(self) -> Self {
        Self {
            age: self.age.saturating_add(1),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

/// Sparse map from lattice site to live cell.
///
/// Invariant: a coordinate is a key if and only if that site is alive in
/// this generation. The lattice itself is unbounded; memory scales with the
/// live population, never with any volume.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generation {
    cells: FxHashMap<Coord, Cell>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a generation from `(coordinate, cell)` seed pairs.
    /// Later duplicates overwrite earlier ones.
    pub fn from_seed<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = (Coord, Cell)>,
    {
        Self {
            cells: seed.into_iter().collect(),
        }
    }

    pub(crate) fn from_map(cells: FxHashMap<Coord, Cell>) -> Self {
        Self { cells }
    }

    /// Whether the site at `coord` is alive.
    #[inline]
    pub fn is_alive(&self, coord: Coord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// The live cell at `coord`, if any.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.cells.get(&coord).copied()
    }

    /// How many of the 26 Moore neighbors of `coord` are alive. Pure read;
    /// `coord` itself is never counted.
    #[inline]
    pub fn alive_neighbor_count(&self, coord: Coord) -> u8 {
        let mut count = 0u8;
        for n in coord.neighbors() {
            if self.cells.contains_key(&n) {
                count += 1;
            }
        }
        count
    }

    /// Make the site at `coord` alive (as a newborn) or dead.
    pub fn set_cell(&mut self, coord: Coord, alive: bool) {
        if alive {
            self.cells.insert(coord, Cell::new());
        } else {
            self.cells.remove(&coord);
        }
    }

    pub fn insert(&mut self, coord: Coord, cell: Cell) {
        self.cells.insert(coord, cell);
    }

    pub fn population(&self) -> u64 {
        self.cells.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over every live `(coordinate, cell)` pair. No ordering
    /// guarantee.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells.iter().map(|(&coord, &cell)| (coord, cell))
    }
}

impl FromIterator<(Coord, Cell)> for Generation {
    fn from_iter<I: IntoIterator<Item = (Coord, Cell)>>(iter: I) -> Self {
        Self::from_seed(iter)
    }
}
