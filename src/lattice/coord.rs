//! Lattice coordinates and the 26-point Moore neighborhood.

/// Offsets of the 26 Moore neighbors in 3D (3³ − 1, center excluded).
///
/// Fixed enumeration order: `dx` outermost, `dz` innermost, each running
/// −1, 0, +1 with the all-zero offset skipped.
pub const NEIGHBOR_OFFSETS: [(i64, i64, i64); 26] = neighbor_offsets();

const fn neighbor_offsets() -> [(i64, i64, i64); 26] {
    let mut out = [(0i64, 0i64, 0i64); 26];
    let mut i = 0;
    let mut dx = -1i64;
    while dx <= 1 {
        let mut dy = -1i64;
        while dy <= 1 {
            let mut dz = -1i64;
            while dz <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    out[i] = (dx, dy, dz);
                    i += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    out
}

/// A site on the infinite 3D integer lattice.
///
/// Purely positional: equality and hashing are component-wise, and the
/// coordinate carries no cell state of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Coord {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The 26 surrounding sites, in the fixed `NEIGHBOR_OFFSETS` order.
    ///
    /// Wraps at the i64 edge rather than panicking; the lattice is
    /// conceptually unbounded.
    #[inline]
    pub fn neighbors(self) -> [Self; 26] {
        let mut out = [self; 26];
        for (slot, &(dx, dy, dz)) in out.iter_mut().zip(NEIGHBOR_OFFSETS.iter()) {
            *slot = Self::new(
                self.x.wrapping_add(dx),
                self.y.wrapping_add(dy),
                self.z.wrapping_add(dz),
            );
        }
        out
    }
}

impl From<(i64, i64, i64)> for Coord {
    fn from((x, y, z): (i64, i64, i64)) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::{Coord, NEIGHBOR_OFFSETS};
    use std::collections::HashSet;

    #[test]
    fn offsets_cover_full_moore_shell() {
        let unique: HashSet<_> = NEIGHBOR_OFFSETS.iter().copied().collect();
        assert_eq!(unique.len(), 26);
        assert!(!unique.contains(&(0, 0, 0)));
        for &(dx, dy, dz) in &NEIGHBOR_OFFSETS {
            assert!(dx.abs() <= 1 && dy.abs() <= 1 && dz.abs() <= 1);
        }
    }

    #[test]
    fn neighbors_are_26_distinct_sites_around_center() {
        let c = Coord::new(7, -3, 100);
        let neighbors = c.neighbors();
        let unique: HashSet<_> = neighbors.iter().copied().collect();
        assert_eq!(unique.len(), 26);
        assert!(!unique.contains(&c));
        for n in neighbors {
            assert!((n.x - c.x).abs() <= 1);
            assert!((n.y - c.y).abs() <= 1);
            assert!((n.z - c.z).abs() <= 1);
        }
    }

    #[test]
    fn neighbor_order_is_deterministic() {
        let c = Coord::new(-9, 4, 2);
        assert_eq!(c.neighbors(), c.neighbors());
    }
}
