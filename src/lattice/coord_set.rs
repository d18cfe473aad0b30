//! Reusable coordinate deduper for candidate-frontier generation.
//!
//! This is an open-addressed linear-probing hash set for lattice coordinates.
//! Slots are lazily cleared with an epoch stamp, so each simulation step can
//! start a fresh set without touching the full backing array.

use super::coord::Coord;

const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

#[derive(Clone, Copy)]
#[repr(C)]
struct Slot {
    coord: Coord,
    stamp: u32,
}

impl Slot {
    const EMPTY: Self = Self {
        coord: Coord::new(0, 0, 0),
        stamp: 0,
    };
}

#[inline(always)]
fn coord_hash(c: Coord) -> u64 {
    // Lightweight per-axis multiplicative mix; one odd constant per axis.
    const MX: u64 = 0x517c_c1b7_2722_0a95;
    const MY: u64 = 0x6c62_272e_07bb_0142;
    const MZ: u64 = 0x9e37_79b9_7f4a_7c15;
    let hx = (c.x as u64).wrapping_mul(MX);
    let hy = (c.y as u64).wrapping_mul(MY);
    let hz = (c.z as u64).wrapping_mul(MZ);
    hx ^ hy.rotate_right(21) ^ hz.rotate_right(42)
}

pub struct CoordSet {
    slots: Vec<Slot>,
    mask: usize,
    stamp: u32,
    len: usize,
}

impl CoordSet {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(cap: usize) -> Self {
        let slots = cap
            .saturating_mul(LOAD_DEN)
            .div_ceil(LOAD_NUM)
            .next_power_of_two()
            .max(16);
        Self {
            slots: vec![Slot::EMPTY; slots],
            mask: slots - 1,
            stamp: 1,
            len: 0,
        }
    }

    #[inline]
    pub fn begin_step(&mut self) {
        self.len = 0;
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.stamp = 1;
            for slot in &mut self.slots {
                slot.stamp = 0;
            }
        }
    }

    #[inline]
    pub fn reserve_for(&mut self, keys: usize) {
        if keys == 0 {
            return;
        }
        let needed = keys
            .saturating_mul(LOAD_DEN)
            .div_ceil(LOAD_NUM)
            .next_power_of_two()
            .max(16);
        if needed > self.slots.len() {
            self.resize(needed);
        }
    }

    #[inline(always)]
    fn needs_grow(&self) -> bool {
        self.len * LOAD_DEN >= self.slots.len() * LOAD_NUM
    }

    #[inline]
    fn resize(&mut self, new_slots: usize) {
        debug_assert!(new_slots.is_power_of_two());
        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::EMPTY; new_slots]);
        self.mask = new_slots - 1;
        self.len = 0;

        for slot in old_slots {
            if slot.stamp == self.stamp {
                self.insert_rehash(slot.coord);
            }
        }
    }

    #[inline(always)]
    fn insert_rehash(&mut self, coord: Coord) {
        let mask = self.mask;
        let mut pos = coord_hash(coord) as usize & mask;

        loop {
            let slot = unsafe { self.slots.get_unchecked_mut(pos) };
            if slot.stamp != self.stamp {
                *slot = Slot {
                    coord,
                    stamp: self.stamp,
                };
                self.len += 1;
                return;
            }
            pos = (pos + 1) & mask;
        }
    }

    /// Insert a coordinate.
    /// Returns `true` if newly inserted, `false` if it already existed.
    #[inline]
    pub fn insert(&mut self, coord: Coord) -> bool {
        if self.needs_grow() {
            self.resize((self.slots.len() * 2).max(16));
        }

        let mask = self.mask;
        let mut pos = coord_hash(coord) as usize & mask;
        loop {
            let slot = unsafe { self.slots.get_unchecked_mut(pos) };
            if slot.stamp != self.stamp {
                *slot = Slot {
                    coord,
                    stamp: self.stamp,
                };
                self.len += 1;
                return true;
            }
            if slot.coord == coord {
                return false;
            }
            pos = (pos + 1) & mask;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoordSet;
    use crate::lattice::coord::Coord;

    #[test]
    fn dedups_within_step_and_resets_across_steps() {
        let mut set = CoordSet::new();
        set.begin_step();
        assert!(set.insert(Coord::new(1, 2, 3)));
        assert!(!set.insert(Coord::new(1, 2, 3)));
        assert!(set.insert(Coord::new(-5, 9, 0)));

        set.begin_step();
        assert!(set.insert(Coord::new(1, 2, 3)));
        assert!(!set.insert(Coord::new(1, 2, 3)));
    }

    #[test]
    fn axes_are_not_interchangeable() {
        let mut set = CoordSet::new();
        set.begin_step();
        assert!(set.insert(Coord::new(1, 0, 0)));
        assert!(set.insert(Coord::new(0, 1, 0)));
        assert!(set.insert(Coord::new(0, 0, 1)));
        assert!(!set.insert(Coord::new(1, 0, 0)));
    }

    #[test]
    fn reserve_and_insert_many() {
        let mut set = CoordSet::with_capacity(8);
        set.begin_step();
        set.reserve_for(10_000);
        for i in 0..10_000i64 {
            assert!(set.insert(Coord::new(i, -i, i ^ 3)));
        }
        for i in 0..10_000i64 {
            assert!(!set.insert(Coord::new(i, -i, i ^ 3)));
        }
    }
}
