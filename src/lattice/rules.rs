//! Birth/survival rule configuration.

use thiserror::Error;

/// Number of Moore neighbors a 3D lattice site has.
pub const MAX_NEIGHBORS: u8 = 26;

/// Rule configuration error. Surfaced at construction or update time,
/// never during a step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A threshold range has `min > max`.
    #[error("{which} range inverted: min {min} > max {max}")]
    InvertedRange {
        which: &'static str,
        min: u8,
        max: u8,
    },

    /// A threshold exceeds the 26-neighbor maximum.
    #[error("{which} threshold {value} exceeds the {MAX_NEIGHBORS}-neighbor maximum")]
    OutOfBounds { which: &'static str, value: u8 },

    /// A rule string could not be parsed.
    #[error("malformed rule string {0:?} (expected e.g. \"B4-5/S4-5\")")]
    MalformedRule(String),
}

/// Validated birth/survival thresholds.
///
/// A dead site is born when its alive-neighbor count lies in
/// `[birth_min, birth_max]`; a live site survives when its count lies in
/// `[survival_min, survival_max]`. Both ranges are inclusive on both ends.
/// Values are checked once here so stepping never has to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    birth_min: u8,
    birth_max: u8,
    survival_min: u8,
    survival_max: u8,
}

impl Default for Rule {
    /// The common 3D variant B4-5/S4-5.
    fn default() -> Self {
        Self {
            birth_min: 4,
            birth_max: 5,
            survival_min: 4,
            survival_max: 5,
        }
    }
}

fn check_range(which: &'static str, min: u8, max: u8) -> Result<(), ConfigError> {
    if min > MAX_NEIGHBORS {
        return Err(ConfigError::OutOfBounds { which, value: min });
    }
    if max > MAX_NEIGHBORS {
        return Err(ConfigError::OutOfBounds { which, value: max });
    }
    if min > max {
        return Err(ConfigError::InvertedRange { which, min, max });
    }
    Ok(())
}

impl Rule {
    pub fn new(
        birth_min: u8,
        birth_max: u8,
        survival_min: u8,
        survival_max: u8,
    ) -> Result<Self, ConfigError> {
        check_range("birth", birth_min, birth_max)?;
        check_range("survival", survival_min, survival_max)?;
        Ok(Self {
            birth_min,
            birth_max,
            survival_min,
            survival_max,
        })
    }

    /// Parse a rule string such as `"B4-5/S4-5"` or `"B6/S5-7"`.
    /// A bare number stands for a single-value range.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let malformed = || ConfigError::MalformedRule(s.to_string());
        let (birth_part, survival_part) = s.split_once('/').ok_or_else(malformed)?;
        let birth_part = birth_part
            .strip_prefix(['B', 'b'])
            .ok_or_else(malformed)?;
        let survival_part = survival_part
            .strip_prefix(['S', 's'])
            .ok_or_else(malformed)?;

        let parse_range = |part: &str| -> Result<(u8, u8), ConfigError> {
            let (lo, hi) = match part.split_once('-') {
                Some((lo, hi)) => (lo, hi),
                None => (part, part),
            };
            let lo: u8 = lo.trim().parse().map_err(|_| malformed())?;
            let hi: u8 = hi.trim().parse().map_err(|_| malformed())?;
            Ok((lo, hi))
        };

        let (birth_min, birth_max) = parse_range(birth_part)?;
        let (survival_min, survival_max) = parse_range(survival_part)?;
        Self::new(birth_min, birth_max, survival_min, survival_max)
    }

    /// Whether a dead site with `neighbors` alive neighbors is born.
    #[inline]
    pub const fn born(&self, neighbors: u8) -> bool {
        self.birth_min <= neighbors && neighbors <= self.birth_max
    }

    /// Whether a live site with `neighbors` alive neighbors survives.
    #[inline]
    pub const fn survives(&self, neighbors: u8) -> bool {
        self.survival_min <= neighbors && neighbors <= self.survival_max
    }

    pub const fn birth_min(&self) -> u8 {
        self.birth_min
    }

    pub const fn birth_max(&self) -> u8 {
        self.birth_max
    }

    pub const fn survival_min(&self) -> u8 {
        self.survival_min
    }

    pub const fn survival_max(&self) -> u8 {
        self.survival_max
    }
}
