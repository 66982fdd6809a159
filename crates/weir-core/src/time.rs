//! The simulated clock unit.

use std::fmt;

/// One instant on the simulated timeline.
///
/// The simulation advances in whole ticks; every rate cap in the
/// system is expressed as "units per tick". Tick 0 is the instant
/// before anything has run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tick(pub u64);

impl Tick {
    /// The instant before the simulation has advanced at all.
    pub const ZERO: Tick = Tick(0);

    /// The tick `n` steps after this one.
    #[must_use]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Tick {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
