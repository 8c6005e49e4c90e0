use crate::foundation::error::{VizError, VizResult};

/// Playback tick interval in milliseconds (always > 0).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct SpeedMs(u64);

impl SpeedMs {
    /// Validate and wrap a tick interval.
    pub fn new(ms: u64) -> VizResult<Self> {
        if ms == 0 {
            return Err(VizError::invalid_input("tick interval must be > 0 ms"));
        }
        Ok(Self(ms))
    }

    /// Interval in milliseconds.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for SpeedMs {
    type Error = VizError;

    fn try_from(ms: u64) -> VizResult<Self> {
        Self::new(ms)
    }
}

impl From<SpeedMs> for u64 {
    fn from(s: SpeedMs) -> u64 {
        s.0
    }
}

/// Inclusive index range `[lo, hi]` into an array snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IndexRange {
    /// First index (inclusive).
    pub lo: usize,
    /// Last index (inclusive).
    pub hi: usize,
}

impl IndexRange {
    /// Build a range; `lo` and `hi` are swapped if given out of order.
    pub fn new(lo: usize, hi: usize) -> Self {
        if lo <= hi {
            Self { lo, hi }
        } else {
            Self { lo: hi, hi: lo }
        }
    }

    /// Whether `i` lies inside the range.
    pub fn contains(self, i: usize) -> bool {
        self.lo <= i && i <= self.hi
    }

    /// Number of indices covered.
    pub fn span(self) -> usize {
        self.hi - self.lo + 1
    }
}

/// Stable id of a node inside one generated call tree or binary tree.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
