use crate::{Error, Result};

/// Integer room reserved per entry between consecutive leaf keys.
pub const DEFAULT_SCALING_FACTOR: u64 = 100;

/// Tree configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Spacing between consecutive leaf keys. Leaf keys must be multiples of
    /// it; each aggregate node takes the midpoint `leaf key + scaling / 2`.
    pub scaling_factor: u64,
    /// Run a second re-merkle pass after the aggregate node of an insertion
    /// has been placed and rebalanced.
    ///
    /// Without it, rotations caused by the aggregate node can leave ancestor
    /// digests stale until the next insertion, and entries that are present
    /// fail verification in the meantime.
    pub remerkle_after_aggregate: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            scaling_factor: DEFAULT_SCALING_FACTOR,
            remerkle_after_aggregate: true,
        }
    }
}

impl TreeConfig {
    /// Config with the given scaling factor and default schedule.
    pub fn with_scaling_factor(scaling_factor: u64) -> Self {
        Self {
            scaling_factor,
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.scaling_factor < 2 {
            return Err(Error::InvalidConfig("scaling factor must be at least 2"));
        }
        if self.scaling_factor % 2 != 0 {
            return Err(Error::InvalidConfig("scaling factor must be even"));
        }
        Ok(())
    }

    /// Offset of an aggregate key from its leaf key, and the divisor mapping
    /// keys to color slots.
    pub fn half_scaling(&self) -> u64 {
        self.scaling_factor / 2
    }
}
