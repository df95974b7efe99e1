//! Qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit's register.
///
/// Ids are dense: a circuit of width `n` addresses qubits `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Get the raw register index.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    /// Check whether this qubit fits in a register of the given width.
    #[inline]
    pub fn fits(self, width: u32) -> bool {
        self.0 < width
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}
