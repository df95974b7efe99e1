//! Entangling topologies.

use serde::{Deserialize, Serialize};

use crate::error::{AnsatzError, AnsatzResult};

/// Ordered `(control, target)` pairs eligible for controlled rotations.
///
/// Pair order is gate order: the builder emits one controlled rotation per
/// applicable pair, in the order listed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topology {
    pairs: Vec<(u32, u32)>,
}

impl Topology {
    /// Create a topology from explicit pairs.
    pub fn new(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    /// The descending ring `[(n-1, 0), (n-2, n-1), ..., (0, 1)]`.
    pub fn ring(num_qubits: u32) -> Self {
        if num_qubits < 2 {
            return Self { pairs: vec![] };
        }
        let mut pairs = vec![(num_qubits - 1, 0)];
        pairs.extend((0..num_qubits - 1).rev().map(|i| (i, i + 1)));
        Self { pairs }
    }

    /// The 4-cycle `[(3,0), (2,3), (1,2), (0,1)]` used by the reference ansatz.
    pub fn reference() -> Self {
        Self::ring(4)
    }

    /// All pairs, in gate order.
    pub fn pairs(&self) -> &[(u32, u32)] {
        &self.pairs
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if the topology has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs whose endpoints both lie below `active`.
    ///
    /// Pairs are never re-indexed: a pair touching a qubit at or beyond
    /// `active` is dropped entirely.
    pub fn active_pairs(&self, active: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.pairs
            .iter()
            .copied()
            .filter(move |&(c, t)| c < active && t < active)
    }

    /// Check every pair addresses two distinct qubits below `qubit_count`.
    pub fn validate(&self, qubit_count: u32) -> AnsatzResult<()> {
        for &(control, target) in &self.pairs {
            if control >= qubit_count || target >= qubit_count || control == target {
                return Err(AnsatzError::InvalidTopology {
                    control,
                    target,
                    qubit_count,
                });
            }
        }
        Ok(())
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_ring() {
        assert_eq!(
            Topology::reference().pairs(),
            &[(3, 0), (2, 3), (1, 2), (0, 1)]
        );
        assert_eq!(Topology::ring(2).pairs(), &[(1, 0), (0, 1)]);
        assert!(Topology::ring(1).is_empty());
    }

    #[test]
    fn test_active_pairs_truncate_asymmetrically() {
        let topology = Topology::reference();
        let counts: Vec<usize> = [4, 3, 2, 1]
            .iter()
            .map(|&a| topology.active_pairs(a).count())
            .collect();
        assert_eq!(counts, vec![4, 2, 1, 0]);

        let at_three: Vec<_> = topology.active_pairs(3).collect();
        assert_eq!(at_three, vec![(1, 2), (0, 1)]);
    }

    #[test]
    fn test_validate() {
        assert!(Topology::reference().validate(4).is_ok());

        let err = Topology::reference().validate(3).unwrap_err();
        assert!(matches!(
            err,
            AnsatzError::InvalidTopology {
                control: 3,
                target: 0,
                ..
            }
        ));

        assert!(Topology::new([(1, 1)]).validate(4).is_err());
    }

    #[test]
    fn test_serde_as_pair_list() {
        let json = serde_json::to_string(&Topology::reference()).unwrap();
        assert_eq!(json, "[[3,0],[2,3],[1,2],[0,1]]");
        let decoded: Topology = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, Topology::reference());
    }
}
