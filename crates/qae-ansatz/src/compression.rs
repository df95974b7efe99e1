//! The reset stage that models information loss at the bottleneck.

use std::ops::Range;
use tracing::debug;

use qae_ir::{Circuit, QubitId};

use crate::error::{AnsatzError, AnsatzResult};

/// Check `1 <= level <= qubit_count`.
pub fn validate_compression_level(level: u32, qubit_count: u32) -> AnsatzResult<()> {
    if level < 1 || level > qubit_count {
        return Err(AnsatzError::CompressionOutOfRange { level, qubit_count });
    }
    Ok(())
}

/// Discards every logical qubit at or beyond the compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionScheme {
    qubit_count: u32,
    compression_level: u32,
}

impl CompressionScheme {
    /// Create a scheme, validating the compression level.
    pub fn new(qubit_count: u32, compression_level: u32) -> AnsatzResult<Self> {
        validate_compression_level(compression_level, qubit_count)?;
        Ok(Self {
            qubit_count,
            compression_level,
        })
    }

    /// Number of surviving leading qubits.
    pub fn compression_level(&self) -> u32 {
        self.compression_level
    }

    /// Logical qubits that are reset.
    pub fn discarded(&self) -> Range<u32> {
        self.compression_level..self.qubit_count
    }

    /// Build the reset stage on a register of `register_width` qubits.
    ///
    /// Qubits beyond the logical count (ancillas) are never reset.
    pub fn build_reset(&self, register_width: u32) -> AnsatzResult<Circuit> {
        let mut circuit = Circuit::new("reset", register_width);
        for qubit in self.discarded() {
            circuit.reset(QubitId(qubit))?;
        }
        debug!(
            "Reset stage discards {} of {} qubits on width {register_width}",
            circuit.len(),
            self.qubit_count
        );
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use qae_ir::Gate;

    #[test]
    fn test_resets_discarded_qubits() {
        let scheme = CompressionScheme::new(4, 2).unwrap();
        let circuit = scheme.build_reset(9).unwrap();
        assert_eq!(circuit.num_qubits(), 9);
        assert_eq!(
            circuit.gates(),
            &[Gate::reset(QubitId(2)), Gate::reset(QubitId(3))]
        );
        assert!(!circuit.is_parameterized());
    }

    #[test]
    fn test_no_compression_is_empty() {
        let circuit = CompressionScheme::new(4, 4)
            .unwrap()
            .build_reset(9)
            .unwrap();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_maximum_compression() {
        let circuit = CompressionScheme::new(4, 1)
            .unwrap()
            .build_reset(4)
            .unwrap();
        assert_eq!(circuit.len(), 3);
        for gate in circuit.gates() {
            let q = gate.qubits()[0].index();
            assert!((1..4).contains(&q));
        }
    }

    #[test]
    fn test_out_of_range() {
        for level in [0, 5, 100] {
            let err = CompressionScheme::new(4, level).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range);
        }
    }

    #[test]
    fn test_register_too_narrow() {
        let err = CompressionScheme::new(4, 1)
            .unwrap()
            .build_reset(2)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
}
