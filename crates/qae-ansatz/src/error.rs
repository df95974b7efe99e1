//! Error types for ansatz construction, composition and binding.

use qae_ir::IrError;
use thiserror::Error;

use crate::binder::BindingWarning;

/// Broad category of an [`AnsatzError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported or malformed configuration.
    Configuration,
    /// A value outside its permitted range.
    Range,
    /// An unrecognized option value.
    InvalidOption,
    /// A violated structural invariant; indicates a logic defect.
    Structural,
    /// A binding anomaly rejected under the fail-fast policy.
    Binding,
}

/// Errors that can occur while building, composing or binding circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnsatzError {
    /// The ansatz is not defined for this qubit count.
    #[error("This ansatz is fixed for {supported} qubits, got {qubit_count}")]
    UnsupportedQubitCount {
        /// Requested qubit count.
        qubit_count: u32,
        /// The only supported qubit count.
        supported: u32,
    },

    /// A topology pair does not address two distinct logical qubits.
    #[error("Invalid entangling pair ({control}, {target}) for {qubit_count} qubits")]
    InvalidTopology {
        /// Control qubit of the pair.
        control: u32,
        /// Target qubit of the pair.
        target: u32,
        /// Logical qubit count.
        qubit_count: u32,
    },

    /// The layering policy cannot produce any layer.
    #[error("Invalid layering policy: {0}")]
    InvalidLayering(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Compression level outside `[1, qubit_count]`.
    #[error("Compression level must be between 1 and {qubit_count}, got {level}")]
    CompressionOutOfRange {
        /// Requested compression level.
        level: u32,
        /// Logical qubit count.
        qubit_count: u32,
    },

    /// Unrecognized decoder option.
    #[error(
        "Invalid decoder option '{0}': choose 1 (mirror-inverse) or 2 (independent-mirror)"
    )]
    InvalidDecoderOption(String),

    /// A composition stage has the wrong register width.
    #[error("Register width mismatch in {stage} stage: expected {expected}, got {got}")]
    RegisterWidthMismatch {
        /// Stage name (`encoder`, `reset` or `decoder`).
        stage: &'static str,
        /// Width of the composed register.
        expected: u32,
        /// Width of the offending stage.
        got: u32,
    },

    /// The built circuit does not carry the computed number of parameters.
    #[error("Parameter indexing mismatch: built {built}, expected {expected}")]
    ParameterCountMismatch {
        /// Count obtained by replaying the layer schedule.
        expected: usize,
        /// Count actually consumed by the emitted gates.
        built: usize,
    },

    /// Encoder and decoder parameters are not disjoint.
    #[error("Encoder and decoder share parameter '{0}'")]
    NamespaceCollision(String),

    /// A non-unitary gate was asked for its inverse.
    #[error("Cannot invert non-unitary operation: {0}")]
    NonUnitaryOperation(String),

    /// Binding anomaly under the fail-fast policy.
    #[error("Binding rejected: {0}")]
    BindingRejected(BindingWarning),

    /// IR-level failure.
    #[error(transparent)]
    Ir(#[from] IrError),
}

impl AnsatzError {
    /// Get the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnsatzError::UnsupportedQubitCount { .. }
            | AnsatzError::InvalidTopology { .. }
            | AnsatzError::InvalidLayering(_)
            | AnsatzError::Config(_) => ErrorKind::Configuration,
            AnsatzError::CompressionOutOfRange { .. } => ErrorKind::Range,
            AnsatzError::InvalidDecoderOption(_) => ErrorKind::InvalidOption,
            AnsatzError::RegisterWidthMismatch { .. }
            | AnsatzError::ParameterCountMismatch { .. }
            | AnsatzError::NamespaceCollision(_)
            | AnsatzError::NonUnitaryOperation(_)
            | AnsatzError::Ir(_) => ErrorKind::Structural,
            AnsatzError::BindingRejected(_) => ErrorKind::Binding,
        }
    }
}

/// Result type for ansatz operations.
pub type AnsatzResult<T> = Result<T, AnsatzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = AnsatzError::UnsupportedQubitCount {
            qubit_count: 5,
            supported: 4,
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "This ansatz is fixed for 4 qubits, got 5");

        let err = AnsatzError::CompressionOutOfRange {
            level: 0,
            qubit_count: 4,
        };
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err.to_string(),
            "Compression level must be between 1 and 4, got 0"
        );

        let err = AnsatzError::InvalidDecoderOption("3".into());
        assert_eq!(err.kind(), ErrorKind::InvalidOption);

        let err = AnsatzError::from(IrError::WidthMismatch {
            expected: 9,
            got: 4,
        });
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
}
