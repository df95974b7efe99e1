//! Error types for the IR crate.

use crate::parameter::Parameter;
use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit lies outside the circuit's register.
    #[error(
        "Qubit {qubit} not found in circuit of width {width}{}",
        format_gate_context(.gate_name)
    )]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Register width of the circuit.
        width: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Two circuits with different register widths were combined.
    #[error("Register width mismatch: expected {expected} qubits, got {got}")]
    WidthMismatch {
        /// Width of the receiving circuit.
        expected: u32,
        /// Width of the appended circuit.
        got: u32,
    },

    /// A parameter list already holds this parameter.
    #[error("Duplicate parameter '{0}'")]
    DuplicateParameter(Parameter),

    /// Parameter indices must fit in `u32`.
    #[error("Cannot index {0} parameters")]
    ParameterIndexOverflow(usize),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
