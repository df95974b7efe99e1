//! Decoder transforms that mirror an encoder.

use qae_ir::{Circuit, Gate};

use crate::error::{AnsatzError, AnsatzResult};

/// Compute the inverse of a gate.
///
/// Rotations are inverted by flipping their sign, so the inverse keeps
/// the same parameter:
///
/// - Rx(θ)† = Rx(-θ)
/// - CRx(θ)† = CRx(-θ)
pub fn inverse_gate(gate: &Gate) -> AnsatzResult<Gate> {
    if !gate.is_unitary() {
        return Err(AnsatzError::NonUnitaryOperation(gate.name().into()));
    }
    Ok(gate.with_flipped_sign())
}

/// Structural inverse: reversed gate order, every sign flipped.
///
/// No new parameters are introduced.
pub fn inverse(circuit: &Circuit) -> AnsatzResult<Circuit> {
    let mut inverted = Circuit::new(format!("{}_dg", circuit.name()), circuit.num_qubits());
    for gate in circuit.gates().iter().rev() {
        inverted.push(inverse_gate(gate)?)?;
    }
    Ok(inverted)
}

/// Reversed gate order with signs untouched.
///
/// Unlike [`inverse`], this is not a true inverse; the angles stay
/// independently trainable.
pub fn reverse_ops(circuit: &Circuit) -> Circuit {
    let name = format!("{}_reverse", circuit.name());
    circuit.reversed().with_name(name)
}
