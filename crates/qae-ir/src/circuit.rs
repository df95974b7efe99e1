//! High-level circuit builder API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, RotationAxis};
use crate::parameter::{Angle, Parameter, ParameterList};
use crate::qubit::QubitId;

/// A quantum circuit over a fixed-width register.
///
/// Gates are kept in application order. Every gate added through the
/// checked builder methods acts only on qubits below the register width,
/// and each free parameter it references is recorded in [`parameters`]
/// in order of first appearance.
///
/// Deserialization replays every gate through [`Circuit::push`], so the
/// same checks apply and the parameter list is rebuilt from the gates.
///
/// [`parameters`]: Circuit::parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Register width.
    num_qubits: u32,
    /// Gates in application order.
    gates: Vec<Gate>,
    /// Free parameters in first-appearance order.
    parameters: ParameterList,
}

/// Wire form of a circuit; any serialized parameter list is ignored.
#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    num_qubits: u32,
    gates: Vec<Gate>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        let mut circuit = Circuit::new(raw.name, raw.num_qubits);
        for gate in raw.gates {
            circuit.push(gate)?;
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gates: vec![],
            parameters: ParameterList::new(),
        }
    }

    /// Append a gate after checking its operands.
    pub fn push(&mut self, gate: Gate) -> IrResult<&mut Self> {
        let qubits = gate.qubits();
        for (i, qubit) in qubits.iter().enumerate() {
            if !qubit.fits(self.num_qubits) {
                return Err(IrError::QubitNotFound {
                    qubit: *qubit,
                    width: self.num_qubits,
                    gate_name: Some(gate.name().to_string()),
                });
            }
            if qubits[..i].contains(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit: *qubit,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }
        if let Some(param) = gate.parameter() {
            self.parameters.insert_if_absent(param);
        }
        self.gates.push(gate);
        Ok(self)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Gate::rotation(RotationAxis::X, qubit, theta))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: impl Into<Angle>, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Gate::rotation(RotationAxis::Z, qubit, theta))
    }

    /// Apply controlled-Rx gate.
    pub fn crx(
        &mut self,
        theta: impl Into<Angle>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.push(Gate::controlled_rx(control, target, theta))
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Gate::reset(qubit))
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append all gates of `other`, which must have the same register width.
    pub fn compose(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits != self.num_qubits {
            return Err(IrError::WidthMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        for gate in &other.gates {
            self.push(gate.clone())?;
        }
        Ok(self)
    }

    /// The same gates in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Circuit {
        let mut parameters = ParameterList::new();
        let gates: Vec<Gate> = self.gates.iter().rev().cloned().collect();
        for param in gates.iter().filter_map(Gate::parameter) {
            parameters.insert_if_absent(param);
        }
        Circuit {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            gates,
            parameters,
        }
    }

    /// Rename the circuit.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace parameters by values, returning a new circuit.
    ///
    /// Parameters without an entry in `bindings` remain free.
    #[must_use]
    pub fn bind_parameters(&self, bindings: &[(Parameter, f64)]) -> Circuit {
        let gates: Vec<Gate> = self
            .gates
            .iter()
            .map(|gate| match gate.parameter() {
                Some(param) => match bindings.iter().find(|(p, _)| p == param) {
                    Some((p, value)) => gate.bind(p, *value),
                    None => gate.clone(),
                },
                None => gate.clone(),
            })
            .collect();

        let mut parameters = ParameterList::new();
        for param in gates.iter().filter_map(Gate::parameter) {
            parameters.insert_if_absent(param);
        }

        Circuit {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            gates,
            parameters,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the register width.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Free parameters in first-appearance order.
    pub fn parameters(&self) -> &ParameterList {
        &self.parameters
    }

    /// Number of distinct free parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    /// Check if any gate still references a free parameter.
    pub fn is_parameterized(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Count gates by name.
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for gate in &self.gates {
            *counts.entry(gate.name()).or_insert(0) += 1;
        }
        counts
    }
}
