//! Layered rotation/entanglement ansatz construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument};

use qae_ir::{Circuit, Parameter, ParameterList, QubitId, RotationAxis};

use crate::compression::validate_compression_level;
use crate::error::{AnsatzError, AnsatzResult};
use crate::layering::{LayerPlan, LayeringPolicy};
use crate::topology::Topology;

/// The only logical qubit count the reference ansatz family is defined for.
pub const SUPPORTED_QUBIT_COUNT: u32 = 4;

/// Register-width convention shared by every stage of one composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegisterLayout {
    /// Width equals the logical qubit count.
    Compact,
    /// Width `2 * qubit_count + 1`; the extra qubits host ancillas.
    #[default]
    AncillaAugmented,
}

impl RegisterLayout {
    /// Register width for `qubit_count` logical qubits.
    pub fn width(self, qubit_count: u32) -> u32 {
        match self {
            RegisterLayout::Compact => qubit_count,
            RegisterLayout::AncillaAugmented => 2 * qubit_count + 1,
        }
    }
}

impl fmt::Display for RegisterLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterLayout::Compact => write!(f, "compact"),
            RegisterLayout::AncillaAugmented => write!(f, "ancilla-augmented"),
        }
    }
}

impl FromStr for RegisterLayout {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(RegisterLayout::Compact),
            "ancilla-augmented" | "ancilla" => Ok(RegisterLayout::AncillaAugmented),
            other => Err(AnsatzError::Config(format!(
                "unknown register layout '{other}'"
            ))),
        }
    }
}

/// Everything needed to lay out one ansatz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsatzSpec {
    /// Logical qubit count.
    pub qubit_count: u32,
    /// Number of leading qubits surviving the reset stage.
    pub compression_level: u32,
    /// Layer stacking policy.
    pub layering: LayeringPolicy,
    /// Entangling pairs.
    pub topology: Topology,
}

impl AnsatzSpec {
    /// The reference configuration: 4 qubits, compression level 2, 4-cycle.
    pub fn reference(layering: LayeringPolicy) -> Self {
        Self {
            qubit_count: SUPPORTED_QUBIT_COUNT,
            compression_level: 2,
            layering,
            topology: Topology::reference(),
        }
    }

    /// Check qubit count, compression level, topology and policy.
    pub fn validate(&self) -> AnsatzResult<()> {
        if self.qubit_count != SUPPORTED_QUBIT_COUNT {
            return Err(AnsatzError::UnsupportedQubitCount {
                qubit_count: self.qubit_count,
                supported: SUPPORTED_QUBIT_COUNT,
            });
        }
        validate_compression_level(self.compression_level, self.qubit_count)?;
        self.topology.validate(self.qubit_count)?;
        self.layering.validate()
    }
}

/// Builds a layered ansatz circuit and its ordered parameter list.
#[derive(Debug, Clone)]
pub struct AnsatzBuilder {
    spec: AnsatzSpec,
    layout: RegisterLayout,
}

impl AnsatzBuilder {
    /// Create a builder using the ancilla-augmented layout.
    pub fn new(spec: AnsatzSpec) -> Self {
        Self {
            spec,
            layout: RegisterLayout::default(),
        }
    }

    /// Select the register layout.
    #[must_use]
    pub fn with_layout(mut self, layout: RegisterLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Get the ansatz spec.
    pub fn spec(&self) -> &AnsatzSpec {
        &self.spec
    }

    /// Get the register layout.
    pub fn layout(&self) -> RegisterLayout {
        self.layout
    }

    /// Width of the register the ansatz is built on.
    pub fn register_width(&self) -> u32 {
        self.layout.width(self.spec.qubit_count)
    }

    /// Validate and replay the layer schedule.
    pub fn plan(&self) -> AnsatzResult<Vec<LayerPlan>> {
        self.spec.validate()?;
        Ok(self.spec.layering.plan(
            self.spec.qubit_count,
            self.spec.compression_level,
            &self.spec.topology,
        ))
    }

    /// Total parameter count, summed over the replayed schedule.
    pub fn parameter_count(&self) -> AnsatzResult<usize> {
        Ok(self.plan()?.iter().map(LayerPlan::parameter_count).sum())
    }

    /// Build the ansatz with parameters `namespace[0..n]`.
    ///
    /// Parameters are allocated strictly in gate emission order. The
    /// returned list is the binding order.
    #[instrument(skip(self), fields(layering = %self.spec.layering))]
    pub fn build(&self, namespace: &str) -> AnsatzResult<(Circuit, ParameterList)> {
        let plan = self.plan()?;
        let expected: usize = plan.iter().map(LayerPlan::parameter_count).sum();
        let params = ParameterList::vector(namespace, expected)?;

        let mut circuit = Circuit::new(format!("ansatz_{namespace}"), self.register_width());
        let mut alloc = ParamAllocator::new(&params);

        for (layer, step) in plan.iter().enumerate() {
            for (axis, qubit) in step.rotations() {
                let theta = alloc.next_param()?;
                match axis {
                    RotationAxis::X => circuit.rx(theta, qubit)?,
                    RotationAxis::Z => circuit.rz(theta, qubit)?,
                };
            }
            for &(control, target) in &step.pairs {
                let theta = alloc.next_param()?;
                circuit.crx(theta, QubitId(control), QubitId(target))?;
            }
            debug!(
                "Layer {layer}: {} active qubits, {} entangling pairs, {} parameters",
                step.active,
                step.pairs.len(),
                step.parameter_count()
            );
        }

        if alloc.consumed() != expected {
            return Err(AnsatzError::ParameterCountMismatch {
                expected,
                built: alloc.consumed(),
            });
        }
        if circuit.num_parameters() != expected {
            return Err(AnsatzError::ParameterCountMismatch {
                expected,
                built: circuit.num_parameters(),
            });
        }

        info!(
            "Built ansatz '{namespace}' with {} layers, {} gates, {} parameters on {} qubits",
            plan.len(),
            circuit.len(),
            expected,
            circuit.num_qubits()
        );
        Ok((circuit, params))
    }
}

/// Hands out parameters from a list in order, never wrapping around.
struct ParamAllocator<'a> {
    params: &'a ParameterList,
    next: usize,
}

impl<'a> ParamAllocator<'a> {
    fn new(params: &'a ParameterList) -> Self {
        Self { params, next: 0 }
    }

    fn next_param(&mut self) -> AnsatzResult<Parameter> {
        let param = self
            .params
            .get(self.next)
            .cloned()
            .ok_or(AnsatzError::ParameterCountMismatch {
                expected: self.params.len(),
                built: self.next + 1,
            })?;
        self.next += 1;
        Ok(param)
    }

    fn consumed(&self) -> usize {
        self.next
    }
}
