//! Binding a flat value vector onto a composed circuit.
//!
//! Binding runs in three steps:
//!
//! 1. [`ParameterBinder::binding_map`] zips encoder then decoder parameters
//!    with the values, reporting shortfall or excess.
//! 2. [`ParameterBinder::filter_to_circuit`] drops entries whose parameter
//!    no longer appears in the circuit.
//! 3. [`ParameterBinder::bind`] applies the policy and substitutes values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use qae_ir::{Circuit, Parameter, ParameterList};

use crate::composer::Composition;
use crate::error::{AnsatzError, AnsatzResult};

/// Non-fatal binding anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingWarning {
    /// Fewer values than declared parameters; trailing parameters stay free.
    #[error("{supplied} values supplied for {declared} declared parameters")]
    ValueShortfall {
        /// Declared parameter count.
        declared: usize,
        /// Number of values supplied.
        supplied: usize,
    },
    /// More values than declared parameters; the excess is ignored.
    #[error("{supplied} values supplied for {declared} declared parameters, excess ignored")]
    ExcessValues {
        /// Declared parameter count.
        declared: usize,
        /// Number of values supplied.
        supplied: usize,
    },
    /// A declared parameter does not appear in the circuit.
    #[error("parameter {0} is not used by the circuit, value dropped")]
    ParameterNotInCircuit(Parameter),
}

/// What to do with a [`BindingWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingPolicy {
    /// Log the warning and bind on a best-effort basis.
    #[default]
    DropAndWarn,
    /// Reject the binding on the first warning.
    FailFast,
}

impl fmt::Display for BindingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingPolicy::DropAndWarn => write!(f, "drop-and-warn"),
            BindingPolicy::FailFast => write!(f, "fail-fast"),
        }
    }
}

impl FromStr for BindingPolicy {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop-and-warn" | "warn" => Ok(BindingPolicy::DropAndWarn),
            "fail-fast" | "strict" => Ok(BindingPolicy::FailFast),
            other => Err(AnsatzError::Config(format!(
                "unknown binding policy '{other}'"
            ))),
        }
    }
}

/// A circuit with values substituted, plus the warnings raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCircuit {
    /// The bound circuit.
    pub circuit: Circuit,
    /// Warnings collected during binding.
    pub warnings: Vec<BindingWarning>,
}

impl BoundCircuit {
    /// True if no symbolic parameter remains.
    pub fn is_fully_bound(&self) -> bool {
        !self.circuit.is_parameterized()
    }
}

/// Maps flat value vectors onto symbolic parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterBinder {
    policy: BindingPolicy,
}

impl ParameterBinder {
    /// Create a binder with the drop-and-warn policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a binder with a specific policy.
    pub fn with_policy(policy: BindingPolicy) -> Self {
        Self { policy }
    }

    /// Get the binding policy.
    pub fn policy(&self) -> BindingPolicy {
        self.policy
    }

    /// Zip encoder then decoder parameters with `values`.
    ///
    /// A later entry for the same parameter replaces the earlier one.
    pub fn binding_map(
        encoder_params: &ParameterList,
        decoder_params: Option<&ParameterList>,
        values: &[f64],
    ) -> (Vec<(Parameter, f64)>, Vec<BindingWarning>) {
        let declared = encoder_params.len() + decoder_params.map_or(0, ParameterList::len);
        let mut warnings = Vec::new();
        if values.len() < declared {
            warnings.push(BindingWarning::ValueShortfall {
                declared,
                supplied: values.len(),
            });
        } else if values.len() > declared {
            warnings.push(BindingWarning::ExcessValues {
                declared,
                supplied: values.len(),
            });
        }

        let params = encoder_params
            .iter()
            .chain(decoder_params.into_iter().flat_map(ParameterList::iter));

        let mut map: Vec<(Parameter, f64)> = Vec::with_capacity(declared.min(values.len()));
        for (param, &value) in params.zip(values) {
            match map.iter_mut().find(|(p, _)| p == param) {
                Some(entry) => entry.1 = value,
                None => map.push((param.clone(), value)),
            }
        }
        (map, warnings)
    }

    /// Keep only entries whose parameter the circuit still uses.
    pub fn filter_to_circuit(
        map: Vec<(Parameter, f64)>,
        circuit: &Circuit,
    ) -> (Vec<(Parameter, f64)>, Vec<BindingWarning>) {
        let mut warnings = Vec::new();
        let kept = map
            .into_iter()
            .filter(|(param, _)| {
                let used = circuit.parameters().contains(param);
                if !used {
                    warnings.push(BindingWarning::ParameterNotInCircuit(param.clone()));
                }
                used
            })
            .collect();
        (kept, warnings)
    }

    /// Bind `values` onto `circuit`.
    ///
    /// The first `encoder_params.len()` values bind the encoder, the next
    /// `decoder_params.len()` bind the decoder.
    #[instrument(skip_all, fields(policy = %self.policy, values = values.len()))]
    pub fn bind(
        &self,
        circuit: &Circuit,
        encoder_params: &ParameterList,
        decoder_params: Option<&ParameterList>,
        values: &[f64],
    ) -> AnsatzResult<BoundCircuit> {
        let (map, mut warnings) = Self::binding_map(encoder_params, decoder_params, values);
        let (map, dropped) = Self::filter_to_circuit(map, circuit);
        warnings.extend(dropped);

        if self.policy == BindingPolicy::FailFast {
            if let Some(first) = warnings.into_iter().next() {
                return Err(AnsatzError::BindingRejected(first));
            }
            warnings = Vec::new();
        }
        for warning in &warnings {
            warn!("{warning}");
        }

        let bound = circuit.bind_parameters(&map);
        debug!(
            "Bound {} parameters, {} left free",
            map.len(),
            bound.num_parameters()
        );
        Ok(BoundCircuit {
            circuit: bound,
            warnings,
        })
    }

    /// Bind `values` onto a composition.
    pub fn bind_composition(
        &self,
        composition: &Composition,
        values: &[f64],
    ) -> AnsatzResult<BoundCircuit> {
        self.bind(
            &composition.circuit,
            &composition.encoder_params,
            composition.decoder_params.as_ref(),
            values,
        )
    }
}
