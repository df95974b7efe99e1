//! Layering policies and the layer schedules they produce.
//!
//! A policy is expanded into a list of [`LayerPlan`]s by replaying its layer
//! loop. The builder emits gates from the plan, and parameter counts are
//! summed from the same plan, so both always agree on the schedule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use qae_ir::{QubitId, RotationAxis};

use crate::error::{AnsatzError, AnsatzResult};
use crate::topology::Topology;

/// Upper bound on fixed-repeat layers.
pub const MAX_REPEATS: usize = 1024;

/// How rotations within a layer are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOrder {
    /// Every qubit gets the first axis, then every qubit gets the next axis.
    AxisMajor,
    /// Each qubit gets its full axis sequence before the next qubit.
    QubitMajor,
}

/// How layers are stacked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LayeringPolicy {
    /// `repeats` identical layers over all qubits.
    FixedRepeat {
        /// Number of layers.
        repeats: usize,
        /// Rotation axes applied to every qubit in each layer.
        axes: Vec<RotationAxis>,
    },
    /// One layer per discarded qubit plus one, shrinking the active
    /// register by one qubit per layer.
    Adaptive,
}

impl LayeringPolicy {
    /// One layer of X then Z rotations (12 parameters on 4 qubits).
    pub fn single() -> Self {
        Self::repeated(1)
    }

    /// One layer of X, Z, X, Z rotations (20 parameters on 4 qubits).
    pub fn double_rotation() -> Self {
        LayeringPolicy::FixedRepeat {
            repeats: 1,
            axes: vec![
                RotationAxis::X,
                RotationAxis::Z,
                RotationAxis::X,
                RotationAxis::Z,
            ],
        }
    }

    /// `repeats` copies of the single X/Z layer.
    pub fn repeated(repeats: usize) -> Self {
        LayeringPolicy::FixedRepeat {
            repeats,
            axes: vec![RotationAxis::X, RotationAxis::Z],
        }
    }

    /// The adaptive shrinking schedule.
    pub fn adaptive() -> Self {
        LayeringPolicy::Adaptive
    }

    /// Reject policies that cannot produce a layer.
    pub fn validate(&self) -> AnsatzResult<()> {
        match self {
            LayeringPolicy::FixedRepeat { repeats, axes } => {
                if *repeats == 0 {
                    return Err(AnsatzError::InvalidLayering(
                        "fixed-repeat needs at least one layer".into(),
                    ));
                }
                if *repeats > MAX_REPEATS {
                    return Err(AnsatzError::InvalidLayering(format!(
                        "fixed-repeat allows at most {MAX_REPEATS} layers, got {repeats}"
                    )));
                }
                if axes.is_empty() {
                    return Err(AnsatzError::InvalidLayering(
                        "fixed-repeat needs at least one rotation axis".into(),
                    ));
                }
                Ok(())
            }
            LayeringPolicy::Adaptive => Ok(()),
        }
    }

    /// Number of layers for a register of `qubit_count` compressed to
    /// `compression_level`.
    pub fn layer_count(&self, qubit_count: u32, compression_level: u32) -> usize {
        match self {
            LayeringPolicy::FixedRepeat { repeats, .. } => *repeats,
            LayeringPolicy::Adaptive => {
                (qubit_count.saturating_sub(compression_level) + 1) as usize
            }
        }
    }

    /// Replay the layer loop into a schedule.
    ///
    /// Assumes the policy, topology and compression level were validated.
    pub fn plan(
        &self,
        qubit_count: u32,
        compression_level: u32,
        topology: &Topology,
    ) -> Vec<LayerPlan> {
        let num_layers = self.layer_count(qubit_count, compression_level);
        match self {
            LayeringPolicy::FixedRepeat { axes, .. } => (0..num_layers)
                .map(|_| LayerPlan {
                    active: qubit_count,
                    axes: axes.clone(),
                    pairs: topology.active_pairs(qubit_count).collect(),
                    order: RotationOrder::AxisMajor,
                })
                .collect(),
            LayeringPolicy::Adaptive => (0..num_layers)
                .map(|layer| {
                    let active = qubit_count - layer as u32;
                    LayerPlan {
                        active,
                        axes: vec![RotationAxis::X, RotationAxis::Z],
                        pairs: topology.active_pairs(active).collect(),
                        order: RotationOrder::QubitMajor,
                    }
                })
                .collect(),
        }
    }
}

impl Default for LayeringPolicy {
    fn default() -> Self {
        Self::single()
    }
}

impl fmt::Display for LayeringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayeringPolicy::Adaptive => write!(f, "adaptive"),
            LayeringPolicy::FixedRepeat { repeats, axes } => {
                let axes: Vec<&str> = axes.iter().map(|a| a.letter()).collect();
                write!(f, "repeat:{repeats}[{}]", axes.join(","))
            }
        }
    }
}

impl FromStr for LayeringPolicy {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "single" => Ok(Self::single()),
            "double" => Ok(Self::double_rotation()),
            "double-application" => Ok(Self::repeated(2)),
            "triple-application" => Ok(Self::repeated(3)),
            "adaptive" => Ok(Self::adaptive()),
            other => {
                let repeats = other
                    .strip_prefix("repeat:")
                    .and_then(|k| k.parse::<usize>().ok())
                    .ok_or_else(|| {
                        AnsatzError::InvalidLayering(format!("unknown layering policy '{other}'"))
                    })?;
                let policy = Self::repeated(repeats);
                policy.validate()?;
                Ok(policy)
            }
        }
    }
}

/// One layer of a replayed schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPlan {
    /// Number of leading qubits the layer acts on.
    pub active: u32,
    /// Rotation axes applied to each active qubit.
    pub axes: Vec<RotationAxis>,
    /// Applicable topology pairs, in gate order.
    pub pairs: Vec<(u32, u32)>,
    /// Rotation ordering within the layer.
    pub order: RotationOrder,
}

impl LayerPlan {
    /// Parameters consumed by this layer.
    pub fn parameter_count(&self) -> usize {
        self.axes.len() * self.active as usize + self.pairs.len()
    }

    /// Single-qubit rotations in emission order.
    pub fn rotations(&self) -> Vec<(RotationAxis, QubitId)> {
        match self.order {
            RotationOrder::AxisMajor => self
                .axes
                .iter()
                .flat_map(|&axis| (0..self.active).map(move |q| (axis, QubitId(q))))
                .collect(),
            RotationOrder::QubitMajor => (0..self.active)
                .flat_map(|q| self.axes.iter().map(move |&axis| (axis, QubitId(q))))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn total(policy: &LayeringPolicy, compression_level: u32) -> usize {
        policy
            .plan(4, compression_level, &Topology::reference())
            .iter()
            .map(LayerPlan::parameter_count)
            .sum()
    }

    #[test]
    fn test_fixed_repeat_counts() {
        assert_eq!(total(&LayeringPolicy::single(), 2), 12);
        assert_eq!(total(&LayeringPolicy::double_rotation(), 2), 20);
        assert_eq!(total(&LayeringPolicy::repeated(2), 2), 24);
        assert_eq!(total(&LayeringPolicy::repeated(3), 2), 36);
    }

    #[test]
    fn test_adaptive_schedule() {
        let plan = LayeringPolicy::adaptive().plan(4, 2, &Topology::reference());
        let active: Vec<u32> = plan.iter().map(|l| l.active).collect();
        let pairs: Vec<usize> = plan.iter().map(|l| l.pairs.len()).collect();
        let params: Vec<usize> = plan.iter().map(LayerPlan::parameter_count).collect();
        assert_eq!(active, vec![4, 3, 2]);
        assert_eq!(pairs, vec![4, 2, 1]);
        assert_eq!(params, vec![12, 8, 5]);
        assert_eq!(params.iter().sum::<usize>(), 25);
    }

    #[test]
    fn test_adaptive_without_compression_is_one_layer() {
        let plan = LayeringPolicy::adaptive().plan(4, 4, &Topology::reference());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].parameter_count(), 12);
    }

    #[test]
    fn test_rotation_order() {
        let axis_major = LayerPlan {
            active: 2,
            axes: vec![RotationAxis::X, RotationAxis::Z],
            pairs: vec![],
            order: RotationOrder::AxisMajor,
        };
        assert_eq!(
            axis_major.rotations(),
            vec![
                (RotationAxis::X, QubitId(0)),
                (RotationAxis::X, QubitId(1)),
                (RotationAxis::Z, QubitId(0)),
                (RotationAxis::Z, QubitId(1)),
            ]
        );

        let qubit_major = LayerPlan {
            order: RotationOrder::QubitMajor,
            ..axis_major
        };
        assert_eq!(
            qubit_major.rotations(),
            vec![
                (RotationAxis::X, QubitId(0)),
                (RotationAxis::Z, QubitId(0)),
                (RotationAxis::X, QubitId(1)),
                (RotationAxis::Z, QubitId(1)),
            ]
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "single".parse::<LayeringPolicy>().unwrap(),
            LayeringPolicy::single()
        );
        assert_eq!(
            "Triple-Application".parse::<LayeringPolicy>().unwrap(),
            LayeringPolicy::repeated(3)
        );
        assert_eq!(
            "repeat:5".parse::<LayeringPolicy>().unwrap(),
            LayeringPolicy::repeated(5)
        );
        assert!("repeat:0".parse::<LayeringPolicy>().is_err());
        assert!("spiral".parse::<LayeringPolicy>().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(LayeringPolicy::single().validate().is_ok());
        assert!(LayeringPolicy::repeated(0).validate().is_err());
        let no_axes = LayeringPolicy::FixedRepeat {
            repeats: 1,
            axes: vec![],
        };
        assert!(no_axes.validate().is_err());
    }

    #[test]
    fn test_repeat_cap() {
        assert!(LayeringPolicy::repeated(MAX_REPEATS).validate().is_ok());
        let err = LayeringPolicy::repeated(MAX_REPEATS + 1)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = "repeat:100000000".parse::<LayeringPolicy>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let yaml = "layering:\n  kind: fixed-repeat\n  repeats: 100000000\n  axes: [X]\n";
        let err = crate::AutoencoderConfig::from_yaml_str(yaml).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&LayeringPolicy::adaptive()).unwrap();
        assert_eq!(json, r#"{"kind":"adaptive"}"#);

        let decoded: LayeringPolicy =
            serde_json::from_str(r#"{"kind":"fixed-repeat","repeats":2,"axes":["X","Z"]}"#)
                .unwrap();
        assert_eq!(decoded, LayeringPolicy::repeated(2));
    }
}
