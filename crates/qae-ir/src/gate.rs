//! Gate types used by autoencoder circuits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::parameter::{Angle, Parameter};
use crate::qubit::QubitId;

/// Rotation axis of a single-qubit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationAxis {
    /// Rotation around X.
    X,
    /// Rotation around Z.
    Z,
}

impl RotationAxis {
    /// Lowercase axis letter.
    pub fn letter(self) -> &'static str {
        match self {
            RotationAxis::X => "x",
            RotationAxis::Z => "z",
        }
    }
}

impl FromStr for RotationAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(RotationAxis::X),
            "z" | "Z" => Ok(RotationAxis::Z),
            other => Err(format!("unknown rotation axis '{other}'")),
        }
    }
}

/// Direction applied to a gate's angle.
///
/// Flipping the sign inverts a rotation without touching its parameter,
/// which lets a structural inverse share the forward circuit's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sign {
    /// Rotate by `+θ`.
    #[default]
    Positive,
    /// Rotate by `-θ`.
    Negative,
}

impl Sign {
    /// The opposite sign.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }

    /// Multiplicative factor, `1.0` or `-1.0`.
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// A gate in an autoencoder circuit.
///
/// Controlled rotations are always around X.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Gate {
    /// Single-qubit rotation.
    Rotation {
        /// Rotation axis.
        axis: RotationAxis,
        /// Target qubit.
        qubit: QubitId,
        /// Rotation angle.
        angle: Angle,
        /// Angle direction.
        sign: Sign,
    },
    /// X rotation of `target` conditioned on `control`.
    ControlledRotation {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
        /// Rotation angle.
        angle: Angle,
        /// Angle direction.
        sign: Sign,
    },
    /// Reset a qubit to |0⟩.
    Reset {
        /// Qubit to reset.
        qubit: QubitId,
    },
}

impl Gate {
    /// Create a positive single-qubit rotation.
    pub fn rotation(axis: RotationAxis, qubit: QubitId, angle: impl Into<Angle>) -> Self {
        Gate::Rotation {
            axis,
            qubit,
            angle: angle.into(),
            sign: Sign::Positive,
        }
    }

    /// Create a positive controlled X rotation.
    pub fn controlled_rx(control: QubitId, target: QubitId, angle: impl Into<Angle>) -> Self {
        Gate::ControlledRotation {
            control,
            target,
            angle: angle.into(),
            sign: Sign::Positive,
        }
    }

    /// Create a reset.
    pub fn reset(qubit: QubitId) -> Self {
        Gate::Reset { qubit }
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Rotation { axis, .. } => match axis {
                RotationAxis::X => "rx",
                RotationAxis::Z => "rz",
            },
            Gate::ControlledRotation { .. } => "crx",
            Gate::Reset { .. } => "reset",
        }
    }

    /// Qubits this gate acts on, control first.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::Rotation { qubit, .. } | Gate::Reset { qubit } => vec![*qubit],
            Gate::ControlledRotation {
                control, target, ..
            } => vec![*control, *target],
        }
    }

    /// Get the angle operand.
    pub fn angle(&self) -> Option<&Angle> {
        match self {
            Gate::Rotation { angle, .. } | Gate::ControlledRotation { angle, .. } => Some(angle),
            Gate::Reset { .. } => None,
        }
    }

    /// Get the free parameter referenced by this gate.
    pub fn parameter(&self) -> Option<&Parameter> {
        self.angle().and_then(Angle::parameter)
    }

    /// Get the sign of a rotation.
    pub fn sign(&self) -> Option<Sign> {
        match self {
            Gate::Rotation { sign, .. } | Gate::ControlledRotation { sign, .. } => Some(*sign),
            Gate::Reset { .. } => None,
        }
    }

    /// Check if the gate still references a free parameter.
    pub fn is_parameterized(&self) -> bool {
        self.parameter().is_some()
    }

    /// Check if the gate is unitary (rotations are, resets are not).
    pub fn is_unitary(&self) -> bool {
        !matches!(self, Gate::Reset { .. })
    }

    /// The signed numeric angle, once bound.
    pub fn effective_angle(&self) -> Option<f64> {
        let value = self.angle()?.as_f64()?;
        Some(self.sign()?.factor() * value)
    }

    /// Copy of this gate with its sign flipped. Resets are returned as-is.
    #[must_use]
    pub fn with_flipped_sign(&self) -> Self {
        let mut gate = self.clone();
        match &mut gate {
            Gate::Rotation { sign, .. } | Gate::ControlledRotation { sign, .. } => {
                *sign = sign.flip();
            }
            Gate::Reset { .. } => {}
        }
        gate
    }

    /// Copy of this gate with `param` replaced by `value`.
    #[must_use]
    pub fn bind(&self, param: &Parameter, value: f64) -> Self {
        let mut gate = self.clone();
        match &mut gate {
            Gate::Rotation { angle, .. } | Gate::ControlledRotation { angle, .. } => {
                *angle = angle.bind(param, value);
            }
            Gate::Reset { .. } => {}
        }
        gate
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Rotation {
                qubit, angle, sign, ..
            } => match sign {
                Sign::Positive => write!(f, "{}({angle}) {qubit}", self.name()),
                Sign::Negative => write!(f, "{}(-{angle}) {qubit}", self.name()),
            },
            Gate::ControlledRotation {
                control,
                target,
                angle,
                sign,
                ..
            } => match sign {
                Sign::Positive => write!(f, "{}({angle}) {control}, {target}", self.name()),
                Sign::Negative => write!(f, "{}(-{angle}) {control}, {target}", self.name()),
            },
            Gate::Reset { qubit } => write!(f, "reset {qubit}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_names() {
        let p = Parameter::new("enc", 0);
        assert_eq!(Gate::rotation(RotationAxis::X, QubitId(0), p.clone()).name(), "rx");
        assert_eq!(Gate::rotation(RotationAxis::Z, QubitId(0), p.clone()).name(), "rz");
        assert_eq!(
            Gate::controlled_rx(QubitId(3), QubitId(0), p).name(),
            "crx"
        );
        assert_eq!(Gate::reset(QubitId(2)).name(), "reset");
    }

    #[test]
    fn test_controlled_qubit_order() {
        let gate = Gate::controlled_rx(QubitId(3), QubitId(0), 0.5);
        assert_eq!(gate.qubits(), vec![QubitId(3), QubitId(0)]);
    }

    #[test]
    fn test_flip_sign() {
        let gate = Gate::rotation(RotationAxis::X, QubitId(1), 0.25);
        assert_eq!(gate.sign(), Some(Sign::Positive));
        assert_eq!(gate.effective_angle(), Some(0.25));

        let flipped = gate.with_flipped_sign();
        assert_eq!(flipped.sign(), Some(Sign::Negative));
        assert_eq!(flipped.effective_angle(), Some(-0.25));
        assert_eq!(flipped.with_flipped_sign(), gate);

        let reset = Gate::reset(QubitId(2));
        assert_eq!(reset.with_flipped_sign(), reset);
        assert!(!reset.is_unitary());
    }

    #[test]
    fn test_bind_keeps_sign() {
        let theta = Parameter::new("enc", 8);
        let gate = Gate::controlled_rx(QubitId(3), QubitId(0), theta.clone())
            .with_flipped_sign();
        assert!(gate.is_parameterized());
        assert_eq!(gate.effective_angle(), None);

        let bound = gate.bind(&theta, 1.5);
        assert!(!bound.is_parameterized());
        assert_eq!(bound.sign(), Some(Sign::Negative));
        assert_eq!(bound.effective_angle(), Some(-1.5));
    }

    #[test]
    fn test_display() {
        let theta = Parameter::new("enc", 8);
        let gate = Gate::controlled_rx(QubitId(3), QubitId(0), theta);
        assert_eq!(format!("{gate}"), "crx(enc[8]) q3, q0");
        assert_eq!(format!("{}", gate.with_flipped_sign()), "crx(-enc[8]) q3, q0");
        assert_eq!(format!("{}", Gate::reset(QubitId(2))), "reset q2");
    }

    #[test]
    fn test_controlled_axis_not_deserialized() {
        let crx = r#"{"ControlledRotation":{"control":3,"target":0,"angle":{"Bound":0.5},"sign":"Positive"}}"#;
        let gate: Gate = serde_json::from_str(crx).unwrap();
        assert_eq!(gate.name(), "crx");

        let crz = r#"{"ControlledRotation":{"axis":"Z","control":3,"target":0,"angle":{"Bound":0.5},"sign":"Positive"}}"#;
        assert!(serde_json::from_str::<Gate>(crz).is_err());
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("X".parse::<RotationAxis>(), Ok(RotationAxis::X));
        assert_eq!("z".parse::<RotationAxis>(), Ok(RotationAxis::Z));
        assert!("y".parse::<RotationAxis>().is_err());
    }
}
