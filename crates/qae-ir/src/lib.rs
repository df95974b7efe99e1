//! Circuit Intermediate Representation for quantum autoencoders
//!
//! This crate provides the value types that the ansatz builders produce and
//! the parameter binder consumes. It forms the bottom layer of the `qae`
//! workspace.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a qubit in a fixed-width register
//! - **Parameters**: [`Parameter`] is a symbolic angle keyed by
//!   `(namespace, index)`; [`ParameterList`] is an ordered, duplicate-free
//!   sequence of them; [`Angle`] is a gate operand, free or bound
//! - **Gates**: [`Gate`] covers rotations, controlled rotations and resets;
//!   rotations carry a [`Sign`] so that an inverse can reuse parameters
//! - **Circuit**: [`Circuit`] is a checked gate sequence over a register
//!
//! # Example: Parameterized Circuit
//!
//! ```rust
//! use qae_ir::{Circuit, Parameter, QubitId};
//!
//! let theta = Parameter::new("enc", 0);
//! let phi = Parameter::new("enc", 1);
//!
//! let mut circuit = Circuit::new("variational", 2);
//! circuit
//!     .rx(theta.clone(), QubitId(0))
//!     .unwrap()
//!     .crx(phi.clone(), QubitId(0), QubitId(1))
//!     .unwrap();
//! assert_eq!(circuit.num_parameters(), 2);
//!
//! let bound = circuit.bind_parameters(&[(theta, 0.5), (phi, 1.0)]);
//! assert!(!bound.is_parameterized());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `rx`, `rz` | 1 | Rotation around X / Z |
//! | `crx` | 2 | Controlled rotation around X |
//! | `reset` | 1 | Reset to \|0⟩ |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, RotationAxis, Sign};
pub use parameter::{Angle, Parameter, ParameterList};
pub use qubit::QubitId;
