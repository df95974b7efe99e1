//! Variational circuit construction for quantum autoencoders.
//!
//! This crate builds the encoder, reset and decoder stages of a quantum
//! autoencoder and binds a flat vector of angles into the composed circuit.
//!
//! # Overview
//!
//! - [`AnsatzBuilder`] - Layered rotation/entanglement ansatz under a
//!   [`LayeringPolicy`] (fixed-depth, repeated or adaptive)
//! - [`CompressionScheme`] - Resets the discarded qubits at the bottleneck
//! - [`CircuitComposer`] - Joins encoder, reset and decoder under a
//!   [`DecoderPolicy`]
//! - [`ParameterBinder`] - Maps values onto encoder then decoder parameters,
//!   reporting every [`BindingWarning`]
//! - [`AutoencoderConfig`] - Serde-loadable configuration with `QAE_*`
//!   environment overrides
//!
//! # Example
//!
//! ```rust
//! use qae_ansatz::{AutoencoderConfig, CircuitComposer, DecoderPolicy, ParameterBinder};
//!
//! let config = AutoencoderConfig {
//!     decoder: DecoderPolicy::IndependentMirror,
//!     ..AutoencoderConfig::default()
//! };
//! let composition = CircuitComposer::new(config).compose()?;
//! assert_eq!(composition.declared_len(), 24);
//!
//! let values = vec![0.1; composition.declared_len()];
//! let bound = ParameterBinder::new().bind_composition(&composition, &values)?;
//! assert!(bound.is_fully_bound());
//! assert!(bound.warnings.is_empty());
//! # Ok::<(), qae_ansatz::AnsatzError>(())
//! ```

pub mod binder;
pub mod builder;
pub mod composer;
pub mod compression;
pub mod config;
pub mod error;
pub mod layering;
pub mod mirror;
pub mod topology;

pub use binder::{BindingPolicy, BindingWarning, BoundCircuit, ParameterBinder};
pub use builder::{AnsatzBuilder, AnsatzSpec, RegisterLayout, SUPPORTED_QUBIT_COUNT};
pub use composer::{
    CircuitComposer, Composition, DECODER_NAMESPACE, DecoderOption, DecoderPolicy,
    ENCODER_NAMESPACE, concatenate,
};
pub use compression::{CompressionScheme, validate_compression_level};
pub use config::AutoencoderConfig;
pub use error::{AnsatzError, AnsatzResult, ErrorKind};
pub use layering::{LayerPlan, LayeringPolicy, MAX_REPEATS, RotationOrder};
pub use mirror::{inverse, inverse_gate, reverse_ops};
pub use topology::Topology;
