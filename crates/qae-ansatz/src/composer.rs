//! Encoder + reset + decoder composition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument};

use qae_ir::{Circuit, ParameterList};

use crate::builder::AnsatzBuilder;
use crate::compression::{CompressionScheme, validate_compression_level};
use crate::config::AutoencoderConfig;
use crate::error::{AnsatzError, AnsatzResult};
use crate::mirror;

/// Parameter namespace of the encoder.
pub const ENCODER_NAMESPACE: &str = "enc";
/// Parameter namespace of an independently trainable decoder.
pub const DECODER_NAMESPACE: &str = "dec";

/// How the decoder is derived from the encoder.
///
/// Deserializes from the numeric option or any name [`FromStr`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "DecoderOption")]
pub enum DecoderPolicy {
    /// Structural inverse of the encoder, sharing its parameters.
    #[default]
    MirrorInverse,
    /// A second ansatz with its own parameters, in reversed gate order.
    IndependentMirror,
}

impl DecoderPolicy {
    /// Resolve the numeric decoder option (`1` or `2`).
    pub fn from_option(option: u8) -> AnsatzResult<Self> {
        match option {
            1 => Ok(DecoderPolicy::MirrorInverse),
            2 => Ok(DecoderPolicy::IndependentMirror),
            other => Err(AnsatzError::InvalidDecoderOption(other.to_string())),
        }
    }

    /// The numeric decoder option.
    pub fn option(self) -> u8 {
        match self {
            DecoderPolicy::MirrorInverse => 1,
            DecoderPolicy::IndependentMirror => 2,
        }
    }
}

impl fmt::Display for DecoderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecoderPolicy::MirrorInverse => write!(f, "mirror-inverse"),
            DecoderPolicy::IndependentMirror => write!(f, "independent-mirror"),
        }
    }
}

impl FromStr for DecoderPolicy {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "inverse" | "mirror-inverse" => Ok(DecoderPolicy::MirrorInverse),
            "2" | "independent" | "independent-mirror" => Ok(DecoderPolicy::IndependentMirror),
            other => Err(AnsatzError::InvalidDecoderOption(other.to_string())),
        }
    }
}

/// A decoder policy as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DecoderOption {
    /// Numeric option, `1` or `2`.
    Number(i64),
    /// Policy name or numeric string.
    Name(String),
}

impl TryFrom<DecoderOption> for DecoderPolicy {
    type Error = AnsatzError;

    fn try_from(option: DecoderOption) -> AnsatzResult<Self> {
        match option {
            DecoderOption::Number(n) => u8::try_from(n)
                .map_err(|_| AnsatzError::InvalidDecoderOption(n.to_string()))
                .and_then(DecoderPolicy::from_option),
            DecoderOption::Name(name) => name.parse(),
        }
    }
}

/// A composed autoencoder circuit and the parameter lists that bind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Encoder, reset and decoder gates on one register.
    pub circuit: Circuit,
    /// Encoder parameters in binding order.
    pub encoder_params: ParameterList,
    /// Decoder parameters, present only for an independent decoder.
    pub decoder_params: Option<ParameterList>,
}

impl Composition {
    /// Number of values a full binding consumes.
    pub fn declared_len(&self) -> usize {
        self.encoder_params.len() + self.decoder_params.as_ref().map_or(0, ParameterList::len)
    }

    /// Encoder then decoder parameters, in binding order.
    pub fn declared_parameters(&self) -> AnsatzResult<ParameterList> {
        match &self.decoder_params {
            Some(dec) => Ok(self.encoder_params.concat(dec)?),
            None => Ok(self.encoder_params.clone()),
        }
    }
}

/// Concatenate stages onto a fresh register of `width` qubits.
///
/// Every stage must already be laid out on exactly `width` qubits.
pub fn concatenate(
    name: &str,
    width: u32,
    stages: &[(&'static str, &Circuit)],
) -> AnsatzResult<Circuit> {
    let mut circuit = Circuit::new(name, width);
    for &(stage, part) in stages {
        if part.num_qubits() != width {
            return Err(AnsatzError::RegisterWidthMismatch {
                stage,
                expected: width,
                got: part.num_qubits(),
            });
        }
        circuit.compose(part)?;
        debug!("Appended {stage} stage: {} gates", part.len());
    }
    Ok(circuit)
}

/// Builds the full encoder/reset/decoder circuit for a configuration.
#[derive(Debug, Clone)]
pub struct CircuitComposer {
    config: AutoencoderConfig,
}

impl CircuitComposer {
    /// Create a composer for a configuration.
    pub fn new(config: AutoencoderConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AutoencoderConfig {
        &self.config
    }

    /// Build encoder, reset and decoder and join them.
    #[instrument(skip(self), fields(decoder = %self.config.decoder))]
    pub fn compose(&self) -> AnsatzResult<Composition> {
        let config = &self.config;
        validate_compression_level(config.compression_level, config.qubit_count)?;

        let builder = AnsatzBuilder::new(config.ansatz_spec()).with_layout(config.layout);
        let width = builder.register_width();

        let (encoder, encoder_params) = builder.build(ENCODER_NAMESPACE)?;
        let reset = CompressionScheme::new(config.qubit_count, config.compression_level)?
            .build_reset(width)?;

        let (decoder, decoder_params) = match config.decoder {
            DecoderPolicy::MirrorInverse => (mirror::inverse(&encoder)?, None),
            DecoderPolicy::IndependentMirror => {
                let (decoder, params) = builder.build(DECODER_NAMESPACE)?;
                if let Some(shared) = params.iter().find(|p| encoder_params.contains(p)) {
                    return Err(AnsatzError::NamespaceCollision(shared.to_string()));
                }
                (mirror::reverse_ops(&decoder), Some(params))
            }
        };

        let circuit = concatenate(
            "autoencoder",
            width,
            &[("encoder", &encoder), ("reset", &reset), ("decoder", &decoder)],
        )?;

        info!(
            "Composed autoencoder: {} gates on {} qubits, {} free parameters",
            circuit.len(),
            circuit.num_qubits(),
            circuit.num_parameters()
        );

        Ok(Composition {
            circuit,
            encoder_params,
            decoder_params,
        })
    }
}
