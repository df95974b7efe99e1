//! Quantum Autoencoder Demo
//!
//! Builds the encoder, reset and decoder stages, composes them and binds
//! seeded random angles in place of an optimizer's candidate vector.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qae_ansatz::{AutoencoderConfig, CircuitComposer, ParameterBinder};
use qae_demos::{
    print_gates, print_header, print_result, print_section, print_success, print_warning,
    random_angles,
};

#[derive(Parser, Debug)]
#[command(name = "demo-autoencoder")]
#[command(about = "Build and bind a quantum autoencoder circuit")]
struct Args {
    /// Configuration file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<String>,

    /// Logical qubit count
    #[arg(short, long)]
    qubits: Option<u32>,

    /// Number of qubits kept at the bottleneck
    #[arg(short = 'k', long)]
    compression: Option<u32>,

    /// Decoder policy (1 | mirror-inverse, 2 | independent-mirror)
    #[arg(short, long)]
    decoder: Option<String>,

    /// Layering policy (single, double, double-application,
    /// triple-application, repeat:<k>, adaptive)
    #[arg(short, long)]
    layering: Option<String>,

    /// Register layout (compact, ancilla-augmented)
    #[arg(long)]
    layout: Option<String>,

    /// Binding policy (drop-and-warn, fail-fast)
    #[arg(long)]
    binding: Option<String>,

    /// Number of values to bind; defaults to the declared parameter count
    #[arg(long)]
    values: Option<usize>,

    /// Seed for the candidate angles
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Print the gate listing of the bound circuit
    #[arg(long)]
    gates: bool,

    /// Print the composition as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Log filter, overridden by RUST_LOG when set
    #[arg(long, default_value = "info", env = "QAE_LOG_LEVEL")]
    log_level: String,
}

impl Args {
    /// Layer command-line flags over a loaded configuration.
    fn apply(&self, mut config: AutoencoderConfig) -> anyhow::Result<AutoencoderConfig> {
        if let Some(qubits) = self.qubits {
            config.qubit_count = qubits;
        }
        if let Some(level) = self.compression {
            config.compression_level = level;
        }
        if let Some(decoder) = &self.decoder {
            config.decoder = decoder.parse()?;
        }
        if let Some(layering) = &self.layering {
            config.layering = layering.parse()?;
        }
        if let Some(layout) = &self.layout {
            config.layout = layout.parse()?;
        }
        if let Some(binding) = &self.binding {
            config.binding = binding.parse()?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => AutoencoderConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        None => AutoencoderConfig::default(),
    };
    let config = args.apply(config.with_env_overrides()?)?;
    info!(
        "Configuration: {} qubits, compression {}, decoder {}, layering {}",
        config.qubit_count, config.compression_level, config.decoder, config.layering
    );

    let binder = ParameterBinder::with_policy(config.binding);
    let composition = CircuitComposer::new(config.clone()).compose()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&composition)?);
        return Ok(());
    }

    print_header("Quantum Autoencoder Demo");

    print_section("Configuration");
    print_result("Qubits", config.qubit_count);
    print_result("Compression level", config.compression_level);
    print_result(
        "Decoder",
        format!("{} (option {})", config.decoder, config.decoder.option()),
    );
    print_result("Layering", &config.layering);
    print_result("Layout", config.layout);
    print_result("Binding", config.binding);

    print_section("Composed Circuit");
    let circuit = &composition.circuit;
    print_result("Register width", circuit.num_qubits());
    print_result("Gates", circuit.len());
    for (name, count) in circuit.count_ops() {
        print_result(&format!("  {name}"), count);
    }
    print_result("Encoder parameters", composition.encoder_params.len());
    print_result(
        "Decoder parameters",
        composition
            .decoder_params
            .as_ref()
            .map_or_else(|| "shared with encoder".to_string(), |p| p.len().to_string()),
    );
    print_result("Free parameters", circuit.num_parameters());

    print_section("Binding");
    let count = args.values.unwrap_or_else(|| composition.declared_len());
    let values = random_angles(count, args.seed);
    print_result("Values supplied", values.len());
    print_result("Seed", args.seed);

    let bound = binder.bind_composition(&composition, &values)?;
    for warning in &bound.warnings {
        print_warning(&warning.to_string());
    }
    print_result("Remaining free parameters", bound.circuit.num_parameters());

    if args.gates {
        print_section("Bound Gates");
        print_gates(&bound.circuit);
    }

    println!();
    if bound.is_fully_bound() {
        print_success("Circuit is fully bound and ready for execution");
    } else {
        print_warning("Circuit still has free parameters");
    }

    Ok(())
}
