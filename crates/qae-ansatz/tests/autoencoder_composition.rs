//! End-to-end tests for building, composing and binding autoencoder circuits.

use qae_ansatz::{
    AnsatzBuilder, AnsatzSpec, AutoencoderConfig, BindingPolicy, BindingWarning, CircuitComposer,
    CompressionScheme, DecoderPolicy, ErrorKind, LayeringPolicy, ParameterBinder, RegisterLayout,
};
use qae_ir::{Gate, ParameterList, Sign};

fn config(decoder: DecoderPolicy, layering: LayeringPolicy) -> AutoencoderConfig {
    AutoencoderConfig {
        decoder,
        layering,
        ..AutoencoderConfig::default()
    }
}

fn param_count(layering: LayeringPolicy) -> usize {
    AnsatzBuilder::new(AnsatzSpec::reference(layering))
        .parameter_count()
        .unwrap()
}

// ============================================================================
// Parameter counts
// ============================================================================

#[test]
fn test_parameter_counts_per_policy() {
    assert_eq!(param_count(LayeringPolicy::single()), 12);
    assert_eq!(param_count(LayeringPolicy::double_rotation()), 20);
    assert_eq!(param_count(LayeringPolicy::repeated(2)), 24);
    assert_eq!(param_count(LayeringPolicy::repeated(3)), 36);
    assert_eq!(param_count(LayeringPolicy::adaptive()), 25);
}

#[test]
fn test_named_policies_parse() {
    for (name, expected) in [
        ("single", 12),
        ("double", 20),
        ("double-application", 24),
        ("triple-application", 36),
        ("adaptive", 25),
    ] {
        let layering: LayeringPolicy = name.parse().unwrap();
        assert_eq!(param_count(layering), expected, "policy {name}");
    }
}

// ============================================================================
// Reset stage
// ============================================================================

#[test]
fn test_no_compression_has_empty_reset() {
    let reset = CompressionScheme::new(4, 4).unwrap().build_reset(9).unwrap();
    assert!(reset.is_empty());

    let composition = CircuitComposer::new(AutoencoderConfig {
        compression_level: 4,
        ..AutoencoderConfig::default()
    })
    .compose()
    .unwrap();
    assert_eq!(composition.circuit.count_ops().get("reset"), None);
}

#[test]
fn test_compression_out_of_range_for_both_stages() {
    for decoder in [DecoderPolicy::MirrorInverse, DecoderPolicy::IndependentMirror] {
        for level in [0, 5] {
            let err = CircuitComposer::new(AutoencoderConfig {
                compression_level: level,
                ..config(decoder, LayeringPolicy::adaptive())
            })
            .compose()
            .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range);
        }
    }

    let mut spec = AnsatzSpec::reference(LayeringPolicy::single());
    spec.compression_level = 0;
    let builder = AnsatzBuilder::new(spec);
    assert_eq!(builder.build("enc").unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(builder.build("dec").unwrap_err().kind(), ErrorKind::Range);
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_mirror_inverse_reuses_encoder_parameters() {
    for layering in [
        LayeringPolicy::single(),
        LayeringPolicy::double_rotation(),
        LayeringPolicy::repeated(3),
        LayeringPolicy::adaptive(),
    ] {
        let composition = CircuitComposer::new(config(DecoderPolicy::MirrorInverse, layering))
            .compose()
            .unwrap();
        assert!(composition.decoder_params.is_none());
        assert_eq!(composition.circuit.parameters(), &composition.encoder_params);
    }
}

#[test]
fn test_mirror_inverse_decoder_undoes_encoder() {
    let composition = CircuitComposer::new(AutoencoderConfig::default())
        .compose()
        .unwrap();
    let gates = composition.circuit.gates();
    let encoder: Vec<&Gate> = gates.iter().filter(|g| g.is_unitary()).take(12).collect();
    let decoder: Vec<&Gate> = gates.iter().skip(14).collect();
    assert_eq!(decoder.len(), encoder.len());
    for (enc, dec) in encoder.iter().rev().zip(&decoder) {
        assert_eq!(enc.parameter(), dec.parameter());
        assert_eq!(enc.qubits(), dec.qubits());
        assert_eq!(dec.sign(), Some(Sign::Negative));
    }
}

#[test]
fn test_independent_mirror_disjoint_union() {
    for layering in [LayeringPolicy::single(), LayeringPolicy::adaptive()] {
        let single = param_count(layering.clone());
        let composition =
            CircuitComposer::new(config(DecoderPolicy::IndependentMirror, layering))
                .compose()
                .unwrap();
        let dec = composition.decoder_params.as_ref().unwrap();
        assert!(composition.encoder_params.is_disjoint(dec));
        assert_eq!(composition.circuit.num_parameters(), 2 * single);
        assert_eq!(
            composition.declared_parameters().unwrap(),
            composition.encoder_params.concat(dec).unwrap()
        );
    }
}

#[test]
fn test_register_width_is_shared() {
    for layout in [RegisterLayout::Compact, RegisterLayout::AncillaAugmented] {
        let composition = CircuitComposer::new(AutoencoderConfig {
            layout,
            decoder: DecoderPolicy::IndependentMirror,
            ..AutoencoderConfig::default()
        })
        .compose()
        .unwrap();
        assert_eq!(composition.circuit.num_qubits(), layout.width(4));
        // Ancillas are never touched.
        for gate in composition.circuit.gates() {
            assert!(gate.qubits().iter().all(|q| q.index() < 4));
        }
    }
}

#[test]
fn test_unsupported_qubit_count() {
    let err = CircuitComposer::new(AutoencoderConfig {
        qubit_count: 3,
        ..AutoencoderConfig::default()
    })
    .compose()
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_full_binding_leaves_no_symbols() {
    for decoder in [DecoderPolicy::MirrorInverse, DecoderPolicy::IndependentMirror] {
        for layering in [
            LayeringPolicy::single(),
            LayeringPolicy::repeated(2),
            LayeringPolicy::adaptive(),
        ] {
            let composition = CircuitComposer::new(config(decoder, layering))
                .compose()
                .unwrap();
            let values: Vec<f64> = (0..composition.declared_len())
                .map(|i| i as f64 * 0.01)
                .collect();
            let bound = ParameterBinder::new()
                .bind_composition(&composition, &values)
                .unwrap();
            assert!(bound.is_fully_bound());
            assert!(bound.warnings.is_empty());
        }
    }
}

#[test]
fn test_bound_mirror_angles_cancel() {
    let composition = CircuitComposer::new(AutoencoderConfig::default())
        .compose()
        .unwrap();
    let values: Vec<f64> = (1..=12).map(f64::from).collect();
    let bound = ParameterBinder::new()
        .bind_composition(&composition, &values)
        .unwrap();
    let gates = bound.circuit.gates();
    assert_eq!(gates[0].effective_angle(), Some(1.0));
    assert_eq!(gates.last().and_then(Gate::effective_angle), Some(-1.0));
}

#[test]
fn test_short_binding_warns() {
    let composition = CircuitComposer::new(config(
        DecoderPolicy::IndependentMirror,
        LayeringPolicy::single(),
    ))
    .compose()
    .unwrap();
    let values = vec![0.5; 20];
    let bound = ParameterBinder::new()
        .bind_composition(&composition, &values)
        .unwrap();
    assert!(!bound.is_fully_bound());
    assert_eq!(bound.circuit.num_parameters(), 4);
    assert_eq!(
        bound.warnings,
        vec![BindingWarning::ValueShortfall {
            declared: 24,
            supplied: 20
        }]
    );
    // The decoder runs in reverse, so its trailing parameters appear first.
    let mut free: Vec<u32> = bound.circuit.parameters().iter().map(|p| p.index()).collect();
    free.sort_unstable();
    assert_eq!(free, vec![8, 9, 10, 11]);
    assert!(
        bound
            .circuit
            .parameters()
            .iter()
            .all(|p| p.namespace() == "dec")
    );
}

#[test]
fn test_excess_values_ignored() {
    let composition = CircuitComposer::new(AutoencoderConfig::default())
        .compose()
        .unwrap();
    let bound = ParameterBinder::new()
        .bind_composition(&composition, &[0.3; 15])
        .unwrap();
    assert!(bound.is_fully_bound());
    assert!(matches!(
        bound.warnings.as_slice(),
        [BindingWarning::ExcessValues {
            declared: 12,
            supplied: 15
        }]
    ));
}

#[test]
fn test_declared_parameter_missing_from_circuit() {
    let composition = CircuitComposer::new(AutoencoderConfig::default())
        .compose()
        .unwrap();
    let mut declared = composition.encoder_params.clone();
    declared.push(qae_ir::Parameter::new("enc", 99)).unwrap();
    let values = vec![0.0; declared.len()];

    let bound = ParameterBinder::new()
        .bind(&composition.circuit, &declared, None, &values)
        .unwrap();
    assert!(bound.is_fully_bound());
    assert_eq!(bound.warnings.len(), 1);

    let err = ParameterBinder::with_policy(BindingPolicy::FailFast)
        .bind(&composition.circuit, &declared, None, &values)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Binding);
}

#[test]
fn test_composition_serializes() {
    let composition = CircuitComposer::new(AutoencoderConfig::default())
        .compose()
        .unwrap();
    let json = serde_json::to_string(&composition).unwrap();
    let decoded: qae_ansatz::Composition = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, composition);
    let params: ParameterList = decoded.encoder_params;
    assert_eq!(params.len(), 12);
}
