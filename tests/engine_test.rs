//! Integration tests for the scoring engine
//!
//! These tests drive the public API end to end and pin the reference
//! values every implementation of the engine must reproduce:
//! - Tensor scores and raw-sum zones
//! - Canonical deviation and best-fit inference
//! - Decomposition, recommendations and convergence
//! - Engines built from config files on disk

use semantic_complexity::config::CONFIG_FILE_TOML;
use semantic_complexity::*;

fn reference_vector() -> Vector5D {
    Vector5D::new(5.0, 3.0, 2.0, 1.0, 1.0)
}

#[test]
fn test_reference_scenario_raw_sum_zone() {
    let score = tensor_score(&reference_vector(), ModuleType::Unknown, 2.0, &DEFAULT_WEIGHTS);
    assert_eq!(score.raw_sum, 12.0);
    assert_eq!(score.raw_sum_threshold, 55.0);
    assert_eq!(score.raw_sum_ratio, 0.218);
    assert_eq!(score.zone, Zone::Safe);
    assert_eq!(score.regularized, 27.32);
}

#[test]
fn test_reference_scenario_convergence() {
    assert_eq!(convergence_score(9.0, 10.0, 2.0), 0.5);
    let analysis = ConvergenceRequest::new(9.0).threshold(10.0).epsilon(2.0).analyze();
    assert_eq!(analysis.status, ConvergenceStatus::Review);
}

#[test]
fn test_reference_scenario_decomposition() {
    let d = decompose(&Vector5D::new(10.0, 10.0, 0.0, 0.0, 0.0), &DEFAULT_WEIGHTS);
    assert_eq!(d.architectural, 0.0);
    assert!(d.algorithmic > 0.0);
}

#[test]
fn test_infra_unit_end_to_end() {
    let v = Vector5D::new(2.0, 1.0, 0.0, 3.0, 4.0);
    let engine = ComplexityEngine::builtin();
    let result = engine.analyze(&UnitInput::new(v, ModuleType::Infra));

    assert_eq!(result.tensor.linear, 23.0);
    assert_eq!(result.tensor.quadratic, 7.59);
    assert_eq!(result.tensor.regularized, 31.19);
    assert_eq!(result.tensor.raw_sum_threshold, 26.0);
    assert_eq!(result.tensor.raw_sum_ratio, 0.385);
    assert_eq!(result.tensor.zone, Zone::Safe);

    assert_eq!(result.deviation.euclidean_distance, 1.581);
    assert_eq!(result.deviation.mahalanobis_distance, 2.214);
    assert_eq!(result.deviation.status, DeviationStatus::Canonical);

    assert_eq!(result.best_fit.module_type, ModuleType::Api);
    assert_eq!(result.best_fit.distance, 1.746);
    assert_eq!(result.best_fit.confidence, 0.364);
}

#[test]
fn test_orphan_lib_unit() {
    let v = Vector5D::new(12.0, 4.0, 1.0, 1.0, 1.0);
    let score = tensor_score(&v, ModuleType::Lib, 2.0, &DEFAULT_WEIGHTS);
    assert_eq!(score.quadratic, 30.3);
    assert_eq!(score.regularization, 3.26);
    assert_eq!(score.regularized, 59.06);
    assert_eq!(score.raw_sum_ratio, 0.905);
    assert_eq!(score.zone, Zone::Review);

    let deviation = analyze_deviation(&v, ModuleType::Lib);
    assert!(!deviation.is_canonical);
    assert!(deviation.is_orphan);
    assert_eq!(deviation.violation_dimensions, vec![Dimension::Control]);

    let fit = find_best_module_type(&v);
    assert_eq!(fit.module_type, ModuleType::Web);
    assert_eq!(fit.distance, 7.19);
    assert_eq!(fit.confidence, 0.122);
}

#[test]
fn test_saturated_app_unit() {
    let v = Vector5D::splat(20.0);
    let score = tensor_score(&v, ModuleType::App, 2.0, &DEFAULT_WEIGHTS);
    assert_eq!(score.regularized, 856.0);
    assert_eq!(score.raw_sum_ratio, 2.778);
    assert_eq!(score.zone, Zone::Violation);
    assert!(score.is_violation());
    assert_eq!(score.level(), ComplexityLevel::Extreme);

    let deviation = analyze_deviation(&v, ModuleType::App);
    assert_eq!(deviation.normalized_deviation, 1.0);
    assert_eq!(deviation.status, DeviationStatus::Orphan);
    assert_eq!(find_best_module_type(&v).distance, 52.476);
}

#[test]
fn test_lookups_never_fail() {
    for name in ["api", "LIB", "  web ", "", "gateway", "unknown", "ε"] {
        let t = ModuleType::parse(name);
        let registry = Registry::builtin();
        assert_eq!(registry.matrix_for_name(name), matrix_for(t));
        assert_eq!(registry.profile_for_name(name), profile_for(t));
    }
    assert_eq!(matrix_for(ModuleType::parse("gateway")), matrix_for(ModuleType::Unknown));
}

#[test]
fn test_case_variant_names_score_as_unknown() {
    let registry = Registry::builtin();
    for name in ["API", "Lib", "  web "] {
        assert_eq!(registry.matrix_for_name(name), matrix_for(ModuleType::Unknown));
        assert_eq!(registry.profile_for_name(name), profile_for(ModuleType::Unknown));
    }

    let score = tensor_score(
        &reference_vector(),
        ModuleType::parse("API"),
        2.0,
        &DEFAULT_WEIGHTS,
    );
    assert_eq!(score.raw_sum_threshold, 55.0);
    assert_eq!(score.zone, Zone::Safe);

    let api = tensor_score(&reference_vector(), ModuleType::Api, 2.0, &DEFAULT_WEIGHTS);
    assert_eq!(api.raw_sum_threshold, 16.0);
    assert_eq!(api.zone, Zone::Review);
}

#[test]
fn test_serialized_output_shape() {
    let engine = ComplexityEngine::builtin();
    let input = UnitInput::new(reference_vector(), ModuleType::Api)
        .named("create_order")
        .with_previous(Measurement::new(Vector5D::new(6.0, 3.0, 2.0, 1.0, 1.0), 30.0));
    let json = serde_json::to_value(engine.analyze(&input)).unwrap();

    assert_eq!(json["name"], "create_order");
    assert_eq!(json["module_type"], "api");
    assert_eq!(json["tensor"]["zone"], "review");
    assert_eq!(json["tensor"]["raw_sum_ratio"], 0.75);
    assert_eq!(json["deviation"]["status"], "canonical");
    assert_eq!(json["level"], "extreme");
    assert_eq!(json["recommendations"][0]["dimension"], "control");
    assert_eq!(json["convergence"]["status"], "violation");
    assert_eq!(json["convergence"]["lipschitz_estimate"], 2.7);
    assert!(json["decomposition"]["is_harmonic"].is_boolean());
}

#[test]
fn test_engine_from_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_TOML),
        r#"
[scoring]
epsilon = 5.0

[profiles.api]
control = [0.0, 8.0]

[inference]
infer_unknown = false
"#,
    )
    .unwrap();

    let engine = ComplexityEngine::from_dir(dir.path()).unwrap();
    assert_eq!(engine.config().scoring.epsilon, 5.0);
    assert_eq!(engine.registry().raw_sum_threshold(ModuleType::Api), 19.0);

    let result = engine.analyze(&UnitInput::new(reference_vector(), ModuleType::Unknown));
    assert_eq!(result.module_type, ModuleType::Unknown);
    assert_eq!(result.tensor.regularized, 28.52);
}

#[test]
fn test_engine_rejects_asymmetric_matrix_config() {
    let toml = r#"
[matrices.deploy]
rows = [
    [1.0, 0.5, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 1.0],
]
"#;
    let config = EngineConfig::from_toml_str(toml).unwrap();
    let err = ComplexityEngine::new(config).unwrap_err();
    assert!(matches!(err, ConfigError::AsymmetricMatrix { module_type: ModuleType::Deploy, .. }));
    assert!(err.to_string().contains("deploy"));
}

#[test]
fn test_batch_matches_single_analysis() {
    let engine = ComplexityEngine::builtin();
    let inputs = vec![
        UnitInput::new(reference_vector(), ModuleType::Unknown),
        UnitInput::new(Vector5D::ZERO, ModuleType::Deploy),
        UnitInput::new(Vector5D::splat(20.0), ModuleType::App),
        UnitInput::new(Vector5D::new(2.0, 1.0, 0.0, 3.0, 4.0), ModuleType::Infra),
    ];
    let batch = engine.analyze_batch(&inputs);
    let single: Vec<_> = inputs.iter().map(|i| engine.analyze(i)).collect();
    assert_eq!(batch, single);
}

#[test]
fn test_history_feeds_convergence() {
    let mut history = IterationHistory::new();
    for score in [14.0, 9.0, 13.0, 8.5, 12.0] {
        history.push(score);
    }
    assert!(history.is_oscillating());

    let analysis = ConvergenceRequest::new(7.0).history(&history).analyze();
    assert_eq!(analysis.status, ConvergenceStatus::Oscillating);
    assert_eq!(analysis.convergence_score, -0.5);
}
