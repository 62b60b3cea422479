use hopfield_core::{
    build_weights, is_fixed_point, recall_all, recall_all_with, recover, settle, settle_with,
    sigmoid_vec, CancelToken, ConvergenceCriterion, HopfieldNetwork, RecallConfig, RecallReport,
    SettleOptions,
};

fn damaged_digits() -> Vec<Vec<f64>> {
    vec![
        vec![0.9, 0.1, 0.1, 0.9],
        vec![0.1, 0.9, 0.9, 0.1],
        vec![0.8, 0.2, 0.2, 0.8],
    ]
}

#[test]
fn test_end_to_end_damaged_digits() {
    let raw = damaged_digits();
    let recovered = recall_all(&raw, 1).unwrap();
    let weights = build_weights(&raw).unwrap();

    assert_eq!(recovered.len(), raw.len());
    for (i, r) in recovered.iter().enumerate() {
        assert_eq!(r.len(), 4, "pattern {} changed length", i);
        assert!(is_fixed_point(&weights, r), "pattern {} is not settled", i);
        assert!(r.iter().all(|v| *v > 0.0 && *v < 1.0));
    }

    // Output order follows input order: each entry is the settle result of
    // the matching preprocessed input.
    for (raw_pattern, r) in raw.iter().zip(&recovered) {
        let expected = settle(&weights, &sigmoid_vec(raw_pattern), None).unwrap();
        assert_eq!(&expected, r);
    }
}

#[test]
fn test_settling_passes_do_not_change_output() {
    let raw = damaged_digits();
    let once = recall_all(&raw, 1).unwrap();
    let many = recall_all(&raw, 25).unwrap();
    assert_eq!(once, many);
}

#[test]
fn test_tolerance_settles_no_later_than_exact() {
    let raw = damaged_digits();
    let weights = build_weights(&raw).unwrap();
    let probe = sigmoid_vec(&raw[1]);

    let exact = settle_with(&weights, &probe, &SettleOptions::default(), None).unwrap();
    let loose = settle_with(
        &weights,
        &probe,
        &SettleOptions {
            criterion: ConvergenceCriterion::Tolerance(1e-6),
            ..SettleOptions::default()
        },
        None,
    )
    .unwrap();

    assert!(loose.iterations <= exact.iterations);
    for (a, b) in loose.pattern.iter().zip(&exact.pattern) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn test_expired_deadline_cancels_recall() {
    let token = CancelToken::with_timeout(std::time::Duration::ZERO);
    let network = HopfieldNetwork::train(&damaged_digits(), RecallConfig::default())
        .unwrap()
        .with_cancel(token);
    let err = recover(&network, &damaged_digits()).unwrap_err();
    assert_eq!(err.kind(), "cancelled");
}

#[test]
fn test_error_surfaces_kind_and_index() {
    let config = RecallConfig {
        epochs: 1,
        max_iterations: 2,
        tolerance: None,
    };
    let err = recall_all_with(&damaged_digits(), &config).unwrap_err();
    assert_eq!(err.kind(), "convergence");
    assert_eq!(err.pattern_index(), Some(0));
    assert!(err.to_string().starts_with("pattern 0:"));
}

#[test]
fn test_report_serializes_to_json() {
    let report = recall_all_with(&damaged_digits(), &RecallConfig::default()).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let back: RecallReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.recoveries.len(), 3);
    assert_eq!(back.recoveries[2].original, damaged_digits()[2]);
}

#[test]
fn test_config_reads_partial_toml() {
    let config: RecallConfig = toml::from_str("epochs = 3\ntolerance = 1e-9\n").unwrap();
    assert_eq!(config.epochs, 3);
    assert_eq!(config.max_iterations, hopfield_core::DEFAULT_MAX_ITERATIONS);
    assert_eq!(config.criterion(), ConvergenceCriterion::Tolerance(1e-9));
}

#[test]
fn test_weights_shared_across_threads() {
    let raw = damaged_digits();
    let weights = build_weights(&raw).unwrap();
    let expected: Vec<Vec<f64>> = raw
        .iter()
        .map(|p| settle(&weights, &sigmoid_vec(p), None).unwrap())
        .collect();

    let handles: Vec<Vec<f64>> = std::thread::scope(|s| {
        let joins: Vec<_> = raw
            .iter()
            .map(|p| {
                let weights = &weights;
                s.spawn(move || settle(weights, &sigmoid_vec(p), None).unwrap())
            })
            .collect();
        joins.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(handles, expected);
}
