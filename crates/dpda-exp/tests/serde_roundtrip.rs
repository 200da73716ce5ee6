use dpda_core::ModelSpec;
use dpda_exp::{
    from_json_slice, run_all, to_canonical_json_bytes, to_yaml_string, DistributionConfig,
    ExperimentBundle, ExperimentConfig, SweepConfig,
};

fn tiny_config() -> ExperimentConfig {
    ExperimentConfig {
        model: ModelSpec::PublicPrivate { lambda: 0.4 },
        seed: 11,
        proposals: SweepConfig::stepped(2, 3, 3, 2),
        distribution: DistributionConfig {
            n: 6,
            iterations: 9,
            bins: None,
        },
        ranks: SweepConfig::stepped(1, 4, 3, 2),
    }
}

#[test]
fn bundle_round_trips_through_canonical_json() {
    let bundle = run_all(&tiny_config()).expect("run");
    let bytes = to_canonical_json_bytes(&bundle).expect("encode");
    let decoded: ExperimentBundle = from_json_slice(&bytes).expect("decode");
    assert_eq!(decoded, bundle);
}

#[test]
fn config_round_trips_through_yaml() {
    let config = tiny_config();
    let yaml = to_yaml_string(&config).expect("yaml");
    assert_eq!(ExperimentConfig::from_yaml(&yaml).expect("parse"), config);
}

#[test]
fn canonical_json_sorts_keys() {
    let bundle = run_all(&tiny_config()).expect("run");
    let text = String::from_utf8(to_canonical_json_bytes(&bundle.ranks).unwrap()).unwrap();
    let config_at = text.find("\"config_hash\"").unwrap();
    let model_at = text.find("\"model\"").unwrap();
    let rows_at = text.find("\"rows\"").unwrap();
    assert!(config_at < model_at && model_at < rows_at);
}
