use std::fs;
use std::process::Command;

use serde_json::Value;

const SMALL_CONFIG: &str = "\
seed: 7
proposals:
  sizes: [2, 4, 8]
  trials_per_size: 2
distribution:
  n: 8
  iterations: 16
ranks:
  sizes: [1, 4, 8]
  trials_per_size: 2
";

fn dpda_sim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dpda-sim"))
}

#[test]
fn trial_prints_outcome_json() {
    let output = dpda_sim()
        .args(["trial", "--n", "12", "--lambda", "0.5", "--seed", "3"])
        .output()
        .expect("run dpda-sim trial");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    let outcome = &value["outcome"];
    assert_eq!(outcome["doctor_matches"].as_array().map(Vec::len), Some(12));
    assert!(outcome["proposal_count"].as_u64().unwrap() >= 12);
    assert_eq!(value["config"]["model"]["type"], "public-private");
}

#[test]
fn trial_rejects_empty_population() {
    let status = dpda_sim()
        .args(["trial", "--n", "0"])
        .status()
        .expect("run dpda-sim trial");
    assert!(!status.success());
}

#[test]
fn all_writes_every_artefact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, SMALL_CONFIG).expect("write config");
    let out = dir.path().join("out");
    let status = dpda_sim()
        .arg("all")
        .arg("--config")
        .arg(&config_path)
        .arg("--out")
        .arg(&out)
        .status()
        .expect("run dpda-sim all");
    assert!(status.success());
    for name in [
        "proposals.json",
        "proposals.csv",
        "distribution.json",
        "distribution.csv",
        "ranks.json",
        "ranks.csv",
    ] {
        assert!(out.join(name).exists(), "missing {name}");
    }
    let proposals_csv = fs::read_to_string(out.join("proposals.csv")).expect("csv");
    let mut lines = proposals_csv.lines();
    assert_eq!(
        lines.next(),
        Some("n,trials,mean_proposals,min_proposals,max_proposals,reference_n_ln_n")
    );
    assert_eq!(lines.count(), 3);

    let distribution: Value =
        serde_json::from_slice(&fs::read(out.join("distribution.json")).unwrap()).unwrap();
    assert_eq!(distribution["proposal_counts"].as_array().map(Vec::len), Some(16));
}

#[test]
fn reruns_produce_identical_reports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, SMALL_CONFIG).expect("write config");
    let mut reports = Vec::new();
    for run in ["a", "b"] {
        let out = dir.path().join(run);
        let status = dpda_sim()
            .arg("ranks")
            .arg("--config")
            .arg(&config_path)
            .args(["--model", "public-private", "--lambda", "0.2"])
            .arg("--out")
            .arg(&out)
            .status()
            .expect("run dpda-sim ranks");
        assert!(status.success());
        reports.push(fs::read(out.join("ranks.json")).expect("report"));
    }
    assert_eq!(reports[0], reports[1]);
}
