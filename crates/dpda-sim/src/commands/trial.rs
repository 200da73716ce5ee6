use std::error::Error;

use clap::Args;
use dpda_core::{run_trial, ModelSpec, RngHandle, TrialConfig, TrialOutcome};
use dpda_exp::to_canonical_json_bytes;
use serde::Serialize;

use super::common::{resolve_model, ModelKind};

#[derive(Args, Debug)]
pub struct TrialArgs {
    /// Agents per side.
    #[arg(long)]
    pub n: usize,
    #[arg(long, value_enum)]
    pub model: Option<ModelKind>,
    /// Public score weight for the public-private model.
    #[arg(long)]
    pub lambda: Option<f64>,
    #[arg(long, default_value_t = 2024)]
    pub seed: u64,
}

#[derive(Debug, Serialize)]
struct TrialReport {
    seed: u64,
    config: TrialConfig,
    mean_doctor_rank: f64,
    mean_hospital_rank: f64,
    outcome: TrialOutcome,
}

pub fn run(args: &TrialArgs) -> Result<(), Box<dyn Error>> {
    let model = resolve_model(ModelSpec::Uniform, args.model, args.lambda)?;
    let config = TrialConfig { n: args.n, model };
    let outcome = run_trial(&config, &mut RngHandle::from_seed(args.seed))?;
    let report = TrialReport {
        seed: args.seed,
        config,
        mean_doctor_rank: outcome.mean_doctor_rank(),
        mean_hospital_rank: outcome.mean_hospital_rank(),
        outcome,
    };
    println!("{}", String::from_utf8(to_canonical_json_bytes(&report)?)?);
    Ok(())
}
