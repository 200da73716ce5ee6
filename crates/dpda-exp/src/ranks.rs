use dpda_core::errors::DpdaError;
use dpda_core::{run_trial, ModelSpec, TrialConfig};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::SweepConfig;
use crate::hash::stable_hash_string;
use crate::seeds::{trial_rng, Experiment};
use crate::stat::mean;

/// Average match quality on both sides at one population size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankSweepRow {
    pub n: usize,
    pub trials: usize,
    /// Mean over trials of the mean 1-based rank doctors get.
    pub mean_doctor_rank: f64,
    /// Mean over trials of the mean 1-based rank hospitals get.
    pub mean_hospital_rank: f64,
    /// `ln(n)`.
    pub reference_ln_n: f64,
    /// `n / ln(n)`; undefined at n = 1.
    pub reference_n_over_ln_n: Option<f64>,
}

/// Result of [`rank_sweep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankSweepReport {
    pub model: ModelSpec,
    pub seed: u64,
    pub config_hash: String,
    pub rows: Vec<RankSweepRow>,
    pub report_hash: String,
}

/// Runs `trials_per_size` trials at every configured size and averages the
/// rank each side obtains.
pub fn rank_sweep(
    config: &SweepConfig,
    model: &ModelSpec,
    seed: u64,
) -> Result<RankSweepReport, DpdaError> {
    config.validate("ranks")?;
    model.validate()?;
    let config_hash = stable_hash_string(&(config, model, seed))?;
    let mut rows = Vec::with_capacity(config.sizes.len());
    for (size_index, &n) in config.sizes.iter().enumerate() {
        info!("rank sweep n = {n}");
        let trial_config = TrialConfig { n, model: *model };
        let mut doctor_means = Vec::with_capacity(config.trials_per_size);
        let mut hospital_means = Vec::with_capacity(config.trials_per_size);
        for trial in 0..config.trials_per_size {
            let mut rng = trial_rng(seed, Experiment::Ranks, size_index, trial);
            let outcome = run_trial(&trial_config, &mut rng)?;
            doctor_means.push(outcome.mean_doctor_rank());
            hospital_means.push(outcome.mean_hospital_rank());
        }
        let ln_n = (n as f64).ln();
        rows.push(RankSweepRow {
            n,
            trials: config.trials_per_size,
            mean_doctor_rank: mean(&doctor_means),
            mean_hospital_rank: mean(&hospital_means),
            reference_ln_n: ln_n,
            reference_n_over_ln_n: (n > 1).then(|| n as f64 / ln_n),
        });
    }
    let report_hash = stable_hash_string(&(&config_hash, &rows))?;
    Ok(RankSweepReport {
        model: *model,
        seed,
        config_hash,
        rows,
        report_hash,
    })
}
