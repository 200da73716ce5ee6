use dpda_core::errors::DpdaError;
use dpda_core::{run_trial, ModelSpec, TrialConfig};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::SweepConfig;
use crate::hash::stable_hash_string;
use crate::seeds::{trial_rng, Experiment};

/// Mean proposal count at one population size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalSweepRow {
    pub n: usize,
    pub trials: usize,
    pub mean_proposals: f64,
    pub min_proposals: usize,
    pub max_proposals: usize,
    /// `n * ln(n)`, the asymptotic expectation under uniform preferences.
    pub reference_n_ln_n: f64,
}

/// Result of [`proposal_sweep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalSweepReport {
    pub model: ModelSpec,
    pub seed: u64,
    pub config_hash: String,
    pub rows: Vec<ProposalSweepRow>,
    pub report_hash: String,
}

/// Runs `trials_per_size` trials at every configured size and records the
/// mean number of proposals.
pub fn proposal_sweep(
    config: &SweepConfig,
    model: &ModelSpec,
    seed: u64,
) -> Result<ProposalSweepReport, DpdaError> {
    config.validate("proposals")?;
    model.validate()?;
    let config_hash = stable_hash_string(&(config, model, seed))?;
    let mut rows = Vec::with_capacity(config.sizes.len());
    for (size_index, &n) in config.sizes.iter().enumerate() {
        info!("proposal sweep n = {n}");
        let trial_config = TrialConfig { n, model: *model };
        let mut counts = Vec::with_capacity(config.trials_per_size);
        for trial in 0..config.trials_per_size {
            let mut rng = trial_rng(seed, Experiment::Proposals, size_index, trial);
            counts.push(run_trial(&trial_config, &mut rng)?.proposal_count);
        }
        rows.push(ProposalSweepRow {
            n,
            trials: counts.len(),
            mean_proposals: counts.iter().sum::<usize>() as f64 / counts.len() as f64,
            min_proposals: counts.iter().copied().min().unwrap_or_default(),
            max_proposals: counts.iter().copied().max().unwrap_or_default(),
            reference_n_ln_n: n as f64 * (n as f64).ln(),
        });
    }
    let report_hash = stable_hash_string(&(&config_hash, &rows))?;
    Ok(ProposalSweepReport {
        model: *model,
        seed,
        config_hash,
        rows,
        report_hash,
    })
}
