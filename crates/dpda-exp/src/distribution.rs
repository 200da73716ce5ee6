use dpda_core::errors::DpdaError;
use dpda_core::{run_trial, ModelSpec, TrialConfig};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::DistributionConfig;
use crate::hash::stable_hash_string;
use crate::seeds::{trial_rng, Experiment};
use crate::stat::{histogram, summarize, Histogram, Summary};

/// Proposal counts of many independent trials at one population size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub model: ModelSpec,
    pub seed: u64,
    pub n: usize,
    pub config_hash: String,
    /// Proposal count of every trial, in trial order.
    pub proposal_counts: Vec<usize>,
    pub histogram: Histogram,
    pub summary: Summary,
    pub report_hash: String,
}

/// Runs `iterations` trials at a fixed n and bins their proposal counts.
pub fn proposal_distribution(
    config: &DistributionConfig,
    model: &ModelSpec,
    seed: u64,
) -> Result<DistributionReport, DpdaError> {
    config.validate()?;
    model.validate()?;
    let config_hash = stable_hash_string(&(config, model, seed))?;
    info!(
        "proposal distribution n = {} over {} trials",
        config.n, config.iterations
    );
    let trial_config = TrialConfig {
        n: config.n,
        model: *model,
    };
    let mut proposal_counts = Vec::with_capacity(config.iterations);
    for trial in 0..config.iterations {
        debug!("distribution trial {}", trial + 1);
        let mut rng = trial_rng(seed, Experiment::Distribution, 0, trial);
        proposal_counts.push(run_trial(&trial_config, &mut rng)?.proposal_count);
    }
    let values: Vec<f64> = proposal_counts.iter().map(|&count| count as f64).collect();
    let histogram = histogram(&values, config.bin_count());
    let summary = summarize(&values);
    let report_hash = stable_hash_string(&(&config_hash, &proposal_counts))?;
    Ok(DistributionReport {
        model: *model,
        seed,
        n: config.n,
        config_hash,
        proposal_counts,
        histogram,
        summary,
        report_hash,
    })
}
