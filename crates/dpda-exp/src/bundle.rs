use dpda_core::errors::DpdaError;
use serde::{Deserialize, Serialize};

use crate::config::ExperimentConfig;
use crate::distribution::{proposal_distribution, DistributionReport};
use crate::proposals::{proposal_sweep, ProposalSweepReport};
use crate::ranks::{rank_sweep, RankSweepReport};

/// Reports of all three experiments run from one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentBundle {
    pub proposals: ProposalSweepReport,
    pub distribution: DistributionReport,
    pub ranks: RankSweepReport,
}

/// Runs the proposal sweep, the proposal distribution and the rank sweep.
pub fn run_all(config: &ExperimentConfig) -> Result<ExperimentBundle, DpdaError> {
    config.validate()?;
    Ok(ExperimentBundle {
        proposals: proposal_sweep(&config.proposals, &config.model, config.seed)?,
        distribution: proposal_distribution(&config.distribution, &config.model, config.seed)?,
        ranks: rank_sweep(&config.ranks, &config.model, config.seed)?,
    })
}
