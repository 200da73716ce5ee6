//! YAML-configurable parameters for the experiment drivers.
//!
//! Every field has a default, so an empty document reproduces the stock
//! experiment set: proposal and rank sweeps over n = 10, 20, ..., 500 with
//! five trials per size, and 500 trials at n = 200 for the distribution.

use dpda_core::errors::{DpdaError, ErrorInfo};
use dpda_core::ModelSpec;
use serde::{Deserialize, Serialize};

use crate::serde::from_yaml_str;

/// Top-level experiment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Preference model used by every trial.
    #[serde(default)]
    pub model: ModelSpec,
    /// Master seed; per-trial seeds are derived from it.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Mean proposal count as a function of n.
    #[serde(default)]
    pub proposals: SweepConfig,
    /// Proposal count histogram at a fixed n.
    #[serde(default)]
    pub distribution: DistributionConfig,
    /// Mean match rank on each side as a function of n.
    #[serde(default)]
    pub ranks: SweepConfig,
}

fn default_seed() -> u64 {
    2024
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            model: ModelSpec::default(),
            seed: default_seed(),
            proposals: SweepConfig::default(),
            distribution: DistributionConfig::default(),
            ranks: SweepConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Parses a YAML document and validates it.
    pub fn from_yaml(text: &str) -> Result<Self, DpdaError> {
        let config: Self = from_yaml_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DpdaError> {
        self.model.validate()?;
        self.proposals.validate("proposals")?;
        self.distribution.validate()?;
        self.ranks.validate("ranks")
    }
}

/// Sizes and repetitions for a sweep over n.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Population sizes, visited in order.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    /// Trials averaged at each size.
    #[serde(default = "default_trials_per_size")]
    pub trials_per_size: usize,
}

fn default_sizes() -> Vec<usize> {
    (1..=50).map(|step| step * 10).collect()
}

fn default_trials_per_size() -> usize {
    5
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            trials_per_size: default_trials_per_size(),
        }
    }
}

impl SweepConfig {
    /// Arithmetic progression `start, start + step, ...` with `count` entries.
    pub fn stepped(start: usize, step: usize, count: usize, trials_per_size: usize) -> Self {
        Self {
            sizes: (0..count).map(|idx| start + idx * step).collect(),
            trials_per_size,
        }
    }

    pub fn validate(&self, section: &str) -> Result<(), DpdaError> {
        if self.sizes.is_empty() || self.sizes.contains(&0) {
            return Err(DpdaError::InvalidConfiguration(
                ErrorInfo::new("bad-sizes", "sweep sizes must be a non-empty list of positive n")
                    .with_context("section", section),
            ));
        }
        if self.trials_per_size == 0 {
            return Err(DpdaError::InvalidConfiguration(
                ErrorInfo::new("no-trials", "trials_per_size must be positive")
                    .with_context("section", section),
            ));
        }
        Ok(())
    }
}

/// Repetitions at a fixed size for the proposal count histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Population size.
    #[serde(default = "default_distribution_n")]
    pub n: usize,
    /// Number of independent trials.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Histogram bins; `floor(sqrt(iterations))` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bins: Option<usize>,
}

fn default_distribution_n() -> usize {
    200
}

fn default_iterations() -> usize {
    500
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            n: default_distribution_n(),
            iterations: default_iterations(),
            bins: None,
        }
    }
}

impl DistributionConfig {
    /// Histogram bin count actually used.
    pub fn bin_count(&self) -> usize {
        self.bins
            .unwrap_or_else(|| (self.iterations as f64).sqrt().floor() as usize)
            .max(1)
    }

    pub fn validate(&self) -> Result<(), DpdaError> {
        if self.n == 0 || self.iterations == 0 || self.bins == Some(0) {
            return Err(DpdaError::InvalidConfiguration(
                ErrorInfo::new(
                    "bad-distribution",
                    "distribution needs positive n, iterations and bins",
                )
                .with_context("n", self.n)
                .with_context("iterations", self.iterations),
            ));
        }
        Ok(())
    }
}
