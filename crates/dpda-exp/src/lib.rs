//! Repeated-trial statistics over the deferred-acceptance engine.
//!
//! Each driver derives an independent RNG per trial from a single master
//! seed, so a report is a pure function of its configuration.

mod bundle;
mod config;
mod distribution;
mod hash;
mod proposals;
mod ranks;
mod seeds;
mod serde;
pub mod stat;

pub use bundle::{run_all, ExperimentBundle};
pub use config::{DistributionConfig, ExperimentConfig, SweepConfig};
pub use distribution::{proposal_distribution, DistributionReport};
pub use hash::stable_hash_string;
pub use proposals::{proposal_sweep, ProposalSweepReport, ProposalSweepRow};
pub use ranks::{rank_sweep, RankSweepReport, RankSweepRow};
pub use seeds::{trial_rng, trial_seed, Experiment};

pub use self::serde::{from_json_slice, from_yaml_str, to_canonical_json_bytes, to_yaml_string};
