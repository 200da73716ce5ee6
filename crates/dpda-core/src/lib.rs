#![doc = "Doctor-proposing deferred acceptance with uniform and public/private preference models."]

pub mod agent;
pub mod engine;
pub mod errors;
pub mod preferences;
pub mod profile;
pub mod rng;
mod trial;

pub use agent::{Agent, Side};
pub use engine::{Matching, MatchingEngine, Proposal, ProposalOutcome};
pub use errors::{DpdaError, ErrorInfo};
pub use preferences::{ModelSpec, PreferenceModel};
pub use profile::PreferenceProfile;
pub use rng::{derive_substream_seed, RngHandle};
pub use trial::{find_blocking_pair, run_profile, run_trial, TrialConfig, TrialOutcome};
