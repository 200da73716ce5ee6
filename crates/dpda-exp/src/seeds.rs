use dpda_core::{derive_substream_seed, RngHandle};

/// Experiment tags keep the three drivers on disjoint substreams even when
/// they share a master seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experiment {
    Proposals = 1,
    Distribution = 2,
    Ranks = 3,
}

/// Derives the seed of one trial from the master seed.
pub fn trial_seed(master_seed: u64, experiment: Experiment, size_index: usize, trial: usize) -> u64 {
    let intermediate = derive_substream_seed(
        master_seed,
        (experiment as u64) << 48 | size_index as u64,
    );
    derive_substream_seed(intermediate, trial as u64)
}

/// Fresh RNG for one trial.
pub fn trial_rng(master_seed: u64, experiment: Experiment, size_index: usize, trial: usize) -> RngHandle {
    RngHandle::from_seed(trial_seed(master_seed, experiment, size_index, trial))
}
