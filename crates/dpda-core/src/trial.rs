//! Single-trial entry points consumed by the experiment drivers.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, Side};
use crate::engine::{Matching, MatchingEngine};
use crate::errors::{DpdaError, ErrorInfo};
use crate::preferences::{validate_population, ModelSpec};
use crate::profile::PreferenceProfile;
use crate::rng::RngHandle;

/// Parameters of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Agents per side.
    pub n: usize,
    /// Preference model for both sides.
    #[serde(default)]
    pub model: ModelSpec,
}

impl TrialConfig {
    /// Trial over `n` agents per side with uniform preferences.
    pub fn uniform(n: usize) -> Self {
        Self {
            n,
            model: ModelSpec::Uniform,
        }
    }

    /// Trial over `n` agents per side with public/private preferences.
    pub fn public_private(n: usize, lambda: f64) -> Self {
        Self {
            n,
            model: ModelSpec::PublicPrivate { lambda },
        }
    }

    /// Rejects `n == 0` and blend weights outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), DpdaError> {
        validate_population(self.n)?;
        self.model.validate()
    }
}

/// Result of one completed trial.
///
/// All mappings are dense vectors indexed by agent id. Ranks are 1-based
/// positions of the partner in the agent's own preference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub proposal_count: usize,
    pub doctor_matches: Vec<usize>,
    pub hospital_matches: Vec<usize>,
    pub doctor_ranks: Vec<usize>,
    pub hospital_ranks: Vec<usize>,
}

impl TrialOutcome {
    /// Agents per side.
    pub fn size(&self) -> usize {
        self.doctor_matches.len()
    }

    /// Mean 1-based rank of each doctor's hospital.
    pub fn mean_doctor_rank(&self) -> f64 {
        mean(&self.doctor_ranks)
    }

    /// Mean 1-based rank of each hospital's doctor.
    pub fn mean_hospital_rank(&self) -> f64 {
        mean(&self.hospital_ranks)
    }

    fn from_matching(matching: &Matching) -> Result<Self, DpdaError> {
        let (doctor_matches, doctor_ranks) = partners_and_ranks(Side::Doctor, &matching.doctors)?;
        let (hospital_matches, hospital_ranks) =
            partners_and_ranks(Side::Hospital, &matching.hospitals)?;
        Ok(Self {
            proposal_count: matching.proposal_count,
            doctor_matches,
            hospital_matches,
            doctor_ranks,
            hospital_ranks,
        })
    }
}

fn partners_and_ranks(side: Side, agents: &[Agent]) -> Result<(Vec<usize>, Vec<usize>), DpdaError> {
    let mut partners = Vec::with_capacity(agents.len());
    let mut ranks = Vec::with_capacity(agents.len());
    for agent in agents {
        let partner = agent.partner().ok_or_else(|| {
            DpdaError::InternalInvariantViolation(
                ErrorInfo::new("unmatched-agent", "agent has no partner in a finished matching")
                    .with_context("side", side.as_str())
                    .with_context("agent", agent.id()),
            )
        })?;
        partners.push(partner);
        ranks.push(agent.rank_of(partner) + 1);
    }
    Ok((partners, ranks))
}

/// Generates a fresh profile under `config` and runs deferred acceptance on it.
///
/// Configuration is validated before any agent is built.
pub fn run_trial(config: &TrialConfig, rng: &mut RngHandle) -> Result<TrialOutcome, DpdaError> {
    config.validate()?;
    let profile = PreferenceProfile::generate(config.n, &config.model, rng)?;
    let outcome = run_profile(&profile)?;
    debug!(
        "trial n={} model={} proposals={}",
        config.n,
        config.model.label(),
        outcome.proposal_count
    );
    Ok(outcome)
}

/// Runs deferred acceptance on caller-supplied preferences.
pub fn run_profile(profile: &PreferenceProfile) -> Result<TrialOutcome, DpdaError> {
    let matching = MatchingEngine::new(profile)?.run()?;
    TrialOutcome::from_matching(&matching)
}

/// Returns the first `(doctor, hospital)` pair that would rather be matched
/// to each other than to their assigned partners, if any.
pub fn find_blocking_pair(
    profile: &PreferenceProfile,
    outcome: &TrialOutcome,
) -> Option<(usize, usize)> {
    let hospital_rank = |h: usize, d: usize| profile.hospitals[h].iter().position(|&x| x == d);
    for (doctor, prefs) in profile.doctors.iter().enumerate() {
        let current = outcome.doctor_matches[doctor];
        // every hospital ranked above the current match is a candidate
        for &hospital in prefs.iter().take_while(|&&h| h != current) {
            let holder = outcome.hospital_matches[hospital];
            if hospital_rank(hospital, doctor) < hospital_rank(hospital, holder) {
                return Some((doctor, hospital));
            }
        }
    }
    None
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}
