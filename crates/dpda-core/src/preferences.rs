//! Preference-generation models.
//!
//! A [`PreferenceModel`] is built once per side of a trial and then asked for
//! one ranking per agent on that side. Rankings are always complete strict
//! orders, i.e. permutations of `0..n` listed from most to least preferred.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{DpdaError, ErrorInfo};
use crate::rng::RngHandle;

/// Caller-facing selector for the preference model used in a trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ModelSpec {
    /// Every agent ranks the other side by an independent uniform permutation.
    #[default]
    Uniform,
    /// Blend of a side-wide public score and an agent-private score.
    PublicPrivate {
        /// Weight of the public score, in `[0, 1]`.
        lambda: f64,
    },
}

impl ModelSpec {
    /// Checks the blend weight of the public/private model.
    pub fn validate(&self) -> Result<(), DpdaError> {
        match *self {
            ModelSpec::Uniform => Ok(()),
            ModelSpec::PublicPrivate { lambda } => validate_lambda(lambda),
        }
    }

    /// Short label used in reports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            ModelSpec::Uniform => "uniform",
            ModelSpec::PublicPrivate { .. } => "public-private",
        }
    }
}

/// Preference generator for every agent on one side of the market.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceModel {
    population: usize,
    kind: ModelKind,
}

#[derive(Debug, Clone, PartialEq)]
enum ModelKind {
    Uniform,
    PublicPrivate { public_scores: Vec<f64>, lambda: f64 },
}

impl PreferenceModel {
    /// Uniform random permutations over `population` opponents.
    pub fn uniform(population: usize) -> Result<Self, DpdaError> {
        validate_population(population)?;
        Ok(Self {
            population,
            kind: ModelKind::Uniform,
        })
    }

    /// Public/private blend over the opponents described by `public_scores`.
    ///
    /// `public_scores[i]` is the reputation of opponent `i`, shared by every
    /// agent that evaluates that opponent population.
    pub fn public_private(public_scores: Vec<f64>, lambda: f64) -> Result<Self, DpdaError> {
        validate_population(public_scores.len())?;
        validate_lambda(lambda)?;
        if let Some(idx) = public_scores.iter().position(|score| !score.is_finite()) {
            return Err(DpdaError::InvalidConfiguration(
                ErrorInfo::new("non-finite-score", "public scores must be finite")
                    .with_context("opponent", idx),
            ));
        }
        Ok(Self {
            population: public_scores.len(),
            kind: ModelKind::PublicPrivate {
                public_scores,
                lambda,
            },
        })
    }

    /// Builds the model for one side, drawing the public scores of the
    /// opposite population from `rng` for the public/private model.
    pub fn for_side(
        spec: &ModelSpec,
        population: usize,
        rng: &mut RngHandle,
    ) -> Result<Self, DpdaError> {
        match *spec {
            ModelSpec::Uniform => Self::uniform(population),
            ModelSpec::PublicPrivate { lambda } => {
                validate_population(population)?;
                validate_lambda(lambda)?;
                Self::public_private(draw_scores(population, rng), lambda)
            }
        }
    }

    /// Number of opponents each generated ranking covers.
    pub fn population(&self) -> usize {
        self.population
    }

    /// Shared public scores, if this is a public/private model.
    pub fn public_scores(&self) -> Option<&[f64]> {
        match &self.kind {
            ModelKind::Uniform => None,
            ModelKind::PublicPrivate { public_scores, .. } => Some(public_scores),
        }
    }

    /// Generates a fresh ranking for one agent.
    ///
    /// Public/private models draw a new private score vector on every call, so
    /// no two agents ever share private scores.
    pub fn generate(&self, rng: &mut RngHandle) -> Vec<usize> {
        match &self.kind {
            ModelKind::Uniform => uniform_ranking(self.population, rng),
            ModelKind::PublicPrivate {
                public_scores,
                lambda,
            } => {
                let private_scores = draw_scores(self.population, rng);
                blended_ranking(public_scores, &private_scores, *lambda)
            }
        }
    }
}

/// Draws a uniformly random permutation of `0..n`.
///
/// Ids are drawn one at a time from a shrinking pool of remaining candidates.
/// Removal uses `swap_remove`, which reorders the pool but keeps every
/// remaining candidate equally likely on each draw.
pub fn uniform_ranking(n: usize, rng: &mut RngHandle) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n).collect();
    let mut ranking = Vec::with_capacity(n);
    while !pool.is_empty() {
        let pick = rng.gen_range(0..pool.len());
        ranking.push(pool.swap_remove(pick));
    }
    ranking
}

/// Ranks opponents by descending `lambda * public + (1 - lambda) * private`.
///
/// Equal utilities keep ascending id order (the sort is stable).
pub fn blended_ranking(public_scores: &[f64], private_scores: &[f64], lambda: f64) -> Vec<usize> {
    debug_assert_eq!(public_scores.len(), private_scores.len());
    let utility: Vec<f64> = public_scores
        .iter()
        .zip(private_scores)
        .map(|(public, private)| lambda * public + (1.0 - lambda) * private)
        .collect();
    let mut ranking: Vec<usize> = (0..utility.len()).collect();
    ranking.sort_by(|&a, &b| utility[b].total_cmp(&utility[a]));
    ranking
}

/// Draws `n` independent scores uniformly from `[0, 1)`.
pub fn draw_scores(n: usize, rng: &mut RngHandle) -> Vec<f64> {
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

pub(crate) fn validate_population(n: usize) -> Result<(), DpdaError> {
    if n == 0 {
        return Err(DpdaError::InvalidConfiguration(
            ErrorInfo::new("empty-population", "population size must be positive")
                .with_hint("run trials with n >= 1"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_lambda(lambda: f64) -> Result<(), DpdaError> {
    if !lambda.is_finite() || !(0.0..=1.0).contains(&lambda) {
        return Err(DpdaError::InvalidConfiguration(
            ErrorInfo::new("lambda-out-of-range", "blend weight must lie in [0, 1]")
                .with_context("lambda", lambda),
        ));
    }
    Ok(())
}
