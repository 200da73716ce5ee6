use log::trace;
use serde::{Deserialize, Serialize};

use crate::errors::{DpdaError, ErrorInfo};
use crate::preferences::{validate_population, ModelSpec, PreferenceModel};
use crate::rng::RngHandle;

/// Fully materialized preferences for both sides of one trial.
///
/// `doctors[d]` ranks hospital ids, `hospitals[h]` ranks doctor ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    pub doctors: Vec<Vec<usize>>,
    pub hospitals: Vec<Vec<usize>>,
}

impl PreferenceProfile {
    /// Wraps caller-supplied preference lists after checking their shape.
    pub fn new(doctors: Vec<Vec<usize>>, hospitals: Vec<Vec<usize>>) -> Result<Self, DpdaError> {
        let profile = Self { doctors, hospitals };
        profile.validate()?;
        Ok(profile)
    }

    /// Draws a profile for `n` doctors and `n` hospitals under `spec`.
    ///
    /// Draw order is fixed: hospital public scores, doctor public scores, then
    /// every doctor ranking in id order, then every hospital ranking.
    pub fn generate(n: usize, spec: &ModelSpec, rng: &mut RngHandle) -> Result<Self, DpdaError> {
        validate_population(n)?;
        spec.validate()?;
        let doctor_model = PreferenceModel::for_side(spec, n, rng)?;
        let hospital_model = PreferenceModel::for_side(spec, n, rng)?;
        let doctors = (0..n).map(|_| doctor_model.generate(rng)).collect();
        let hospitals = (0..n).map(|_| hospital_model.generate(rng)).collect();
        trace!("generated {} profile for n={n}", spec.label());
        Ok(Self { doctors, hospitals })
    }

    /// Number of agents per side.
    pub fn size(&self) -> usize {
        self.doctors.len()
    }

    /// Checks equal, non-empty sides and list lengths. Permutation checks
    /// happen when agents are built from the lists.
    pub fn validate(&self) -> Result<(), DpdaError> {
        let n = self.doctors.len();
        validate_population(n)?;
        if self.hospitals.len() != n {
            return Err(DpdaError::InvalidConfiguration(
                ErrorInfo::new(
                    "side-size-mismatch",
                    "both sides must have the same number of agents",
                )
                .with_context("doctors", n)
                .with_context("hospitals", self.hospitals.len()),
            ));
        }
        for (side, lists) in [("doctor", &self.doctors), ("hospital", &self.hospitals)] {
            if let Some((id, list)) = lists.iter().enumerate().find(|(_, list)| list.len() != n) {
                return Err(DpdaError::InvalidConfiguration(
                    ErrorInfo::new(
                        "partial-preferences",
                        "every agent must rank the whole opposite side",
                    )
                    .with_context("side", side)
                    .with_context("agent", id)
                    .with_context("len", list.len())
                    .with_context("expected", n),
                ));
            }
        }
        Ok(())
    }
}
