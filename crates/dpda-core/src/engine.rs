//! Doctor-proposing deferred acceptance.
//!
//! The engine owns both agent arenas and a FIFO queue of unmatched doctor
//! ids. Each [`MatchingEngine::step`] pops the front doctor, advances its
//! cursor, and resolves exactly one proposal. Displaced and rejected doctors
//! go to the back of the queue, so the proposal trace is a pure function of
//! the preference profile.

use std::collections::VecDeque;

use log::trace;

use crate::agent::{Agent, Side};
use crate::errors::{DpdaError, ErrorInfo};
use crate::profile::PreferenceProfile;

/// How a hospital answered a single proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// The hospital was unmatched and accepted.
    Accepted,
    /// The hospital traded up; `displaced` returns to the queue.
    Displaced {
        /// Doctor that lost the hospital.
        displaced: usize,
    },
    /// The hospital kept its current match; the proposer returns to the queue.
    Rejected,
}

/// One resolved proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    pub doctor: usize,
    pub hospital: usize,
    pub outcome: ProposalOutcome,
}

/// Deferred-acceptance state for a single trial.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    doctors: Vec<Agent>,
    hospitals: Vec<Agent>,
    unmatched: VecDeque<usize>,
    proposals: usize,
}

/// Terminal state of a completed run.
#[derive(Debug, Clone)]
pub struct Matching {
    /// Total proposals made across all doctors.
    pub proposal_count: usize,
    /// Doctor arena, each with its partner set.
    pub doctors: Vec<Agent>,
    /// Hospital arena, each with its partner set.
    pub hospitals: Vec<Agent>,
}

impl MatchingEngine {
    /// Builds the arenas from a profile. Every doctor starts enqueued in id
    /// order and every hospital starts unmatched.
    pub fn new(profile: &PreferenceProfile) -> Result<Self, DpdaError> {
        profile.validate()?;
        let doctors = build_arena(Side::Doctor, &profile.doctors)?;
        let hospitals = build_arena(Side::Hospital, &profile.hospitals)?;
        let unmatched = (0..doctors.len()).collect();
        Ok(Self {
            doctors,
            hospitals,
            unmatched,
            proposals: 0,
        })
    }

    /// Proposals made so far.
    pub fn proposal_count(&self) -> usize {
        self.proposals
    }

    /// Returns `true` once no doctor is waiting to propose.
    pub fn is_finished(&self) -> bool {
        self.unmatched.is_empty()
    }

    pub fn doctors(&self) -> &[Agent] {
        &self.doctors
    }

    pub fn hospitals(&self) -> &[Agent] {
        &self.hospitals
    }

    /// Resolves the next proposal, or returns `Ok(None)` when the queue is empty.
    pub fn step(&mut self) -> Result<Option<Proposal>, DpdaError> {
        let Some(doctor) = self.unmatched.pop_front() else {
            return Ok(None);
        };
        let Some(hospital) = self.doctors[doctor].advance_cursor() else {
            return Err(DpdaError::InternalInvariantViolation(
                ErrorInfo::new(
                    "preferences-exhausted",
                    "doctor proposed to every hospital without being held",
                )
                .with_context("doctor", doctor)
                .with_context("proposals", self.proposals),
            ));
        };
        self.proposals += 1;

        let outcome = match self.hospitals[hospital].partner() {
            None => {
                self.pair(doctor, hospital);
                ProposalOutcome::Accepted
            }
            Some(incumbent) if self.hospitals[hospital].prefers(doctor, incumbent) => {
                if self.doctors[incumbent].partner() != Some(hospital) {
                    return Err(inconsistent_match(incumbent, hospital));
                }
                self.doctors[incumbent].set_partner(None);
                self.unmatched.push_back(incumbent);
                self.pair(doctor, hospital);
                ProposalOutcome::Displaced {
                    displaced: incumbent,
                }
            }
            Some(_) => {
                self.unmatched.push_back(doctor);
                ProposalOutcome::Rejected
            }
        };
        trace!("doctor {doctor} -> hospital {hospital}: {outcome:?}");
        Ok(Some(Proposal {
            doctor,
            hospital,
            outcome,
        }))
    }

    /// Runs to completion and checks the terminal matching is a bijection.
    pub fn run(mut self) -> Result<Matching, DpdaError> {
        while self.step()?.is_some() {}
        self.check_terminal()?;
        Ok(Matching {
            proposal_count: self.proposals,
            doctors: self.doctors,
            hospitals: self.hospitals,
        })
    }

    fn pair(&mut self, doctor: usize, hospital: usize) {
        self.hospitals[hospital].set_partner(Some(doctor));
        self.doctors[doctor].set_partner(Some(hospital));
    }

    fn check_terminal(&self) -> Result<(), DpdaError> {
        for doctor in &self.doctors {
            let Some(hospital) = doctor.partner() else {
                return Err(DpdaError::InternalInvariantViolation(
                    ErrorInfo::new("unmatched-agent", "doctor left unmatched at termination")
                        .with_context("doctor", doctor.id()),
                ));
            };
            if self.hospitals[hospital].partner() != Some(doctor.id()) {
                return Err(inconsistent_match(doctor.id(), hospital));
            }
        }
        if let Some(hospital) = self.hospitals.iter().find(|h| h.partner().is_none()) {
            return Err(DpdaError::InternalInvariantViolation(
                ErrorInfo::new("unmatched-agent", "hospital left unmatched at termination")
                    .with_context("hospital", hospital.id()),
            ));
        }
        Ok(())
    }
}

fn build_arena(side: Side, lists: &[Vec<usize>]) -> Result<Vec<Agent>, DpdaError> {
    lists
        .iter()
        .enumerate()
        .map(|(id, prefs)| Agent::new(side, id, prefs.clone()))
        .collect()
}

fn inconsistent_match(doctor: usize, hospital: usize) -> DpdaError {
    DpdaError::InternalInvariantViolation(
        ErrorInfo::new("inconsistent-match", "doctor and hospital disagree on their match")
            .with_context("doctor", doctor)
            .with_context("hospital", hospital),
    )
}
