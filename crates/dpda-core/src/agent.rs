use crate::errors::{DpdaError, ErrorInfo};

/// Which side of the market an agent belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Proposing side.
    Doctor,
    /// Receiving side.
    Hospital,
}

impl Side {
    /// Lowercase name used in error context.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Doctor => "doctor",
            Side::Hospital => "hospital",
        }
    }
}

/// Arena record for one doctor or hospital.
///
/// Agents live in a `Vec` indexed by id and refer to their partner by the
/// partner's id, never by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    id: usize,
    preferences: Vec<usize>,
    // rank_of[opponent] = position of opponent in `preferences`
    rank_of: Vec<usize>,
    next_proposal: usize,
    partner: Option<usize>,
}

impl Agent {
    /// Builds an agent, checking that `preferences` is a permutation of `0..n`.
    pub fn new(side: Side, id: usize, preferences: Vec<usize>) -> Result<Self, DpdaError> {
        let n = preferences.len();
        let mut rank_of = vec![usize::MAX; n];
        for (rank, &opponent) in preferences.iter().enumerate() {
            if opponent >= n || rank_of[opponent] != usize::MAX {
                return Err(DpdaError::InvalidConfiguration(
                    ErrorInfo::new(
                        "not-a-permutation",
                        "preference list must rank every opponent exactly once",
                    )
                    .with_context("side", side.as_str())
                    .with_context("agent", id)
                    .with_context("opponent", opponent),
                ));
            }
            rank_of[opponent] = rank;
        }
        Ok(Self {
            id,
            preferences,
            rank_of,
            next_proposal: 0,
            partner: None,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn preferences(&self) -> &[usize] {
        &self.preferences
    }

    /// Zero-based position of `opponent` in this agent's ranking.
    pub fn rank_of(&self, opponent: usize) -> usize {
        self.rank_of[opponent]
    }

    /// Returns `true` when `candidate` is ranked strictly above `incumbent`.
    pub fn prefers(&self, candidate: usize, incumbent: usize) -> bool {
        self.rank_of[candidate] < self.rank_of[incumbent]
    }

    pub fn partner(&self) -> Option<usize> {
        self.partner
    }

    /// Number of proposals this agent has made so far.
    pub fn proposals_made(&self) -> usize {
        self.next_proposal
    }

    /// Advances the proposal cursor and returns the opponent it pointed at,
    /// or `None` once the list is exhausted.
    pub(crate) fn advance_cursor(&mut self) -> Option<usize> {
        let target = self.preferences.get(self.next_proposal).copied()?;
        self.next_proposal += 1;
        Some(target)
    }

    pub(crate) fn set_partner(&mut self, partner: Option<usize>) {
        self.partner = partner;
    }
}
