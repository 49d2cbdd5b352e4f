use std::fmt;

/// The voting lifecycle phase of an election.
///
/// Phases only move forward: `Created -> Open -> Ended`.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Clone,
    Copy,
)]
pub enum ElectionState {
    /// Candidates and voters can be registered, no vote is accepted yet.
    Created,
    /// Votes are accepted.
    Open,
    /// Votes are closed and the winner can be announced.
    Ended,
}

impl ElectionState {
    /// Numeric encoding of the phase: `Created = 0`, `Open = 1`, `Ended = 2`.
    pub fn as_u8(&self) -> u8 {
        match self {
            ElectionState::Created => 0,
            ElectionState::Open => 1,
            ElectionState::Ended => 2,
        }
    }
}

impl From<ElectionState> for u8 {
    fn from(state: ElectionState) -> Self {
        state.as_u8()
    }
}

impl fmt::Display for ElectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElectionState::Created => "Created",
            ElectionState::Open => "Open",
            ElectionState::Ended => "Ended",
        };
        f.write_str(name)
    }
}

/// A candidate of the election.
///
/// Unknown addresses read as the default, unregistered record.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Default,
    PartialEq,
    Eq,
    Clone,
)]
pub struct Candidate {
    /// The display name given at registration.
    pub name: String,
    /// Whether the candidate can receive votes.
    pub registered: bool,
    /// The number of votes received.
    pub vote_count: u64,
}

impl Candidate {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            registered: true,
            vote_count: 0,
        }
    }
}

/// A voter of the election.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Default,
    PartialEq,
    Eq,
    Clone,
)]
pub struct Voter {
    /// Whether the owner registered this voter.
    pub registered: bool,
    /// Whether the voter already cast its vote.
    pub voted: bool,
}

impl Voter {
    pub(crate) fn fresh() -> Self {
        Self {
            registered: true,
            voted: false,
        }
    }

    pub(crate) fn voted() -> Self {
        Self {
            registered: true,
            voted: true,
        }
    }
}
