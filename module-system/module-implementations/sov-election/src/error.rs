use sov_bank::Amount;

use crate::ElectionState;

/// The reasons an election operation is rejected.
///
/// Calls return [`anyhow::Error`]; the original variant can be recovered with
/// `err.downcast_ref::<ElectionError>()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElectionError {
    /// The operation is not valid in the current phase.
    #[error("Election is {actual}, the operation requires {expected}")]
    InvalidState {
        /// The phase the operation requires.
        expected: ElectionState,
        /// The current phase.
        actual: ElectionState,
    },
    /// Only the owner can trigger the operation.
    #[error("Only the owner of the election can trigger this action")]
    Unauthorized,
    /// The candidate or voter is already registered.
    #[error("{0} is already registered")]
    AlreadyRegistered(String),
    /// The fee payment is below the minimum fee.
    #[error("Fee of {amount} is below the minimum fee of {minimum}")]
    InsufficientFee {
        /// The amount sent.
        amount: Amount,
        /// The smallest accepted amount.
        minimum: Amount,
    },
    /// The address can't pay the registration fee, e.g. the election itself.
    #[error("{0} cannot pay the registration fee")]
    InvalidPayer(String),
    /// The address never paid the registration fee.
    #[error("{0} has not paid the registration fee")]
    FeeNotPaid(String),
    /// The voted address is not a registered candidate.
    #[error("{0} is not a registered candidate")]
    CandidateNotRegistered(String),
    /// The sender is not a registered voter.
    #[error("{0} is not a registered voter")]
    VoterNotRegistered(String),
    /// The sender already voted.
    #[error("{0} has already voted")]
    AlreadyVoted(String),
    /// No candidate was registered before the vote ended.
    #[error("No candidate was registered")]
    NoCandidates,
    /// A counter would overflow.
    #[error("{0} overflow")]
    Overflow(&'static str),
}
