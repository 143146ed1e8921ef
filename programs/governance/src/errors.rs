use anchor_lang::prelude::*;

#[error_code]
pub enum GovernanceError {
    #[msg("Proposal account does not match the address derived from the creator's counter")]
    AddressMismatch,
    #[msg("Proposal account already exists")]
    AlreadyExists,
    #[msg("The start date must be earlier than the end date")]
    InvalidWindow,
    #[msg("Title or description exceeds the maximum allowed length")]
    PayloadTooLarge,
    #[msg("Math overflow")]
    OverflowError,
    #[msg("Voting is closed")]
    VotingClosed,
    #[msg("Voter already voted on this proposal")]
    DuplicateVote,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Vote weight must be greater than zero")]
    ZeroWeight,
}
