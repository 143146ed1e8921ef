use anchor_lang::prelude::*;
use crate::errors::GovernanceError;
use crate::pda::{PROPOSAL_SEED, VOTE_RECORD_SEED};
use crate::states::{Proposal, ProposalStatus, VoteCast, VoteChoice, VoteRecord, VoteTally};

pub fn handler(ctx: Context<CastVote>, choice: VoteChoice, weight: u64) -> Result<VoteTally> {
    let now = Clock::get()?.unix_timestamp;
    let proposal = &mut ctx.accounts.proposal;

    require!(proposal.status(now) == ProposalStatus::Open, GovernanceError::VotingClosed);
    require!(weight > 0, GovernanceError::ZeroWeight);

    let record = &mut ctx.accounts.vote_record;
    // one record per (proposal, voter); a populated one means this voter is done
    if record.is_cast() {
        return err!(GovernanceError::DuplicateVote);
    }

    let tally = proposal.record_vote(choice, weight)?;
    let voter = ctx.accounts.voter.key();

    record.set_inner(VoteRecord {
        proposal: proposal.key(),
        voter,
        choice,
        weight,
        cast_at: now,
        bump: ctx.bumps.vote_record,
    });

    emit!(VoteCast {
        proposal: proposal.key(),
        voter,
        choice,
        weight,
        for_votes: tally.for_votes,
        against_votes: tally.against_votes,
        abstain_votes: tally.abstain_votes,
    });
    Ok(tally)
}

#[derive(Accounts)]
pub struct CastVote<'info> {
    #[account(mut)]
    pub voter: Signer<'info>,

    #[account(
        mut,
        seeds = [PROPOSAL_SEED, proposal.creator.as_ref(), proposal.id.to_string().as_bytes()],
        bump = proposal.bump,
    )]
    pub proposal: Account<'info, Proposal>,

    #[account(
        init_if_needed,
        payer = voter,
        space = VoteRecord::SPACE,
        seeds = [VOTE_RECORD_SEED, proposal.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub vote_record: Account<'info, VoteRecord>,

    pub system_program: Program<'info, System>,
}
