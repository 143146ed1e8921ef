use anchor_lang::prelude::*;
use anchor_lang::system_program::{
    allocate, assign, create_account, transfer, Allocate, Assign, CreateAccount, Transfer,
};
use crate::errors::GovernanceError;
use crate::pda::{proposal_address, proposal_seq_seed, PROPOSAL_COUNTER_SEED, PROPOSAL_SEED};
use crate::states::{Proposal, ProposalCounter, ProposalCreated};

pub fn handler(
    ctx: Context<CreateProposal>,
    title: String,
    description: String,
    start_date: i64,
    end_date: i64,
) -> Result<()> {
    let creator = ctx.accounts.creator.key();
    let counter = &mut ctx.accounts.proposal_counter;

    if counter.is_unclaimed() {
        counter.claim(creator, ctx.bumps.proposal_counter);
    } else {
        require_keys_eq!(counter.owner, creator, GovernanceError::Unauthorized);
    }

    // the slot is re-derived from the counter, never taken from the caller
    let id = counter.count;
    let (expected, bump) = proposal_address(&creator, id);
    let proposal_info = ctx.accounts.proposal.to_account_info();
    require_keys_eq!(proposal_info.key(), expected, GovernanceError::AddressMismatch);
    require!(
        proposal_info.data_is_empty() && proposal_info.owner != &crate::ID,
        GovernanceError::AlreadyExists
    );

    Proposal::validate_fields(&title, &description, start_date, end_date)?;
    let next = counter.next_count()?;

    let seq = proposal_seq_seed(id);
    let signer_seeds: &[&[u8]] = &[PROPOSAL_SEED, creator.as_ref(), seq.as_bytes(), &[bump]];
    allocate_proposal(
        ctx.accounts.creator.to_account_info(),
        proposal_info.clone(),
        ctx.accounts.system_program.to_account_info(),
        signer_seeds,
    )?;

    let proposal = Proposal {
        id,
        creator,
        title,
        description,
        start_date,
        end_date,
        for_votes: 0,
        against_votes: 0,
        abstain_votes: 0,
        bump,
    };
    {
        let mut data = proposal_info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data;
        proposal.try_serialize(&mut writer)?;
    }

    counter.count = next;

    msg!("proposal {} created by {}", id, creator);
    emit!(ProposalCreated {
        proposal: expected,
        creator,
        id,
        start_date,
        end_date,
    });

    Ok(())
}

/// Creates the proposal account owned by this program. An address that was
/// pre-funded is topped up to rent exemption instead of created.
fn allocate_proposal<'info>(
    payer: AccountInfo<'info>,
    proposal: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let space = Proposal::SPACE;
    let rent = Rent::get()?.minimum_balance(space);
    let signer = &[signer_seeds];
    let current = proposal.lamports();

    if current == 0 {
        return create_account(
            CpiContext::new_with_signer(
                system_program,
                CreateAccount { from: payer, to: proposal },
                signer,
            ),
            rent,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = rent.saturating_sub(current);
    if top_up > 0 {
        transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer { from: payer, to: proposal.clone() },
            ),
            top_up,
        )?;
    }
    allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate { account_to_allocate: proposal.clone() },
            signer,
        ),
        space as u64,
    )?;
    assign(
        CpiContext::new_with_signer(
            system_program,
            Assign { account_to_assign: proposal },
            signer,
        ),
        &crate::ID,
    )
}

#[derive(Accounts)]
pub struct CreateProposal<'info> {
    #[account(
        init_if_needed,
        payer = creator,
        space = ProposalCounter::SPACE,
        seeds = [PROPOSAL_COUNTER_SEED, creator.key().as_ref()],
        bump
    )]
    pub proposal_counter: Account<'info, ProposalCounter>,

    /// CHECK: address is re-derived from the counter and emptiness is checked in the handler
    #[account(mut)]
    pub proposal: UncheckedAccount<'info>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}
