use anchor_lang::prelude::*;

pub mod errors;
pub mod pda;
pub mod states;
pub mod instructions;

use instructions::*;
use states::{VoteChoice, VoteTally};

declare_id!("8S7KF153nyYtXSsVNokzZQdpDz3StcfiPBtmt73ZtBJy");

#[program]
pub mod governance {
    use super::*;

    pub fn create_proposal(
        ctx: Context<CreateProposal>,
        title: String,
        description: String,
        start_date: i64,
        end_date: i64,
    ) -> Result<()> {
        create_proposal::handler(ctx, title, description, start_date, end_date)
    }

    pub fn cast_vote(ctx: Context<CastVote>, choice: VoteChoice, weight: u64) -> Result<VoteTally> {
        cast_vote::handler(ctx, choice, weight)
    }
}
