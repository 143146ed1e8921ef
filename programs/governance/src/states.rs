use anchor_lang::prelude::*;
use crate::errors::GovernanceError;

pub const MAX_TITLE_LEN: usize = 256;
pub const MAX_DESCRIPTION_LEN: usize = 1024;


#[account]
#[derive(Debug)]
pub struct ProposalCounter {
    pub owner: Pubkey,
    pub count: u64,
    pub bump: u8,
}
impl ProposalCounter {
    // 8 discriminator + owner + count + bump
    pub const SPACE: usize = 8 + 32 + 8 + 1;

    /// A counter fresh out of `init_if_needed` has no owner yet.
    pub fn is_unclaimed(&self) -> bool {
        self.owner == Pubkey::default()
    }

    pub fn claim(&mut self, owner: Pubkey, bump: u8) {
        self.owner = owner;
        self.count = 0;
        self.bump = bump;
    }

    pub fn next_count(&self) -> Result<u64> {
        self.count
            .checked_add(1)
            .ok_or_else(|| error!(GovernanceError::OverflowError))
    }
}

#[account]
#[derive(Debug)]
pub struct Proposal {
    pub id: u64,
    pub creator: Pubkey,
    pub title: String,
    pub description: String,
    pub start_date: i64,
    pub end_date: i64,
    pub for_votes: u64,
    pub against_votes: u64,
    pub abstain_votes: u64,
    pub bump: u8,
}
impl Proposal {
    pub const SPACE: usize = 8 // discriminator
        + 8 // id
        + 32 // creator
        + (4 + MAX_TITLE_LEN)
        + (4 + MAX_DESCRIPTION_LEN)
        + 8 + 8 // start / end
        + 8 + 8 + 8 // tallies
        + 1; // bump

    /// Checks the voting window first, then payload size.
    pub fn validate_fields(
        title: &str,
        description: &str,
        start_date: i64,
        end_date: i64,
    ) -> Result<()> {
        require!(end_date > start_date, GovernanceError::InvalidWindow);
        require!(
            title.len() <= MAX_TITLE_LEN && description.len() <= MAX_DESCRIPTION_LEN,
            GovernanceError::PayloadTooLarge
        );
        Ok(())
    }

    pub fn status(&self, now: i64) -> ProposalStatus {
        if now < self.start_date {
            ProposalStatus::Pending
        } else if now < self.end_date {
            ProposalStatus::Open
        } else {
            ProposalStatus::Closed
        }
    }

    /// Adds `weight` to the tally selected by `choice`. Tallies are left
    /// untouched on overflow.
    pub fn record_vote(&mut self, choice: VoteChoice, weight: u64) -> Result<VoteTally> {
        let tally = match choice {
            VoteChoice::For => &mut self.for_votes,
            VoteChoice::Against => &mut self.against_votes,
            VoteChoice::Abstain => &mut self.abstain_votes,
        };
        *tally = tally.checked_add(weight).ok_or(GovernanceError::OverflowError)?;
        Ok(self.tally())
    }

    pub fn tally(&self) -> VoteTally {
        VoteTally {
            for_votes: self.for_votes,
            against_votes: self.against_votes,
            abstain_votes: self.abstain_votes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    Pending,
    Open,
    Closed,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteChoice {
    For,
    Against,
    Abstain,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub for_votes: u64,
    pub against_votes: u64,
    pub abstain_votes: u64,
}

#[account]
#[derive(Debug)]
pub struct VoteRecord {
    pub proposal: Pubkey,
    pub voter: Pubkey,
    pub choice: VoteChoice,
    pub weight: u64,
    pub cast_at: i64,
    pub bump: u8,
}
impl VoteRecord {
    // 8 discriminator + 32 + 32 + 1 + 8 + 8 + 1
    pub const SPACE: usize = 8 + 32 + 32 + 1 + 8 + 8 + 1;

    pub fn is_cast(&self) -> bool {
        self.voter != Pubkey::default()
    }
}

#[event]
pub struct ProposalCreated {
    pub proposal: Pubkey,
    pub creator: Pubkey,
    pub id: u64,
    pub start_date: i64,
    pub end_date: i64,
}

#[event]
pub struct VoteCast {
    pub proposal: Pubkey,
    pub voter: Pubkey,
    pub choice: VoteChoice,
    pub weight: u64,
    pub for_votes: u64,
    pub against_votes: u64,
    pub abstain_votes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn proposal(start_date: i64, end_date: i64) -> Proposal {
        Proposal {
            id: 0,
            creator: Pubkey::new_unique(),
            title: "Test Proposal".to_string(),
            description: "This is a test proposal.".to_string(),
            start_date,
            end_date,
            for_votes: 0,
            against_votes: 0,
            abstain_votes: 0,
            bump: 255,
        }
    }

    #[test]
    fn counter_claim_and_advance() {
        let mut counter = ProposalCounter { owner: Pubkey::default(), count: 0, bump: 0 };
        assert!(counter.is_unclaimed());

        let owner = Pubkey::new_unique();
        counter.claim(owner, 254);
        assert!(!counter.is_unclaimed());
        assert_eq!(counter.owner, owner);

        for k in 1..=5u64 {
            counter.count = counter.next_count().unwrap();
            assert_eq!(counter.count, k);
        }
    }

    #[test]
    fn counter_overflow_is_rejected() {
        let counter = ProposalCounter { owner: Pubkey::new_unique(), count: u64::MAX, bump: 1 };
        let err = counter.next_count().unwrap_err();
        assert_eq!(code(err), u32::from(GovernanceError::OverflowError));
    }

    #[test]
    fn window_must_be_forward() {
        let now = 1_700_000_000;
        assert!(Proposal::validate_fields("t", "d", now, now + 86_400).is_ok());

        let err = Proposal::validate_fields("t", "d", now, now).unwrap_err();
        assert_eq!(code(err), u32::from(GovernanceError::InvalidWindow));
        let err = Proposal::validate_fields("t", "d", now, now - 1).unwrap_err();
        assert_eq!(code(err), u32::from(GovernanceError::InvalidWindow));
    }

    #[test]
    fn payload_limits_are_inclusive() {
        let title = "a".repeat(MAX_TITLE_LEN);
        let description = "b".repeat(MAX_DESCRIPTION_LEN);
        assert!(Proposal::validate_fields(&title, &description, 0, 1).is_ok());

        let err = Proposal::validate_fields(&"a".repeat(MAX_TITLE_LEN + 1), "", 0, 1).unwrap_err();
        assert_eq!(code(err), u32::from(GovernanceError::PayloadTooLarge));
        let err =
            Proposal::validate_fields("", &"b".repeat(MAX_DESCRIPTION_LEN + 1), 0, 1).unwrap_err();
        assert_eq!(code(err), u32::from(GovernanceError::PayloadTooLarge));
    }

    #[test]
    fn invalid_window_is_reported_before_payload() {
        let err = Proposal::validate_fields(&"a".repeat(MAX_TITLE_LEN + 1), "", 5, 5).unwrap_err();
        assert_eq!(code(err), u32::from(GovernanceError::InvalidWindow));
    }

    #[test]
    fn largest_proposal_fits_in_space() {
        let mut p = proposal(0, 1);
        p.title = "a".repeat(MAX_TITLE_LEN);
        p.description = "b".repeat(MAX_DESCRIPTION_LEN);
        let mut buf = Vec::new();
        p.try_serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), Proposal::SPACE);

        let decoded = Proposal::try_deserialize(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded.title, p.title);
        assert_eq!(decoded.abstain_votes, 0);
    }

    #[test]
    fn status_follows_clock() {
        let p = proposal(100, 200);
        assert_eq!(p.status(99), ProposalStatus::Pending);
        assert_eq!(p.status(100), ProposalStatus::Open);
        assert_eq!(p.status(199), ProposalStatus::Open);
        assert_eq!(p.status(200), ProposalStatus::Closed);
    }

    #[test]
    fn votes_touch_exactly_one_tally() {
        let mut p = proposal(0, 10);
        assert_eq!(p.tally(), VoteTally::default());

        let t = p.record_vote(VoteChoice::For, 3).unwrap();
        assert_eq!(t, VoteTally { for_votes: 3, against_votes: 0, abstain_votes: 0 });
        let t = p.record_vote(VoteChoice::Abstain, 2).unwrap();
        assert_eq!(t, VoteTally { for_votes: 3, against_votes: 0, abstain_votes: 2 });
        let t = p.record_vote(VoteChoice::Against, 1).unwrap();
        assert_eq!(t, VoteTally { for_votes: 3, against_votes: 1, abstain_votes: 2 });
    }

    #[test]
    fn tally_overflow_leaves_proposal_unchanged() {
        let mut p = proposal(0, 10);
        p.against_votes = u64::MAX;
        let err = p.record_vote(VoteChoice::Against, 1).unwrap_err();
        assert_eq!(code(err), u32::from(GovernanceError::OverflowError));
        assert_eq!(p.against_votes, u64::MAX);
        assert_eq!(p.for_votes, 0);
    }

    #[test]
    fn fresh_vote_record_is_not_cast() {
        let record = VoteRecord {
            proposal: Pubkey::default(),
            voter: Pubkey::default(),
            choice: VoteChoice::For,
            weight: 0,
            cast_at: 0,
            bump: 0,
        };
        assert!(!record.is_cast());
    }
}
