use anchor_lang::prelude::*;

pub const PROPOSAL_COUNTER_SEED: &[u8] = b"proposal_counter";
pub const PROPOSAL_SEED: &[u8] = b"proposal";
pub const VOTE_RECORD_SEED: &[u8] = b"vote";

/// Derives a program address from a namespace, an owner key and an optional
/// sequence seed. Returns the address together with its canonical bump.
pub fn derive_address(namespace: &[u8], owner: &Pubkey, seq: Option<&[u8]>) -> (Pubkey, u8) {
    match seq {
        Some(seq) => Pubkey::find_program_address(&[namespace, owner.as_ref(), seq], &crate::ID),
        None => Pubkey::find_program_address(&[namespace, owner.as_ref()], &crate::ID),
    }
}

/// Sequence seed of a proposal: the decimal form of its id, which is what
/// clients build with `count.toString()`.
pub fn proposal_seq_seed(id: u64) -> String {
    id.to_string()
}

pub fn proposal_address(creator: &Pubkey, id: u64) -> (Pubkey, u8) {
    let seq = proposal_seq_seed(id);
    derive_address(PROPOSAL_SEED, creator, Some(seq.as_bytes()))
}
