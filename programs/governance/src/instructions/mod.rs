pub mod create_proposal;
pub mod cast_vote;

pub use create_proposal::*;
pub use cast_vote::*;
