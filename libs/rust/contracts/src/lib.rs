pub mod ballot;
pub mod bindings;
pub mod proposal;
pub mod selectors;

pub use bindings::*;
pub use proposal::{
    ProposalActions, ProposalError, ProposalState, VoteSupport, description_hash, hash_proposal,
    proposal_title,
};
