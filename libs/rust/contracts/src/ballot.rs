//! EIP-712 typed data signed by voters for `castVoteBySig` and
//! `castVoteWithReasonAndParamsBySig`.

use crate::proposal::VoteSupport;
use alloy::{
    primitives::{Address, B256, Bytes, U256, keccak256},
    sol,
    sol_types::{Eip712Domain, SolStruct},
};
use std::borrow::Cow;

/// Version string every OpenZeppelin Governor reports from `version()`.
pub const GOVERNOR_VERSION: &str = "1";

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Ballot {
        uint256 proposalId;
        uint8 support;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct ExtendedBallot {
        uint256 proposalId;
        uint8 support;
        string reason;
        bytes params;
    }
}

pub fn governor_domain(name: impl Into<String>, chain_id: u64, verifying_contract: Address) -> Eip712Domain {
    let name: String = name.into();
    Eip712Domain::new(
        Some(Cow::Owned(name)),
        Some(Cow::Borrowed(GOVERNOR_VERSION)),
        Some(U256::from(chain_id)),
        Some(verifying_contract),
        None,
    )
}

pub fn ballot_typehash() -> B256 {
    keccak256(Ballot::eip712_encode_type().as_bytes())
}

pub fn extended_ballot_typehash() -> B256 {
    keccak256(ExtendedBallot::eip712_encode_type().as_bytes())
}

pub fn ballot_signing_hash(domain: &Eip712Domain, proposal_id: U256, support: VoteSupport) -> B256 {
    Ballot {
        proposalId: proposal_id,
        support: support.as_u8(),
    }
    .eip712_signing_hash(domain)
}

pub fn extended_ballot_signing_hash(
    domain: &Eip712Domain,
    proposal_id: U256,
    support: VoteSupport,
    reason: &str,
    params: Bytes,
) -> B256 {
    ExtendedBallot {
        proposalId: proposal_id,
        support: support.as_u8(),
        reason: reason.to_string(),
        params,
    }
    .eip712_signing_hash(domain)
}
