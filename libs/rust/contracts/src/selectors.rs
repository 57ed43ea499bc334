use crate::bindings::{GovernorMock, IERC165, IERC721Receiver, IERC1155Receiver, IGovernor, IVotes};
use alloy::{
    primitives::{FixedBytes, fixed_bytes},
    sol_types::{SolCall, SolInterface},
};

pub const IERC165_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("0x01ffc9a7");
pub const IERC721_RECEIVER_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("0x150b7a02");
pub const IERC1155_RECEIVER_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("0x4e2312e0");

/// ERC-165 identifier of an interface: the XOR of its function selectors.
pub fn interface_id<I>(selectors: I) -> FixedBytes<4>
where
    I: IntoIterator<Item = [u8; 4]>,
{
    let id = selectors.into_iter().fold([0u8; 4], |mut acc, selector| {
        for (a, s) in acc.iter_mut().zip(selector) {
            *a ^= s;
        }
        acc
    });
    FixedBytes(id)
}

pub fn ierc165_interface_id() -> FixedBytes<4> {
    interface_id([IERC165::supportsInterfaceCall::SELECTOR])
}

pub fn ierc721_receiver_interface_id() -> FixedBytes<4> {
    interface_id([IERC721Receiver::onERC721ReceivedCall::SELECTOR])
}

pub fn ierc1155_receiver_interface_id() -> FixedBytes<4> {
    interface_id([
        IERC1155Receiver::onERC1155ReceivedCall::SELECTOR,
        IERC1155Receiver::onERC1155BatchReceivedCall::SELECTOR,
    ])
}

/// Functions declared by IGovernor itself; `supportsInterface` is inherited from IERC165.
pub fn igovernor_interface_id() -> FixedBytes<4> {
    interface_id([
        IGovernor::nameCall::SELECTOR,
        IGovernor::versionCall::SELECTOR,
        IGovernor::COUNTING_MODECall::SELECTOR,
        IGovernor::hashProposalCall::SELECTOR,
        IGovernor::stateCall::SELECTOR,
        IGovernor::proposalSnapshotCall::SELECTOR,
        IGovernor::proposalDeadlineCall::SELECTOR,
        IGovernor::votingDelayCall::SELECTOR,
        IGovernor::votingPeriodCall::SELECTOR,
        IGovernor::quorumCall::SELECTOR,
        IGovernor::getVotesCall::SELECTOR,
        IGovernor::getVotesWithParamsCall::SELECTOR,
        IGovernor::hasVotedCall::SELECTOR,
        IGovernor::proposeCall::SELECTOR,
        IGovernor::executeCall::SELECTOR,
        IGovernor::castVoteCall::SELECTOR,
        IGovernor::castVoteWithReasonCall::SELECTOR,
        IGovernor::castVoteWithReasonAndParamsCall::SELECTOR,
        IGovernor::castVoteBySigCall::SELECTOR,
        IGovernor::castVoteWithReasonAndParamsBySigCall::SELECTOR,
    ])
}

pub fn ivotes_interface_id() -> FixedBytes<4> {
    interface_id([
        IVotes::getVotesCall::SELECTOR,
        IVotes::getPastVotesCall::SELECTOR,
        IVotes::getPastTotalSupplyCall::SELECTOR,
        IVotes::delegatesCall::SELECTOR,
        IVotes::delegateCall::SELECTOR,
        IVotes::delegateBySigCall::SELECTOR,
    ])
}

macro_rules! signatures {
    ($($call:ident),* $(,)?) => {
        &[$((GovernorMock::$call::SELECTOR, GovernorMock::$call::SIGNATURE)),*]
    };
}

static GOVERNOR_SIGNATURES: &[([u8; 4], &str)] = signatures!(
    BALLOT_TYPEHASHCall,
    EXTENDED_BALLOT_TYPEHASHCall,
    COUNTING_MODECall,
    nameCall,
    versionCall,
    tokenCall,
    hashProposalCall,
    stateCall,
    proposalSnapshotCall,
    proposalDeadlineCall,
    proposalThresholdCall,
    proposalVotesCall,
    votingDelayCall,
    votingPeriodCall,
    quorumCall,
    quorumNumerator_0Call,
    quorumNumerator_1Call,
    quorumDenominatorCall,
    getVotesCall,
    getVotesWithParamsCall,
    hasVotedCall,
    proposeCall,
    executeCall,
    cancelCall,
    castVoteCall,
    castVoteWithReasonCall,
    castVoteWithReasonAndParamsCall,
    castVoteBySigCall,
    castVoteWithReasonAndParamsBySigCall,
    relayCall,
    setVotingDelayCall,
    setVotingPeriodCall,
    setProposalThresholdCall,
    updateQuorumNumeratorCall,
    onERC721ReceivedCall,
    onERC1155ReceivedCall,
    onERC1155BatchReceivedCall,
    supportsInterfaceCall,
);

/// Reverse lookup of a governor function selector to its canonical signature.
pub fn function_signature(selector: [u8; 4]) -> Option<&'static str> {
    GOVERNOR_SIGNATURES
        .iter()
        .find(|(s, _)| *s == selector)
        .map(|(_, signature)| *signature)
}

/// Function name without the parameter list, e.g. `castVote`.
pub fn function_name(selector: [u8; 4]) -> Option<&'static str> {
    function_signature(selector).and_then(|signature| signature.split('(').next())
}

/// Decodes calldata addressed to the governor itself, as found in self-administering proposals.
pub fn decode_governor_call(calldata: &[u8]) -> Option<GovernorMock::GovernorMockCalls> {
    GovernorMock::GovernorMockCalls::abi_decode(calldata).ok()
}
