//! Contract bindings via `alloy::sol!`.
//!
//! One `#[sol(rpc)]` interface per OpenZeppelin governance contract that exposes an
//! external ABI. Libraries without one (Address, Context, DoubleEndedQueue, ECDSA,
//! SafeCast, Strings, Timers) have nothing to bind.

use alloy::sol;

// ── ERC-165 ─────────────────────────────────────────────────

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC165 {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface ERC165 {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }
}

// ── Token receiver hooks ────────────────────────────────────

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC721Receiver {
        function onERC721Received(address operator, address from, uint256 tokenId, bytes data) external returns (bytes4);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC1155Receiver {
        function onERC1155Received(address operator, address from, uint256 id, uint256 value, bytes data) external returns (bytes4);
        function onERC1155BatchReceived(address operator, address from, uint256[] ids, uint256[] values, bytes data) external returns (bytes4);
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }
}

// ── Voting token ────────────────────────────────────────────

sol! {
    #[allow(missing_docs)]
    #[sol(rpc, all_derives)]
    interface IVotes {
        event DelegateChanged(address indexed delegator, address indexed fromDelegate, address indexed toDelegate);
        event DelegateVotesChanged(address indexed delegate, uint256 previousBalance, uint256 newBalance);

        function getVotes(address account) external view returns (uint256);
        function getPastVotes(address account, uint256 blockNumber) external view returns (uint256);
        function getPastTotalSupply(uint256 blockNumber) external view returns (uint256);
        function delegates(address account) external view returns (address);
        function delegate(address delegatee) external;
        function delegateBySig(address delegatee, uint256 nonce, uint256 expiry, uint8 v, bytes32 r, bytes32 s) external;
    }
}

// Test token the governor mock is deployed against.
sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    VotesMock,
    "./abis/VotesMock.json"
);

// ── Governor core ───────────────────────────────────────────

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IGovernor {
        event ProposalCreated(uint256 proposalId, address proposer, address[] targets, uint256[] values, string[] signatures, bytes[] calldatas, uint256 startBlock, uint256 endBlock, string description);
        event ProposalCanceled(uint256 proposalId);
        event ProposalExecuted(uint256 proposalId);
        event VoteCast(address indexed voter, uint256 proposalId, uint8 support, uint256 weight, string reason);
        event VoteCastWithParams(address indexed voter, uint256 proposalId, uint8 support, uint256 weight, string reason, bytes params);

        function name() external view returns (string);
        function version() external view returns (string);
        function COUNTING_MODE() external pure returns (string);
        function hashProposal(address[] targets, uint256[] values, bytes[] calldatas, bytes32 descriptionHash) external pure returns (uint256);
        function state(uint256 proposalId) external view returns (uint8);
        function proposalSnapshot(uint256 proposalId) external view returns (uint256);
        function proposalDeadline(uint256 proposalId) external view returns (uint256);
        function votingDelay() external view returns (uint256);
        function votingPeriod() external view returns (uint256);
        function quorum(uint256 blockNumber) external view returns (uint256);
        function getVotes(address account, uint256 blockNumber) external view returns (uint256);
        function getVotesWithParams(address account, uint256 blockNumber, bytes params) external view returns (uint256);
        function hasVoted(uint256 proposalId, address account) external view returns (bool);
        function propose(address[] targets, uint256[] values, bytes[] calldatas, string description) external returns (uint256 proposalId);
        function execute(address[] targets, uint256[] values, bytes[] calldatas, bytes32 descriptionHash) external payable returns (uint256 proposalId);
        function castVote(uint256 proposalId, uint8 support) external returns (uint256 balance);
        function castVoteWithReason(uint256 proposalId, uint8 support, string reason) external returns (uint256 balance);
        function castVoteWithReasonAndParams(uint256 proposalId, uint8 support, string reason, bytes params) external returns (uint256 balance);
        function castVoteBySig(uint256 proposalId, uint8 support, uint8 v, bytes32 r, bytes32 s) external returns (uint256 balance);
        function castVoteWithReasonAndParamsBySig(uint256 proposalId, uint8 support, string reason, bytes params, uint8 v, bytes32 r, bytes32 s) external returns (uint256 balance);
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface Governor {
        event ProposalCreated(uint256 proposalId, address proposer, address[] targets, uint256[] values, string[] signatures, bytes[] calldatas, uint256 startBlock, uint256 endBlock, string description);
        event ProposalCanceled(uint256 proposalId);
        event ProposalExecuted(uint256 proposalId);
        event VoteCast(address indexed voter, uint256 proposalId, uint8 support, uint256 weight, string reason);
        event VoteCastWithParams(address indexed voter, uint256 proposalId, uint8 support, uint256 weight, string reason, bytes params);

        function BALLOT_TYPEHASH() external view returns (bytes32);
        function EXTENDED_BALLOT_TYPEHASH() external view returns (bytes32);
        function name() external view returns (string);
        function version() external view returns (string);
        function COUNTING_MODE() external pure returns (string);
        function hashProposal(address[] targets, uint256[] values, bytes[] calldatas, bytes32 descriptionHash) external pure returns (uint256);
        function state(uint256 proposalId) external view returns (uint8);
        function proposalSnapshot(uint256 proposalId) external view returns (uint256);
        function proposalDeadline(uint256 proposalId) external view returns (uint256);
        function proposalThreshold() external view returns (uint256);
        function votingDelay() external view returns (uint256);
        function votingPeriod() external view returns (uint256);
        function quorum(uint256 blockNumber) external view returns (uint256);
        function getVotes(address account, uint256 blockNumber) external view returns (uint256);
        function getVotesWithParams(address account, uint256 blockNumber, bytes params) external view returns (uint256);
        function hasVoted(uint256 proposalId, address account) external view returns (bool);
        function propose(address[] targets, uint256[] values, bytes[] calldatas, string description) external returns (uint256);
        function execute(address[] targets, uint256[] values, bytes[] calldatas, bytes32 descriptionHash) external payable returns (uint256);
        function castVote(uint256 proposalId, uint8 support) external returns (uint256);
        function castVoteWithReason(uint256 proposalId, uint8 support, string reason) external returns (uint256);
        function castVoteWithReasonAndParams(uint256 proposalId, uint8 support, string reason, bytes params) external returns (uint256);
        function castVoteBySig(uint256 proposalId, uint8 support, uint8 v, bytes32 r, bytes32 s) external returns (uint256);
        function castVoteWithReasonAndParamsBySig(uint256 proposalId, uint8 support, string reason, bytes params, uint8 v, bytes32 r, bytes32 s) external returns (uint256);
        function relay(address target, uint256 value, bytes data) external payable;
        function onERC721Received(address, address, uint256, bytes) external returns (bytes4);
        function onERC1155Received(address, address, uint256, uint256, bytes) external returns (bytes4);
        function onERC1155BatchReceived(address, address, uint256[], uint256[], bytes) external returns (bytes4);
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }
}

// ── Governor extensions ─────────────────────────────────────

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface GovernorSettings {
        event VotingDelaySet(uint256 oldVotingDelay, uint256 newVotingDelay);
        event VotingPeriodSet(uint256 oldVotingPeriod, uint256 newVotingPeriod);
        event ProposalThresholdSet(uint256 oldProposalThreshold, uint256 newProposalThreshold);

        function votingDelay() external view returns (uint256);
        function votingPeriod() external view returns (uint256);
        function proposalThreshold() external view returns (uint256);
        function setVotingDelay(uint256 newVotingDelay) external;
        function setVotingPeriod(uint256 newVotingPeriod) external;
        function setProposalThreshold(uint256 newProposalThreshold) external;
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface GovernorVotes {
        function token() external view returns (address);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface GovernorVotesQuorumFraction {
        event QuorumNumeratorUpdated(uint256 oldQuorumNumerator, uint256 newQuorumNumerator);

        function quorumNumerator() external view returns (uint256);
        function quorumNumerator(uint256 blockNumber) external view returns (uint256);
        function quorumDenominator() external view returns (uint256);
        function quorum(uint256 blockNumber) external view returns (uint256);
        function updateQuorumNumerator(uint256 newQuorumNumerator) external;
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface GovernorCountingSimple {
        function COUNTING_MODE() external pure returns (string);
        function hasVoted(uint256 proposalId, address account) external view returns (bool);
        function proposalVotes(uint256 proposalId) external view returns (uint256 againstVotes, uint256 forVotes, uint256 abstainVotes);
    }
}

// ── Full governor as deployed (settings + votes + quorum fraction + simple counting) ──

sol!(
    #[allow(missing_docs)]
    #[sol(rpc, all_derives)]
    GovernorMock,
    "./abis/GovernorMock.json"
);
