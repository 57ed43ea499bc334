mod common;

use alloy::{
    primitives::{Bytes, TxKind, U256},
    sol_types::SolCall,
};
use common::{DEPLOYED, FakeNode, GOVERNOR, SENT_TX_HASH, VOTER};
use contracts::{
    GovernorMock::{self, GovernorMockCalls},
    ProposalActions, VoteSupport, description_hash,
    selectors::decode_governor_call,
};
use governor::{
    CallOptions, Error, Governor, GovernorEvent, GovernorParams, TransactOptions, deploy_governor_mock,
};
use futures::StreamExt;
use std::time::Duration;

fn actions() -> ProposalActions {
    ProposalActions::new(
        vec![GOVERNOR],
        vec![U256::from(1)],
        vec![Bytes::from(
            GovernorMock::setVotingDelayCall {
                newVotingDelay: U256::from(1),
            }
            .abi_encode(),
        )],
    )
}

#[tokio::test]
async fn cancel_sends_salted_calldata_with_options() {
    let node = FakeNode::start().await;
    let opts = TransactOptions {
        nonce: Some(7),
        max_fee_per_gas: Some(30_000_000_000),
        max_priority_fee_per_gas: Some(1_000_000_000),
        ..TransactOptions::sender(VOTER).with_gas_limit(500_000)
    };
    let session = Governor::new(GOVERNOR, node.provider()).session(CallOptions::default(), opts);

    let tx_hash = session.cancel(&actions(), "dao propose test").await.unwrap();
    assert_eq!(tx_hash, SENT_TX_HASH);

    let sent = node.sent_transactions();
    assert_eq!(sent.len(), 1);
    let tx = &sent[0];
    assert_eq!(tx.from, Some(VOTER));
    assert_eq!(tx.to, Some(TxKind::Call(GOVERNOR)));
    assert_eq!(tx.gas, Some(500_000));
    assert_eq!(tx.nonce, Some(7));
    assert_eq!(tx.max_fee_per_gas, Some(30_000_000_000));
    assert_eq!(tx.max_priority_fee_per_gas, Some(1_000_000_000));

    let input = tx.input.input().expect("calldata");
    match decode_governor_call(input) {
        Some(GovernorMockCalls::cancel(call)) => {
            assert_eq!(call.salt, description_hash("dao propose test"));
            assert_eq!(call.targets, actions().targets);
            assert_eq!(call.values, actions().values);
            assert_eq!(call.calldatas, actions().calldatas);
        }
        other => panic!("unexpected calldata {other:?}"),
    }
}

#[tokio::test]
async fn propose_and_vote_reach_the_node() {
    let node = FakeNode::start().await;
    let governor = Governor::new(GOVERNOR, node.provider());
    let opts = TransactOptions::sender(VOTER);

    governor
        .transactor
        .propose(&actions(), "dao propose test", &opts)
        .await
        .unwrap();
    governor
        .transactor
        .cast_vote_with_reason(U256::from(9), VoteSupport::Abstain, "no view", &opts)
        .await
        .unwrap();

    let sent = node.sent_transactions();
    assert_eq!(sent.len(), 2);

    let propose = GovernorMock::proposeCall::abi_decode(sent[0].input.input().unwrap()).unwrap();
    assert_eq!(propose.description, "dao propose test");

    let vote = GovernorMock::castVoteWithReasonCall::abi_decode(sent[1].input.input().unwrap()).unwrap();
    assert_eq!(vote.proposalId, U256::from(9));
    assert_eq!(vote.support, VoteSupport::Abstain.as_u8());
    assert_eq!(vote.reason, "no view");
}

#[tokio::test]
async fn invalid_actions_never_reach_the_node() {
    let node = FakeNode::start().await;
    let governor = Governor::new(GOVERNOR, node.provider());
    let broken = ProposalActions::new(vec![GOVERNOR], vec![], vec![]);

    let err = governor
        .transactor
        .cancel(&broken, "broken", &TransactOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Proposal(_)), "got {err}");
    assert!(node.sent_transactions().is_empty());
}

#[tokio::test]
async fn deploy_appends_constructor_args_and_returns_the_new_governor() {
    let node = FakeNode::start().await;
    let creation = [0x60, 0x80, 0x60, 0x40, 0x52];
    let params = GovernorParams {
        name: "governor mock".to_string(),
        token: VOTER,
        voting_delay: U256::from(1),
        voting_period: U256::from(1),
        quorum_numerator: U256::from(100),
    };

    let governor = deploy_governor_mock(node.provider(), &creation, &params, &TransactOptions::sender(VOTER))
        .await
        .unwrap();
    assert_eq!(*governor.address(), DEPLOYED);

    let sent = node.sent_transactions();
    assert_eq!(sent.len(), 1);
    assert!(matches!(sent[0].to, None | Some(TxKind::Create)));
    let code = sent[0].input.input().unwrap();
    assert_eq!(&code[..creation.len()], &creation);
    assert!(code.len() > creation.len());
}

#[tokio::test]
async fn watch_streams_new_events() {
    let node = FakeNode::start().await;
    node.push_filter_change(
        &GovernorMock::ProposalCanceled {
            proposalId: U256::from(4),
        },
        12,
        0,
    );

    let governor = Governor::new(GOVERNOR, node.provider());
    let stream = governor.filterer.watch_events().await.unwrap();
    futures::pin_mut!(stream);

    let decoded = tokio::time::timeout(Duration::from_secs(10), stream.next())
        .await
        .expect("event within timeout")
        .expect("stream open");

    assert!(matches!(decoded.event, GovernorEvent::ProposalCanceled(_)));
    assert_eq!(decoded.event.proposal_id(), Some(U256::from(4)));
    assert_eq!(decoded.block_number(), Some(12));

    let filters = node.log_filters();
    assert_eq!(filters.len(), 1);
    assert_eq!(
        filters[0]["topics"][0].as_array().map(Vec::len),
        Some(GovernorEvent::SIGNATURE_HASHES.len())
    );
}
