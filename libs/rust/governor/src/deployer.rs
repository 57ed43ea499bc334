use crate::{
    error::Result,
    options::TransactOptions,
    session::{Governor, Votes},
};
use alloy::{
    contract::RawCallBuilder,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    sol_types::SolConstructor,
};
use contracts::{GovernorMock, VotesMock};
use tracing::{info, instrument};

/// Constructor arguments of `GovernorMock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernorParams {
    pub name: String,
    pub token: Address,
    pub voting_delay: U256,
    pub voting_period: U256,
    pub quorum_numerator: U256,
}

impl GovernorParams {
    fn constructor(&self) -> GovernorMock::constructorCall {
        GovernorMock::constructorCall {
            name_: self.name.clone(),
            token_: self.token,
            votingDelay_: self.voting_delay,
            votingPeriod_: self.voting_period,
            quorumNumerator_: self.quorum_numerator,
        }
    }
}

/// Creation code followed by the ABI-encoded constructor arguments.
pub fn deploy_code<C: SolConstructor>(creation_bytecode: &[u8], args: &C) -> Bytes {
    [creation_bytecode, &args.abi_encode()[..]].concat().into()
}

/// Sends a create transaction and waits for its receipt.
pub async fn deploy_contract<P: Provider>(provider: P, code: Bytes, opts: &TransactOptions) -> Result<Address> {
    let builder: RawCallBuilder<P> = RawCallBuilder::new_raw_deploy(provider, code);
    Ok(opts.apply(builder).deploy().await?)
}

/// Deploys a `VotesMock` from compiled creation code (e.g. a solc or Foundry artifact).
#[instrument(skip(provider, creation_bytecode, opts))]
pub async fn deploy_votes_mock<P: Provider + Clone>(
    provider: P,
    creation_bytecode: &[u8],
    name: &str,
    opts: &TransactOptions,
) -> Result<Votes<P>> {
    let code = deploy_code(
        creation_bytecode,
        &VotesMock::constructorCall {
            name: name.to_string(),
        },
    );
    let address = deploy_contract(provider.clone(), code, opts).await?;
    info!(address = %address, "VotesMock deployed");
    Ok(Votes::new(address, provider))
}

/// Deploys a `GovernorMock` from compiled creation code.
#[instrument(skip(provider, creation_bytecode, opts), fields(name = %params.name, token = %params.token))]
pub async fn deploy_governor_mock<P: Provider + Clone>(
    provider: P,
    creation_bytecode: &[u8],
    params: &GovernorParams,
    opts: &TransactOptions,
) -> Result<Governor<P>> {
    let code = deploy_code(creation_bytecode, &params.constructor());
    let address = deploy_contract(provider.clone(), code, opts).await?;
    info!(address = %address, "GovernorMock deployed");
    Ok(Governor::new(address, provider))
}
