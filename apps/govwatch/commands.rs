use crate::{
    cli::{Cli, Command},
    config::{self, Settings},
};
use alloy::{
    primitives::{U256, utils::format_ether},
    providers::{Provider, ProviderBuilder},
};
use anyhow::{Context, Result};
use chrono::Utc;
use contracts::{
    ProposalActions, description_hash, hash_proposal, proposal_title,
    selectors::{
        ierc165_interface_id, ierc721_receiver_interface_id, ierc1155_receiver_interface_id,
        igovernor_interface_id, ivotes_interface_id,
    },
};
use futures::StreamExt;
use governor::{CallOptions, Decoded, Governor, GovernorEvent, LogScanner, ProposalOverview, VotesCaller};
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::{info, instrument, warn};
use utils::errors::*;

/// A proposal as submitted to `propose`.
#[derive(Debug, Deserialize)]
pub struct ProposalFile {
    #[serde(flatten)]
    pub actions: ProposalActions,
    pub description: String,
}

pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Hash { file } => return hash(file),
        Command::Selectors => {
            selectors();
            return Ok(());
        }
        _ => {}
    }

    let settings = config::load(cli.config.as_deref()).resolve(cli.rpc_url, cli.governor, cli.votes_token)?;
    let provider = ProviderBuilder::new().connect_http(settings.rpc_url.clone());
    let latest = provider
        .get_block_number()
        .await
        .context(PROVIDER_CONNECTION_FAILED)?;
    info!(governor = %settings.governor, latest_block = latest, "Connected to node");

    let governor = Governor::new(settings.governor, provider.clone());

    match cli.command {
        Command::Info => info_cmd(&governor, &provider).await,
        Command::Proposal { id } => proposal(&governor, id).await,
        Command::Proposals { from, to } => proposals(&governor, &settings, from, to.unwrap_or(latest)).await,
        Command::Events { from, to } => events(&governor, &settings, from, to.unwrap_or(latest)).await,
        Command::Watch => watch(&governor).await,
        Command::Votes { account, block } => votes(&governor, &settings, provider, account, block).await,
        Command::Hash { .. } | Command::Selectors => Ok(()),
    }
}

async fn info_cmd<P: Provider + Clone>(governor: &Governor<P>, provider: &P) -> Result<()> {
    let chain_id = provider.get_chain_id().await.context(CHAIN_ID_FETCH_FAILED)?;
    let caller = &governor.caller;
    let opts = CallOptions::default();

    let name = caller.name(&opts).await.context(GOVERNOR_INFO_FAILED)?;
    let version = caller.version(&opts).await.context(GOVERNOR_INFO_FAILED)?;
    let counting_mode = caller.counting_mode(&opts).await.context(GOVERNOR_INFO_FAILED)?;
    let voting_delay = caller.voting_delay(&opts).await.context(GOVERNOR_INFO_FAILED)?;
    let voting_period = caller.voting_period(&opts).await.context(GOVERNOR_INFO_FAILED)?;
    let threshold = caller.proposal_threshold(&opts).await.context(GOVERNOR_INFO_FAILED)?;
    let numerator = caller.quorum_numerator(&opts).await.context(GOVERNOR_INFO_FAILED)?;
    let denominator = caller.quorum_denominator(&opts).await.context(GOVERNOR_INFO_FAILED)?;
    let token = caller.token(&opts).await.context(GOVERNOR_INFO_FAILED)?;
    let is_governor = caller
        .supports_interface(igovernor_interface_id(), &opts)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "supportsInterface call failed");
            false
        });

    println!("governor        {}", governor.address());
    println!("chain id        {chain_id}");
    println!("name            {name}");
    println!("version         {version}");
    println!("counting mode   {counting_mode}");
    println!("voting delay    {voting_delay} blocks");
    println!("voting period   {voting_period} blocks");
    println!("threshold       {}", format_ether(threshold));
    println!("quorum          {numerator}/{denominator}");
    println!("token           {token}");
    println!("IGovernor       {is_governor}");
    Ok(())
}

async fn proposal<P: Provider + Clone>(governor: &Governor<P>, id: U256) -> Result<()> {
    let overview = governor
        .caller
        .proposal(id, &CallOptions::default())
        .await
        .context(PROPOSAL_FETCH_FAILED)?;
    print_overview(&overview);
    Ok(())
}

fn print_overview(overview: &ProposalOverview) {
    println!("proposal        {}", overview.id);
    println!("state           {}", overview.state);
    println!("snapshot        {}", overview.snapshot);
    println!("deadline        {}", overview.deadline);
    println!("for             {}", format_ether(overview.votes.r#for));
    println!("against         {}", format_ether(overview.votes.against));
    println!("abstain         {}", format_ether(overview.votes.abstain));
    match (overview.quorum, overview.quorum_reached()) {
        (Some(quorum), Some(reached)) => {
            println!("quorum          {} (reached: {reached})", format_ether(quorum))
        }
        _ => println!("quorum          unavailable"),
    }
}

#[instrument(skip(governor, settings))]
async fn proposals<P: Provider + Clone>(governor: &Governor<P>, settings: &Settings, from: u64, to: u64) -> Result<()> {
    let mut scanner = LogScanner::new(settings.scanner);
    let filterer = &governor.filterer;
    let outcome = scanner
        .scan(from..=to, |range| filterer.filter_proposal_created(range, &[]))
        .await
        .context(EVENT_SCAN_FAILED)?;

    info!(proposals = outcome.items.len(), next_block = outcome.next_block, "Proposal scan finished");

    let opts = CallOptions::default();
    for created in &outcome.items {
        let id = created.event.proposalId;
        let state = match governor.caller.state(id, &opts).await {
            Ok(state) => state.to_string(),
            Err(e) => {
                warn!(proposal_id = %id, error = %e, "Failed to fetch proposal state");
                "Unknown".to_string()
            }
        };
        println!(
            "{:>10}  {id}  {state:<9}  {}",
            created.block_number().unwrap_or_default(),
            proposal_title(&created.event.description)
        );
    }
    Ok(())
}

#[instrument(skip(governor, settings))]
async fn events<P: Provider + Clone>(governor: &Governor<P>, settings: &Settings, from: u64, to: u64) -> Result<()> {
    let mut scanner = LogScanner::new(settings.scanner);
    let filterer = &governor.filterer;
    let outcome = scanner
        .scan(from..=to, |range| filterer.filter_events(range))
        .await
        .context(EVENT_SCAN_FAILED)?;

    for decoded in &outcome.items {
        println!("{}", describe(decoded));
    }
    info!(events = outcome.items.len(), next_block = outcome.next_block, "Event scan finished");
    Ok(())
}

async fn watch<P: Provider + Clone>(governor: &Governor<P>) -> Result<()> {
    let stream = governor.filterer.watch_events().await.context(EVENT_WATCH_FAILED)?;
    futures::pin_mut!(stream);
    info!(governor = %governor.address(), "Watching governor events");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
            next = stream.next() => match next {
                Some(decoded) => println!("{}  {}", Utc::now().to_rfc3339(), describe(&decoded)),
                None => {
                    warn!("Log subscription ended");
                    break;
                }
            }
        }
    }
    Ok(())
}

async fn votes<P: Provider + Clone>(
    governor: &Governor<P>,
    settings: &Settings,
    provider: P,
    account: alloy::primitives::Address,
    block: Option<u64>,
) -> Result<()> {
    let weight = match (settings.votes_token, block) {
        (Some(token), None) => VotesCaller::new(contracts::IVotes::new(token, provider))
            .get_votes(account, &CallOptions::default())
            .await
            .context(VOTES_FETCH_FAILED)?,
        (Some(token), Some(block)) => VotesCaller::new(contracts::IVotes::new(token, provider))
            .get_past_votes(account, U256::from(block), &CallOptions::default())
            .await
            .context(VOTES_FETCH_FAILED)?,
        (None, block) => {
            // Governor getVotes only answers for past blocks.
            let block = match block {
                Some(block) => block,
                None => provider
                    .get_block_number()
                    .await
                    .context(BLOCK_NUMBER_FETCH_FAILED)?
                    .saturating_sub(1),
            };
            governor
                .caller
                .get_votes(account, U256::from(block), &CallOptions::default())
                .await
                .context(VOTES_FETCH_FAILED)?
        }
    };

    println!("{account}  {}", format_ether(weight));
    Ok(())
}

fn hash(path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("{PROPOSAL_FILE_READ_FAILED}: {}", path.display()))?;
    let file: ProposalFile = serde_json::from_str(&contents).context(PROPOSAL_FILE_READ_FAILED)?;
    let id = proposal_id(&file)?;

    println!("title             {}", proposal_title(&file.description));
    println!("description hash  {}", description_hash(&file.description));
    println!("proposal id       {id}");
    Ok(())
}

fn proposal_id(file: &ProposalFile) -> Result<U256> {
    file.actions.validate()?;
    Ok(hash_proposal(&file.actions, description_hash(&file.description)))
}

fn selectors() {
    println!("IERC165           {}", ierc165_interface_id());
    println!("IERC721Receiver   {}", ierc721_receiver_interface_id());
    println!("IERC1155Receiver  {}", ierc1155_receiver_interface_id());
    println!("IGovernor         {}", igovernor_interface_id());
    println!("IVotes            {}", ivotes_interface_id());
}

fn describe(decoded: &Decoded<GovernorEvent>) -> String {
    let block = decoded.block_number().unwrap_or_default();
    let detail = match &decoded.event {
        GovernorEvent::ProposalCreated(e) => {
            format!("{} by {}: {}", e.proposalId, e.proposer, proposal_title(&e.description))
        }
        GovernorEvent::VoteCast(e) => format!(
            "{} voter {} support {} weight {}",
            e.proposalId,
            e.voter,
            e.support,
            format_ether(e.weight)
        ),
        GovernorEvent::VoteCastWithParams(e) => format!(
            "{} voter {} support {} weight {}",
            e.proposalId,
            e.voter,
            e.support,
            format_ether(e.weight)
        ),
        GovernorEvent::VotingDelaySet(e) => format!("{} -> {}", e.oldVotingDelay, e.newVotingDelay),
        GovernorEvent::VotingPeriodSet(e) => format!("{} -> {}", e.oldVotingPeriod, e.newVotingPeriod),
        GovernorEvent::ProposalThresholdSet(e) => {
            format!("{} -> {}", e.oldProposalThreshold, e.newProposalThreshold)
        }
        GovernorEvent::QuorumNumeratorUpdated(e) => {
            format!("{} -> {}", e.oldQuorumNumerator, e.newQuorumNumerator)
        }
        other => other.proposal_id().map(|id| id.to_string()).unwrap_or_default(),
    };
    format!("{block:>10}  {:<22}  {detail}", decoded.event.name())
}
