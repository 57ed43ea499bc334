use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use utils::tracing::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "govwatch", version, about = "Inspect and follow a Governor deployment")]
pub struct Cli {
    /// YAML config file
    #[arg(long, env = "GOVWATCH_CONFIG_PATH")]
    pub config: Option<String>,

    /// JSON-RPC endpoint, overrides config and ETHEREUM_NODE_URL
    #[arg(long)]
    pub rpc_url: Option<String>,

    #[arg(long)]
    pub governor: Option<Address>,

    #[arg(long)]
    pub votes_token: Option<Address>,

    #[arg(long, env = "GOVWATCH_LOG_FORMAT", value_enum, ignore_case = true, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Governor parameters and supported interfaces
    Info,
    /// State, timing and tally of one proposal
    Proposal { id: U256 },
    /// Proposals created in a block range
    Proposals {
        #[arg(long)]
        from: u64,
        /// Defaults to the latest block
        #[arg(long)]
        to: Option<u64>,
    },
    /// Every governor event in a block range
    Events {
        #[arg(long)]
        from: u64,
        #[arg(long)]
        to: Option<u64>,
    },
    /// Stream new governor events until interrupted
    Watch,
    /// Voting power of an account
    Votes {
        account: Address,
        #[arg(long)]
        block: Option<u64>,
    },
    /// Offline proposal id from a JSON file with targets, values, calldatas and description
    Hash {
        #[arg(long)]
        file: PathBuf,
    },
    /// Print ERC-165 interface ids
    Selectors,
}

impl Cli {
    /// Commands that never touch the node.
    pub fn is_offline(&self) -> bool {
        matches!(self.command, Command::Hash { .. } | Command::Selectors)
    }
}
