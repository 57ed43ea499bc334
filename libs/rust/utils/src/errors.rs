//env
pub const ETHEREUM_NODE_URL_NOT_SET: &str = "ETHEREUM_NODE_URL not set!";
pub const GOVERNOR_ADDRESS_NOT_SET: &str = "GOVERNOR_ADDRESS not set!";

//config
pub const CONFIG_PARSE_FAILED: &str = "Failed to parse config";
pub const INVALID_RPC_URL: &str = "Invalid RPC URL";

//rpc
pub const PROVIDER_CONNECTION_FAILED: &str = "Failed to connect to RPC provider";
pub const BLOCK_NUMBER_FETCH_FAILED: &str = "Failed to fetch latest block number";
pub const CHAIN_ID_FETCH_FAILED: &str = "Failed to fetch chain id";

//governor
pub const GOVERNOR_INFO_FAILED: &str = "Failed to read governor parameters";
pub const PROPOSAL_FETCH_FAILED: &str = "Failed to fetch proposal";
pub const PROPOSAL_FILE_READ_FAILED: &str = "Failed to read proposal file";
pub const EVENT_SCAN_FAILED: &str = "Failed to scan governor events";
pub const EVENT_WATCH_FAILED: &str = "Failed to watch governor events";
pub const VOTES_FETCH_FAILED: &str = "Failed to fetch voting power";
