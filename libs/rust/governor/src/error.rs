use alloy::primitives::B256;
use contracts::ProposalError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),
    #[error("rpc request failed: {0}")]
    Transport(#[from] alloy::transports::TransportError),
    #[error("failed to decode abi data: {0}")]
    Decode(#[from] alloy::sol_types::Error),
    #[error(transparent)]
    Proposal(#[from] ProposalError),
    #[error("log has no topics")]
    AnonymousLog,
    #[error("unknown event signature {0}")]
    UnknownEvent(B256),
    #[error("gave up scanning blocks {from}..={to} after {attempts} failed attempts: {source}")]
    ScanExhausted {
        from: u64,
        to: u64,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Whether repeating the same request can succeed. Decode failures are
    /// deterministic for a given block range.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Contract(alloy::contract::Error::TransportError(_))
        )
    }
}
