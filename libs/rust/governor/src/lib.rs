//! Typed client for OpenZeppelin Governor deployments.
//!
//! The ABI surface lives in the `contracts` crate as `sol!` bindings. This crate
//! splits it by concern: [`GovernorCaller`] for view calls, [`GovernorTransactor`]
//! for transactions, [`GovernorFilterer`] for logs, tied together by [`Governor`]
//! and [`GovernorSession`]. [`deploy_governor_mock`] stands up a fresh deployment
//! from compiled creation code.

pub mod caller;
pub mod deployer;
pub mod error;
pub mod events;
pub mod filterer;
pub mod options;
pub mod scanner;
pub mod session;
pub mod transactor;

pub use caller::{GovernorCaller, ProposalOverview, ProposalVotes, VotesCaller};
pub use deployer::{GovernorParams, deploy_contract, deploy_governor_mock, deploy_votes_mock};
pub use error::{Error, Result};
pub use events::{Decoded, EventIterator, GovernorEvent};
pub use filterer::{GovernorFilterer, decode_governor_log};
pub use options::{CallOptions, TransactOptions};
pub use scanner::{LogScanner, ScanOutcome, ScannerConfig};
pub use session::{Governor, GovernorSession, Votes};
pub use transactor::{GovernorTransactor, VotesTransactor};
