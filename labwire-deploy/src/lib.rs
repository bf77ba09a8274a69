#![deny(missing_docs)]
//! Deploy and destroy labs through an HTTP relay.
//!
//! A [`DeploySession`] encodes a topology snapshot, wraps it in a
//! [`RelayRequest`](labwire_types::RelayRequest) addressed to the
//! orchestrator, and turns the answer into a [`DeployOutcome`]: a success
//! flag, the downstream status, a plain-text [`DeployLog`], and any [`Hint`]s
//! recognized in a failure.
//!
//! ```no_run
//! # async fn demo(topology: labwire_types::Topology) {
//! use labwire_deploy::{DeployConfig, DeploySession, HttpRelay};
//!
//! let session = DeploySession::new(HttpRelay::from_env());
//! let outcome = session.deploy(topology, &DeployConfig::from_env()).await;
//! print!("{}", outcome.log);
//! # }
//! ```

mod config;
mod error;
pub mod hints;
mod log;
mod relay;
mod session;

pub use config::{ApiToken, DEFAULT_API_URL, DEFAULT_API_USER, DeployConfig, USER_HEADER};
pub use hints::Hint;
pub use log::{DeployLog, strip_ansi};
pub use relay::{HttpRelay, RELAY_URL_VAR};
pub use session::{DeployOutcome, DeploySession};
