//! # training-client
//!
//! HTTP client used by distributed training workers to coordinate with a
//! central task server.
//!
//! ## Design Philosophy
//!
//! training-client is designed to be:
//! - **Thin** - Each call maps to one request and one reply, nothing hidden
//! - **Crash-safe on disk** - Downloaded networks appear atomically or not at all
//! - **Library-first** - The caller owns retries, scheduling and process exit
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use training_client::{ClientConfig, MatchResult, Params, TrainingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TrainingClient::new(ClientConfig::new("http://tasks.example.org"))?;
//!
//!     let mut params = Params::new();
//!     params.insert("user".to_string(), "worker-7".to_string());
//!
//!     let work = training_client::exit_on_incompatible_client(client.next_game(&params).await)?;
//!     client
//!         .download_network(
//!             "http://tasks.example.org/get_network?sha=",
//!             Path::new("networks").join(&work.sha).as_path(),
//!             &work.sha,
//!         )
//!         .await?;
//!
//!     if work.is_match() {
//!         let result = MatchResult {
//!             match_game_id1: work.match_game_id1,
//!             match_game_id2: work.match_game_id2,
//!             ..Default::default()
//!         };
//!         client.upload_match_result(&result, &params).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Task server client
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Request and response types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use client::TrainingClient;
pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result};
pub use types::{DownloadTarget, MatchResult, NextGameResponse, Params};

/// Exit status used when the server refuses this client version
pub const INCOMPATIBLE_CLIENT_EXIT_CODE: i32 = 5;

/// Terminate the process if `result` says the server refuses this client version
///
/// Meant for the top level of a worker binary: an outdated client cannot make
/// progress, so it exits with [`INCOMPATIBLE_CLIENT_EXIT_CODE`]. Any other
/// outcome is passed through unchanged.
///
/// # Example
///
/// ```no_run
/// use training_client::{ClientConfig, Params, TrainingClient, exit_on_incompatible_client};
///
/// # async fn example() -> training_client::Result<()> {
/// let client = TrainingClient::new(ClientConfig::default())?;
/// let work = exit_on_incompatible_client(client.next_game(&Params::new()).await)?;
/// println!("assigned network {}", work.sha);
/// # Ok(())
/// # }
/// ```
pub fn exit_on_incompatible_client<T>(result: Result<T>) -> Result<T> {
    match result {
        Err(e) if e.is_incompatible_client() => {
            tracing::error!(error = %e, "exiting: client must be upgraded");
            std::process::exit(INCOMPATIBLE_CLIENT_EXIT_CODE);
        }
        other => other,
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_helper_passes_success_through() {
        let value = exit_on_incompatible_client(Ok::<_, Error>(7)).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn exit_helper_passes_other_errors_through() {
        let result = exit_on_incompatible_client::<()>(Err(Error::EmptyHash));
        assert!(matches!(result, Err(Error::EmptyHash)));
    }
}
