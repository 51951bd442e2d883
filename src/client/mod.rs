//! Task server client split into focused submodules.
//!
//! The `TrainingClient` struct and its methods are organized by concern:
//! - [`transport`] - Form POST and JSON reply decoding
//! - [`upload`] - Multipart file upload request building
//! - [`game`] - Work assignment and match result calls
//! - [`network`] - Atomic network file downloads

mod game;
mod network;
mod transport;
mod upload;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::ClientConfig;
use crate::error::Result;

/// Client for the training task server
///
/// Cheap to clone: clones share the underlying connection pool. Every
/// operation is a plain sequence of awaits with no background work, so a
/// client can be used from any number of tasks at once.
#[derive(Clone, Debug)]
pub struct TrainingClient {
    /// Configuration the client was built from
    pub(crate) config: ClientConfig,
    /// HTTP client used for every request
    pub(crate) http: reqwest::Client,
}

impl TrainingClient {
    /// Create a new client from configuration
    ///
    /// Validates the configuration and builds an HTTP client with the
    /// configured timeouts and user agent.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build()?;

        tracing::debug!(
            server_url = %config.server_url,
            request_timeout = ?config.request_timeout,
            connect_timeout = ?config.connect_timeout,
            "training client created"
        );

        Ok(Self { config, http })
    }

    /// Create a client around an existing HTTP client
    ///
    /// Timeout and user agent settings in `config` are ignored; the given
    /// client's own settings apply.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, http })
    }

    /// Configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying HTTP client
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send a request built by this client, such as an upload request
    ///
    /// The response is returned as-is: no status check, no retry.
    pub async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        let url = request.url().to_string();
        let response = self.http.execute(request).await?;
        tracing::debug!(url = %url, status = %response.status(), "request executed");
        Ok(response)
    }
}
