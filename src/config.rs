//! Configuration types for training-client

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`TrainingClient`](crate::TrainingClient)
///
/// Every field has a default, so an empty JSON object deserializes into a
/// usable configuration pointing at a local server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the task server (default: "http://localhost:8080")
    ///
    /// `next_game` and `match_result` are joined onto this URL.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Total timeout for a single request, in seconds (default: 600, None = no timeout)
    ///
    /// Network downloads can be large, so this is generous.
    #[serde(
        default = "default_request_timeout",
        with = "optional_duration_serde"
    )]
    pub request_timeout: Option<Duration>,

    /// Timeout for establishing a connection, in seconds (default: 30, None = no timeout)
    #[serde(
        default = "default_connect_timeout",
        with = "optional_duration_serde"
    )]
    pub connect_timeout: Option<Duration>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given server with default timeouts
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Default::default()
        }
    }

    /// Check that the configuration can be used to build a client
    pub fn validate(&self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(Error::Config {
                message: "server_url must not be empty".to_string(),
                key: Some("server_url".to_string()),
            });
        }

        let parsed = url::Url::parse(&self.server_url).map_err(|e| Error::Config {
            message: format!("server_url '{}' is not a valid URL: {}", self.server_url, e),
            key: Some("server_url".to_string()),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!(
                    "server_url must use http or https, got '{}'",
                    parsed.scheme()
                ),
                key: Some("server_url".to_string()),
            });
        }

        Ok(())
    }

    /// Join an endpoint name onto the server URL
    ///
    /// A trailing slash on `server_url` is ignored, so both
    /// `http://host` and `http://host/` give `http://host/next_game`.
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.server_url.trim_end_matches('/'), name)
    }
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> Option<Duration> {
    Some(Duration::from_secs(600))
}

fn default_connect_timeout() -> Option<Duration> {
    Some(Duration::from_secs(30))
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

// Optional Duration serialization helper
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
