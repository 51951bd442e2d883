//! Shared test helpers for creating TrainingClient instances in tests.

use crate::client::TrainingClient;
use crate::config::ClientConfig;
use std::time::Duration;
use wiremock::MockServer;

/// Helper to create a TrainingClient pointed at a fresh mock server.
/// Returns the client and the server (which must be kept alive).
pub(crate) async fn create_test_client() -> (TrainingClient, MockServer) {
    let mock_server = MockServer::start().await;

    let config = ClientConfig {
        server_url: mock_server.uri(),
        request_timeout: Some(Duration::from_secs(10)),
        connect_timeout: Some(Duration::from_secs(5)),
        ..Default::default()
    };

    let client = TrainingClient::new(config).unwrap();
    (client, mock_server)
}

/// Names of entries in `dir` starting with `prefix`
pub(crate) fn entries_with_prefix(dir: &std::path::Path, prefix: &str) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(prefix))
        .collect()
}

/// Sample work assignment as the server sends it
pub(crate) const SAMPLE_NEXT_GAME: &str = r#"{
  "Type": "train",
  "TrainingId": 2,
  "NetworkId": 611,
  "Sha": "3e2f9a7c",
  "CandidateSha": "",
  "Params": "[\"--visits=10000\",\"--resign-percentage=5\"]",
  "Flip1": false,
  "MatchGameId1": 0,
  "MatchGameId2": 0,
  "KeepTime": "16h",
  "BookUrl": "",
  "BookSha": ""
}"#;
