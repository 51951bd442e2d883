//! A server upgrade notice ends the worker process with the dedicated exit status.

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::process::Command;
use training_client::{
    ClientConfig, INCOMPATIBLE_CLIENT_EXIT_CODE, Params, TrainingClient,
    exit_on_incompatible_client,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHILD_ENV: &str = "TRAINING_CLIENT_EXIT_CHILD";

#[tokio::test]
async fn upgrade_notice_exits_with_dedicated_status() {
    if std::env::var_os(CHILD_ENV).is_some() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/next_game"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("Your client is outdated, please upgrade to continue."),
            )
            .mount(&mock_server)
            .await;

        let client = TrainingClient::new(ClientConfig::new(mock_server.uri())).unwrap();
        let _ = exit_on_incompatible_client(client.next_game(&Params::new()).await);
        panic!("process should have exited");
    }

    // Re-run this test in a child process, which should exit instead of failing
    let status = Command::new(std::env::current_exe().unwrap())
        .args([
            "--exact",
            "upgrade_notice_exits_with_dedicated_status",
            "--test-threads=1",
        ])
        .env(CHILD_ENV, "1")
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(INCOMPATIBLE_CLIENT_EXIT_CODE));
}
