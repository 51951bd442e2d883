use super::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_build_upload_request_sets_multipart_content_type() {
    let (client, mock_server) = create_test_client().await;
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("training.0.gz");
    std::fs::write(&file_path, b"chunk-bytes").unwrap();

    let url = format!("{}/upload_game", mock_server.uri());
    let request = client
        .build_upload_request(&url, &Params::new(), "file", &file_path)
        .await
        .unwrap();

    assert_eq!(request.method(), &reqwest::Method::POST);
    assert_eq!(request.url().as_str(), url);
    let content_type = request
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "unexpected content type {content_type}"
    );
}

#[tokio::test]
async fn test_build_upload_request_body_has_file_then_fields() {
    let (client, mock_server) = create_test_client().await;
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("training.7.gz");
    std::fs::write(&file_path, b"GAMEDATA-0123456789").unwrap();

    Mock::given(method("POST"))
        .and(path("/upload_game"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut params = Params::new();
    params.insert("training_id".to_string(), "2".to_string());
    params.insert("network_id".to_string(), "611".to_string());

    let url = format!("{}/upload_game", mock_server.uri());
    let request = client
        .build_upload_request(&url, &params, "file", &file_path)
        .await
        .unwrap();

    // Building did not send anything
    assert!(mock_server.received_requests().await.unwrap().is_empty());

    let response = client.execute(request).await.unwrap();
    assert!(response.status().is_success());

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let body = String::from_utf8_lossy(&received[0].body).into_owned();

    let file_part = body
        .find(r#"name="file"; filename="training.7.gz""#)
        .expect("file part missing");
    let contents = body.find("GAMEDATA-0123456789").expect("file contents missing");
    let network_field = body
        .find(r#"name="network_id""#)
        .expect("network_id field missing");
    let training_field = body
        .find(r#"name="training_id""#)
        .expect("training_id field missing");

    assert!(file_part < contents);
    assert!(contents < network_field);
    assert!(network_field < training_field);
    assert!(body.contains("611"));
}

#[tokio::test]
async fn test_build_upload_request_missing_file_fails_without_request() {
    let (client, mock_server) = create_test_client().await;
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("nope.gz");

    let url = format!("{}/upload_game", mock_server.uri());
    let result = client
        .build_upload_request(&url, &Params::new(), "file", &missing)
        .await;

    match result {
        Err(Error::UploadFile {
            path: failed_path,
            source,
        }) => {
            assert_eq!(failed_path, missing);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected UploadFile error, got {other:?}"),
    }
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
