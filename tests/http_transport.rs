//! Request client over the real reqwest transport, against a mockito server

use evogate::client::{ClientConfig, ErrorKind, RequestClient};
use mockito::{Matcher, Server};
use serde_json::json;

fn client(url: &str, retries: u32) -> RequestClient {
    let config = ClientConfig::new(url, "secret-key").with_retry(retries, 10).with_timeout(5_000);
    RequestClient::new(config).unwrap()
}

#[tokio::test]
async fn test_post_sends_auth_header_and_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/message/sendText/sales")
        .match_header("apikey", "secret-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "number": "5511999999999", "text": "Hello" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"key":{"id":"MSG1"},"status":"PENDING"}"#)
        .create_async()
        .await;

    let response = client(&server.url(), 0)
        .post("/message/sendText/sales", Some(json!({ "number": "5511999999999", "text": "Hello" })))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body["key"]["id"], "MSG1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_encodes_query_parameters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/group/fetchAllGroups/sales")
        .match_query(Matcher::UrlEncoded("getParticipants".into(), "false".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let response = client(&server.url(), 0)
        .get("/group/fetchAllGroups/sales", Some(json!({ "getParticipants": false })))
        .await
        .unwrap();

    assert_eq!(response.body, json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/instance/fetchInstances")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let url = format!("{}/", server.url());
    let response = client(&url, 0).get("/instance/fetchInstances", None).await.unwrap();

    assert!(response.body.is_null());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/instance/restart/sales")
        .with_status(500)
        .with_body(r#"{"message":"internal"}"#)
        .expect(3)
        .create_async()
        .await;

    let client = client(&server.url(), 2);
    let error = client.post("/instance/restart/sales", None).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Api);
    assert_eq!(error.status, Some(500));
    assert_eq!(client.request_count(), 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/instance/connect/ghost")
        .with_status(404)
        .with_body(r#"{"status":404,"error":"Not Found","response":{"message":["The \"ghost\" instance does not exist"]}}"#)
        .expect(1)
        .create_async()
        .await;

    let error = client(&server.url(), 3).get("/instance/connect/ghost", None).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Api);
    assert_eq!(error.status, Some(404));
    assert!(error.message.contains("does not exist"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/instance/fetchInstances")
        .with_status(401)
        .with_body(r#"{"error":"Unauthorized"}"#)
        .expect(1)
        .create_async()
        .await;

    let error = client(&server.url(), 3).get("/instance/fetchInstances", None).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Authentication);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Port 9 (discard) is closed on test hosts
    let client = client("http://127.0.0.1:9", 1);
    let error = client.get("/instance/fetchInstances", None).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Network);
    assert_eq!(client.request_count(), 2);
}
