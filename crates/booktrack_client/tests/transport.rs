use std::time::Duration;

use booktrack_client::{ApiError, ApiRequest, ClientSettings, ReqwestTransport, Transport};
use booktrack_core::AuthSession;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> ReqwestTransport {
    ReqwestTransport::new(&ClientSettings::with_base_url(format!("{}/api", server.uri())))
        .expect("valid base url")
}

#[tokio::test]
async fn attaches_bearer_credential_when_session_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/top10"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let session = AuthSession::new("t1", "alice");
    let response = transport_for(&server)
        .send(ApiRequest::get("/books/top10"), Some(&session))
        .await
        .expect("request ok");

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn sends_unauthenticated_without_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/top10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    transport_for(&server)
        .send(ApiRequest::get("/books/top10"), None)
        .await
        .expect("request ok");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn passes_query_parameters_through_including_empty_ones() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .and(query_param("query", ""))
        .and(query_param("page", "2"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::get("/books")
        .query("query", "")
        .query("page", 2)
        .query("size", 5);
    transport_for(&server)
        .send(request, None)
        .await
        .expect("request ok");
}

#[tokio::test]
async fn posts_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::post("/auth/login")
        .json(&json!({"username": "alice", "password": "pw"}))
        .expect("encodes");
    transport_for(&server)
        .send(request, None)
        .await
        .expect("request ok");
}

#[tokio::test]
async fn maps_failure_status_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(ApiRequest::get("/books/999"), None)
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Http { status: 404 });
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn maps_unreachable_server_to_network_error() {
    let transport =
        ReqwestTransport::new(&ClientSettings::with_base_url("http://127.0.0.1:1/api")).unwrap();

    let err = transport
        .send(ApiRequest::get("/books/top10"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn maps_slow_response_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/top10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::with_base_url(format!("{}/api", server.uri()))
    };
    let err = ReqwestTransport::new(&settings)
        .unwrap()
        .send(ApiRequest::get("/books/top10"), None)
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Timeout);
}
