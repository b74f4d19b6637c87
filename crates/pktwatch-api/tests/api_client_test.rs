#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pktwatch_api::{ApiClient, Error, PacketId, PacketInfoResponse, PacketQuery};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base = format!("{}/api", server.uri());
    let client = ApiClient::with_client(&base, reqwest::Client::new()).unwrap();
    (server, client)
}

fn token() -> SecretString {
    SecretString::from("test-token".to_owned())
}

// ── Count ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_packet_count() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/packets/count"))
        .and(query_param("access_token", "test-token"))
        .and(query_param("start", "2024-03-01"))
        .and(query_param("regions[]", "Seoul"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 37 })))
        .mount(&server)
        .await;

    let query = PacketQuery {
        start: NaiveDate::from_ymd_opt(2024, 3, 1),
        regions: vec!["Seoul".into()],
        ..PacketQuery::default()
    };
    let count = client.packet_count(Some(&token()), &query).await.unwrap();

    assert_eq!(count, 37);
}

#[tokio::test]
async fn test_packet_count_without_token_still_requests() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/packets/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let count = client
        .packet_count(None, &PacketQuery::default())
        .await
        .unwrap();

    assert_eq!(count, 0);
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_packet_list() {
    let (server, client) = setup().await;

    let body = json!({
        "info": { "today": 12, "cycle": 8, "capture": 3, "error": 1 },
        "list": [
            {
                "created_at": "2403151230",
                "region": "Seoul",
                "location": "Gangnam",
                "model_name": "PM-100",
                "type": "5",
                "packet_id": 101,
                "packet": { "voltage": 3.3 },
                "is_read": false
            },
            {
                "created_at": "2403151231",
                "region": "Busan",
                "location": "Haeundae",
                "model_name": "PM-200",
                "type": "4",
                "packet_id": 102,
                "packet": {},
                "is_read": true
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/packets"))
        .and(query_param("page", "2"))
        .and(query_param("row", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let resp = client
        .packet_list(Some(&token()), &PacketQuery::default(), 2, 10)
        .await
        .unwrap();

    assert_eq!(
        resp.info,
        PacketInfoResponse {
            today: 12,
            cycle: 8,
            capture: 3,
            error: 1
        }
    );
    assert_eq!(resp.list.len(), 2);
    assert_eq!(resp.list[0].packet_id, PacketId::Numeric(101));
    assert_eq!(resp.list[1].model_name, "PM-200");
    assert!(resp.list[1].is_read);
}

// ── Mark read ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_mark_packet_read() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/packets/101"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .mark_packet_read(&PacketId::Numeric(101))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_mark_packet_read_encodes_text_id_as_path_segment() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/packets/pkt%209"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .mark_packet_read(&PacketId::Text("pkt 9".into()))
        .await
        .unwrap();
}

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_device_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards/devices/status"))
        .and(query_param("access_token", "test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "normal": 40, "replacement": 5, "error": 2 })),
        )
        .mount(&server)
        .await;

    let status = client.device_status(Some(&token())).await.unwrap();

    assert_eq!(status.normal, 40);
    assert_eq!(status.replacement, 5);
    assert_eq!(status.error, 2);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_rejected_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;

    let result = client.packet_count(None, &PacketQuery::default()).await;

    let err = result.unwrap_err();
    assert!(err.is_auth_rejected());
    match err {
        Error::Unauthorized { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid token"), "got: {message}");
        }
        other => panic!("expected Unauthorized error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.mark_packet_read(&PacketId::from("7")).await;

    let err = result.unwrap_err();
    assert!(err.is_transient());
    assert!(
        matches!(err, Error::Http { status: 503, .. }),
        "expected Http 503 error, got: {err:?}"
    );
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/packets/count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.packet_count(None, &PacketQuery::default()).await;

    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
