//! HTTP client tests against a mock analysis service

use serde_json::json;
use shelfscan_client::HttpAnalysisClient;
use shelfscan_core::{AnalysisClient, ScanConfig, TrafficLightStatus, UserProfile};
use shelfscan_test_utils::{analysis_json, mixed_analysis, palm_oil_analysis};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpAnalysisClient {
    let config = ScanConfig::new()
        .with_api_base_url(server.uri())
        .with_request_timeout_secs(1);
    HttpAnalysisClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_posts_barcode_and_profile() {
    let server = MockServer::start().await;
    let profile = UserProfile::demo();
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(json!({
            "barcode": "3017620422003",
            "user_profile": serde_json::to_value(&profile).unwrap(),
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_json(&palm_oil_analysis())))
        .expect(1)
        .mount(&server)
        .await;

    let analysis = client_for(&server)
        .analyze("3017620422003", &profile)
        .await
        .unwrap();

    assert_eq!(analysis, palm_oil_analysis());
}

#[tokio::test]
async fn test_forwards_barcode_verbatim() {
    let server = MockServer::start().await;
    let raw = "https://example.org/p?id=1 2";
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_json(&palm_oil_analysis())))
        .mount(&server)
        .await;

    client_for(&server)
        .analyze(raw, &UserProfile::new("u"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["barcode"], raw);
}

#[tokio::test]
async fn test_preserves_verdict_order_and_details() {
    let server = MockServer::start().await;
    let expected = mixed_analysis();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_json(&expected)))
        .mount(&server)
        .await;

    let analysis = client_for(&server)
        .analyze("5449000000996", &UserProfile::demo())
        .await
        .unwrap();

    let names: Vec<_> = analysis
        .agent_verdicts
        .iter()
        .map(|v| v.agent_name.as_str())
        .collect();
    assert_eq!(names, vec!["Bio-Shield", "Circular Guide", "Corporate Detective"]);
    assert_eq!(
        analysis.agent_verdicts[2].status,
        TrafficLightStatus::Unknown("AMBER".to_string())
    );
    assert_eq!(analysis.agent_verdicts[2].details["severity"], 2);
}

#[tokio::test]
async fn test_server_error_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(analysis_json(&palm_oil_analysis())))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .analyze("111", &UserProfile::demo())
        .await
        .unwrap_err();

    assert_eq!(err.barcode(), "111");
    assert!(err.reason().contains("500"));
}

#[tokio::test]
async fn test_not_found_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client_for(&server)
        .analyze("000", &UserProfile::demo())
        .await
        .is_err());
}

#[tokio::test]
async fn test_malformed_body_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product_name": "No id",
            "overall_score": 10,
            "overall_status": "RED"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .analyze("222", &UserProfile::demo())
        .await
        .unwrap_err();
    assert!(err.reason().contains("malformed response"));
}

#[tokio::test]
async fn test_timeout_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(analysis_json(&palm_oil_analysis()))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .analyze("333", &UserProfile::demo())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "could not analyze product 333");
}

#[tokio::test]
async fn test_unreachable_service_is_failure() {
    let config = ScanConfig::new()
        .with_api_base_url("http://127.0.0.1:9")
        .with_request_timeout_secs(1);
    let client = HttpAnalysisClient::new(&config).unwrap();

    assert!(client.analyze("444", &UserProfile::demo()).await.is_err());
}

#[tokio::test]
async fn test_no_retry_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let _ = client_for(&server).analyze("555", &UserProfile::demo()).await;
    // expectation of exactly one request is verified when the server drops
}
