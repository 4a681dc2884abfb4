// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Probe Client Tests
 * Redirect policy, header precedence and signature extraction
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use harava_scanner::http_client::{random_user_agent, ProbeClient};
use reqwest::Method;
use std::collections::HashMap;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_probe_success_with_signature() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/found"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello world\nsecond line"))
        .mount(&mock_server)
        .await;

    let client = ProbeClient::new(10, 10, HashMap::new()).unwrap();
    let url = format!("{}/found", mock_server.uri());
    let response = client
        .probe(&url, Method::GET, random_user_agent())
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    let sig = response.signature();
    assert_eq!(sig.size, 23);
    assert_eq!(sig.word_count, 4);
    assert_eq!(sig.line_count, 2);
}

#[tokio::test]
async fn test_probe_never_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/images/"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/images/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("listing"))
        .mount(&mock_server)
        .await;

    let client = ProbeClient::new(10, 10, HashMap::new()).unwrap();
    let url = format!("{}/images", mock_server.uri());
    let response = client
        .probe(&url, Method::GET, random_user_agent())
        .await
        .unwrap();

    // The 3xx is the signal; it must come back verbatim.
    assert_eq!(response.status_code, 301);
    assert_eq!(response.header("location").as_deref(), Some("/images/"));
}

#[tokio::test]
async fn test_probe_sends_rotated_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ua"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = ProbeClient::new(10, 10, HashMap::new()).unwrap();
    let url = format!("{}/ua", mock_server.uri());
    let ua = random_user_agent();
    client.probe(&url, Method::GET, ua).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let sent_ua = requests[0]
        .headers
        .get("user-agent")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap();
    assert_eq!(sent_ua, ua);
}

#[tokio::test]
async fn test_custom_headers_override_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth"))
        .and(header("User-Agent", "harava-pinned"))
        .and(header("Authorization", "Bearer token123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut custom = HashMap::new();
    custom.insert("User-Agent".to_string(), "harava-pinned".to_string());
    custom.insert("Authorization".to_string(), "Bearer token123".to_string());

    let client = ProbeClient::new(10, 10, custom).unwrap();
    let url = format!("{}/auth", mock_server.uri());
    let response = client
        .probe(&url, Method::GET, random_user_agent())
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_extra_headers_win_over_custom_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bypass"))
        .and(header("X-Forwarded-For", "127.0.0.1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut custom = HashMap::new();
    custom.insert("X-Forwarded-For".to_string(), "10.0.0.1".to_string());

    let client = ProbeClient::new(10, 10, custom).unwrap();
    let url = format!("{}/bypass", mock_server.uri());
    let response = client
        .probe_with_extra(
            &url,
            Method::GET,
            random_user_agent(),
            &[("X-Forwarded-For", "127.0.0.1".to_string())],
        )
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_probe_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_string("too slow"),
        )
        .mount(&mock_server)
        .await;

    let client = ProbeClient::new(1, 10, HashMap::new()).unwrap();
    let url = format!("{}/slow", mock_server.uri());
    let result = client.probe(&url, Method::GET, random_user_agent()).await;

    assert!(result.is_err(), "request should time out");
}

#[tokio::test]
async fn test_probe_transport_error() {
    let client = ProbeClient::new(2, 10, HashMap::new()).unwrap();
    let result = client
        .probe(
            "http://127.0.0.1:1/unreachable",
            Method::GET,
            random_user_agent(),
        )
        .await;
    assert!(result.is_err());
}
