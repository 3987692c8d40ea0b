//! End-to-end HTTP tests against a spawned gateway.

mod common;

use serde_json::json;

use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::TestClient;

#[tokio::test]
async fn test_liveness_endpoint_returns_ok() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client.get_json("/healthz").await.expect("request should succeed");

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["status"], "ok");
}

#[tokio::test]
async fn test_health_reports_every_tier() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client.get_json("/v2/health").await.expect("request should succeed");

    assert_eq!(reply.status, 200);
    assert_eq!(reply.status_header(), "ok");
    assert_eq!(reply.body["status"], "ok");
    assert_eq!(reply.body["fully_operational"], true);

    let tiers = reply.body["tiers"].as_array().expect("tiers array");
    assert_eq!(tiers.len(), 2);
    assert_eq!(tiers[0]["tier"], "fast");
    assert_eq!(tiers[0]["model"], "intfloat/e5-large-v2");
    assert_eq!(tiers[0]["healthy"], true);
    assert_eq!(tiers[1]["tier"], "accurate");
    assert_eq!(tiers[1]["model"], "text-embedding-ada-002");
}

#[tokio::test]
async fn test_health_flags_unreachable_tier() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");
    server.accurate.fail_health(true);

    let client = TestClient::new(server.url());
    let reply = client.get_json("/v2/health").await.expect("request should succeed");

    assert_eq!(reply.status, 503);
    assert_eq!(reply.status_header(), "degraded");
    assert_eq!(reply.body["status"], "degraded");
    assert_eq!(reply.body["fully_operational"], false);

    let tiers = reply.body["tiers"].as_array().expect("tiers array");
    assert_eq!(tiers[0]["healthy"], true);
    assert_eq!(tiers[1]["healthy"], false);
}

#[tokio::test]
async fn test_embed_returns_one_embedding_per_tier() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client
        .post_json("/v2/embed", &json!({ "text": "embed me" }))
        .await
        .expect("request should succeed");

    assert_eq!(reply.status, 200);
    assert_eq!(reply.status_header(), "ok");

    let embeddings = reply.body["embeddings"].as_array().expect("embeddings array");
    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0]["tier"], "fast");
    assert_eq!(embeddings[0]["dimension"], 8);
    assert_eq!(embeddings[0]["degraded"], false);
    assert_eq!(embeddings[0]["embedding"].as_array().expect("values").len(), 8);
    assert_eq!(embeddings[1]["tier"], "accurate");
    assert_eq!(embeddings[1]["dimension"], 12);
    assert!(reply.body.get("prefix").is_none());
}

#[tokio::test]
async fn test_embed_honors_tier_selection() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client
        .post_json("/v2/embed", &json!({ "text": "embed me", "tier": "accurate" }))
        .await
        .expect("request should succeed");

    let embeddings = reply.body["embeddings"].as_array().expect("embeddings array");
    assert_eq!(embeddings.len(), 1);
    assert_eq!(embeddings[0]["tier"], "accurate");
}

#[tokio::test]
async fn test_embed_echoes_the_prefix() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client
        .post_json("/v2/embed", &json!({ "text": "a stored passage", "prefix": "passage" }))
        .await
        .expect("request should succeed");

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["prefix"], "passage");
}

#[tokio::test]
async fn test_embed_rejects_blank_text() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client
        .post_json("/v2/embed", &json!({ "text": "   " }))
        .await
        .expect("request should complete");

    assert_eq!(reply.status, 400);
    assert_eq!(reply.status_header(), "invalid_request");
    assert_eq!(reply.body["error"], "text must not be empty");
    assert_eq!(reply.body["code"], 400);
}

#[tokio::test]
async fn test_embed_rejects_unknown_tier() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client
        .post_json("/v2/embed", &json!({ "text": "fine", "tier": "turbo" }))
        .await
        .expect("request should complete");

    assert_eq!(reply.status, 400);
    let message = reply.body["error"].as_str().expect("error message");
    assert!(message.contains("unknown tier 'turbo'"), "got {:?}", message);
}

#[tokio::test]
async fn test_embed_reports_degraded_fallbacks() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");
    server.fast.fail_requests(true);

    let client = TestClient::new(server.url());
    let reply = client
        .post_json("/v2/embed", &json!({ "text": "the fast tier is down" }))
        .await
        .expect("request should succeed");

    assert_eq!(reply.status, 200);
    assert_eq!(reply.status_header(), "degraded");

    let embeddings = reply.body["embeddings"].as_array().expect("embeddings array");
    assert_eq!(embeddings[0]["degraded"], true);
    assert_eq!(embeddings[1]["degraded"], false);
}

#[tokio::test]
async fn test_batch_preserves_order_and_meters_usage() {
    let config = TestServerConfig::default().with_tokens_per_text(7);
    let server = spawn_test_server(config).await.expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client
        .post_json("/v2/embed/batch", &json!({ "texts": ["alpha", "beta", "alpha"] }))
        .await
        .expect("request should succeed");

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["count"], 3);

    let results = reply.body["results"].as_array().expect("results array");
    assert_eq!(results.len(), 3);
    for item in results {
        assert_eq!(item["embeddings"].as_array().expect("item embeddings").len(), 2);
    }
    // Same text, same vector; different text, different vector.
    assert_eq!(results[0]["embeddings"], results[2]["embeddings"]);
    assert_ne!(results[0]["embeddings"], results[1]["embeddings"]);

    // Three texts at 7 tokens each, on both tiers.
    assert_eq!(reply.body["usage"]["fast_tokens"], 21);
    assert_eq!(reply.body["usage"]["accurate_tokens"], 21);
    assert_eq!(reply.body["usage"]["total_tokens"], 42);
}

#[tokio::test]
async fn test_batch_of_zero_texts_is_valid() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client
        .post_json("/v2/embed/batch", &json!({ "texts": [] }))
        .await
        .expect("request should succeed");

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["count"], 0);
    assert_eq!(reply.body["results"].as_array().expect("results").len(), 0);
}

#[tokio::test]
async fn test_batch_rejects_more_than_the_limit() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");
    let texts: Vec<String> = (0..101).map(|i| format!("text {}", i)).collect();

    let client = TestClient::new(server.url());
    let reply = client
        .post_json("/v2/embed/batch", &json!({ "texts": texts }))
        .await
        .expect("request should complete");

    assert_eq!(reply.status, 400);
    assert_eq!(reply.status_header(), "invalid_request");
    let message = reply.body["error"].as_str().expect("error message");
    assert!(message.contains("101"), "got {:?}", message);
}

#[tokio::test]
async fn test_compare_scores_identical_texts_as_very_similar() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client
        .post_json(
            "/v2/embed/compare",
            &json!({ "text_a": "same text", "text_b": "same text" }),
        )
        .await
        .expect("request should succeed");

    assert_eq!(reply.status, 200);
    let combined = reply.body["combined_similarity"].as_f64().expect("combined");
    assert!(combined > 0.99, "combined was {}", combined);
    assert_eq!(reply.body["interpretation"], "Very similar");
    assert_eq!(reply.body["degraded"], false);
    assert!(reply.body["fast_similarity"].is_f64());
    assert!(reply.body["accurate_similarity"].is_f64());
}

#[tokio::test]
async fn test_compare_on_one_tier_omits_the_others() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let client = TestClient::new(server.url());
    let reply = client
        .post_json(
            "/v2/embed/compare",
            &json!({ "text_a": "one", "text_b": "two", "tier": "fast" }),
        )
        .await
        .expect("request should succeed");

    assert_eq!(reply.status, 200);
    assert!(reply.body["fast_similarity"].is_f64());
    assert!(reply.body.get("accurate_similarity").is_none());
    assert!(reply.body.get("combined_similarity").is_none());
}

#[tokio::test]
async fn test_malformed_json_is_a_client_error() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let response = reqwest::Client::new()
        .post(format!("{}/v2/embed", server.url()))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .expect("request should complete");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_concurrent_requests_all_succeed() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("server should start");

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let client = TestClient::new(server.url());
            tokio::spawn(async move {
                client
                    .post_json("/v2/embed", &json!({ "text": format!("concurrent text {}", i) }))
                    .await
            })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    for (i, result) in results.into_iter().enumerate() {
        let reply = result
            .expect("task should not panic")
            .expect("request should succeed");
        assert_eq!(reply.status, 200, "request {} should return 200", i);
    }
}
