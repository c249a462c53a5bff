// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, create_test_app_with_settings, result, tracker, FakeProvider};
use async_trait::async_trait;
use axum::http::StatusCode;
use kensaku::config::settings::Settings;
use kensaku::domain::models::search_result::ProviderPage;
use kensaku::domain::search::engine::{SearchError, SearchProvider};
use kensaku::domain::search::semantic::{SemanticHit, SemanticRequest, SemanticSearch};
use serde_json::{json, Value};
use std::sync::Arc;

struct FixedSemantic(Vec<SemanticHit>);

#[async_trait]
impl SemanticSearch for FixedSemantic {
    async fn search_semantic(
        &self,
        _request: &SemanticRequest,
    ) -> Result<Vec<SemanticHit>, SearchError> {
        Ok(self.0.clone())
    }
}

fn semantic_hit(uri: &str, score: f64, data: Value) -> SemanticHit {
    SemanticHit {
        uri: Some(uri.to_string()),
        struct_data: data.as_object().cloned().unwrap_or_default(),
        relevance_score: Some(score),
        ..Default::default()
    }
}

/// 健康检查测试
#[tokio::test]
async fn health_check_works() {
    let app = create_test_app(Vec::new(), None, None, tracker(100, 100));
    let response = app.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn search_without_providers_returns_placeholders() {
    let app = create_test_app(Vec::new(), None, None, tracker(100, 100));

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({"name": "田中太郎", "address": "東京都渋谷区1-2-3"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["fallback"], true);
    assert_eq!(body["limitReached"], false);
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
    assert_eq!(body["totalResults"], 3);
    assert_eq!(body["results"][0]["source"], "placeholder");
}

#[tokio::test]
async fn search_merges_provider_results() {
    let google = FakeProvider::returning(
        "google",
        vec![result("google", "https://a.jp/1", "株式会社サンプル 代表取締役")],
    );
    let serper = FakeProvider::returning(
        "serper",
        vec![
            result("serper", "https://a.jp/1", "重複"),
            result("serper", "https://b.jp/2", "テクノロジー株式会社"),
        ],
    );
    let app = create_test_app(
        vec![google.clone() as Arc<dyn SearchProvider>, serper.clone()],
        None,
        None,
        tracker(100, 100),
    );

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({"name": "田中太郎", "page": 1}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let links: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["destinationLink"].as_str().unwrap())
        .collect();
    assert_eq!(links, vec!["https://a.jp/1", "https://b.jp/2"]);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["fallback"], false);
    assert_eq!(google.last_query().unwrap().page, 1);
}

#[tokio::test]
async fn failing_provider_is_isolated() {
    let google = FakeProvider::failing("google");
    let vertex = FakeProvider::with_page(
        "vertex",
        ProviderPage {
            results: vec![result("vertex", "https://c.jp/3", "営業部長")],
            total_results: Some(40),
            has_next_page: Some(true),
        },
    );
    let app = create_test_app(
        vec![google.clone() as Arc<dyn SearchProvider>, vertex.clone()],
        None,
        None,
        tracker(100, 100),
    );

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({"name": "田中太郎"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["totalResults"], 40);
    assert_eq!(body["hasNextPage"], true);
    assert_eq!(google.calls(), 1);
    assert_eq!(vertex.calls(), 1);

    let usage = app.quota.usage().await.unwrap();
    assert_eq!(usage.provider_calls, 2);
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let app = create_test_app(Vec::new(), None, None, tracker(100, 100));

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({"name": ""}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());

    let usage: Value = app.server.get("/v1/quota").await.json();
    assert_eq!(usage["usedSearches"], 0);
}

#[tokio::test]
async fn overlong_name_is_rejected() {
    let app = create_test_app(Vec::new(), None, None, tracker(100, 100));

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({"name": "あ".repeat(51)}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn padded_name_is_measured_after_trimming() {
    let app = create_test_app(Vec::new(), None, None, tracker(100, 100));

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({"name": format!("  {}  ", "田".repeat(48))}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["results"][0]["name"], "田".repeat(48));
}

#[tokio::test]
async fn configured_name_ceiling_applies_over_http() {
    let settings = Settings::from_toml("[search]\nmax_name_length = 80").unwrap();
    let app = create_test_app_with_settings(Vec::new(), None, None, tracker(100, 100), settings);

    let accepted = app
        .server
        .post("/v1/search")
        .json(&json!({"name": "あ".repeat(60)}))
        .await;
    accepted.assert_status_ok();

    let rejected = app
        .server
        .post("/v1/search")
        .json(&json!({"name": "あ".repeat(81)}))
        .await;
    rejected.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exhausted_quota_reports_limit_reached() {
    let google = FakeProvider::returning("google", vec![result("google", "https://a.jp/1", "x")]);
    let app = create_test_app(
        vec![google.clone() as Arc<dyn SearchProvider>],
        None,
        None,
        tracker(0, 100),
    );

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({"name": "田中太郎"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["limitReached"], true);
    assert!(body["results"].as_array().unwrap().is_empty());
    assert_eq!(google.calls(), 0);
}

#[tokio::test]
async fn quota_usage_and_reset() {
    let app = create_test_app(Vec::new(), None, None, tracker(10, 100));

    app.server
        .post("/v1/search")
        .json(&json!({"name": "田中太郎"}))
        .await
        .assert_status_ok();

    let usage: Value = app.server.get("/v1/quota").await.json();
    assert_eq!(usage["usedSearches"], 1);
    assert_eq!(usage["remainingSearches"], 9);
    assert_eq!(usage["canSearch"], true);

    let reset = app.server.post("/v1/quota/reset").await;
    reset.assert_status_ok();
    let usage: Value = reset.json();
    assert_eq!(usage["usedSearches"], 0);
    assert_eq!(usage["providerCalls"], 0);
}

#[tokio::test]
async fn providers_report_missing_credentials() {
    let app = create_test_app(Vec::new(), None, None, tracker(100, 100));

    let body: Value = app.server.get("/v1/providers").await.json();
    assert_eq!(body["fallbackOnly"], true);

    let providers = body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 4);
    assert_eq!(providers[0]["name"], "google");
    assert_eq!(providers[0]["configured"], false);
    assert_eq!(providers[2]["name"], "duckduckgo");
    assert_eq!(providers[2]["configured"], true);
}

#[tokio::test]
async fn enterprise_search_without_backend_is_unavailable() {
    let app = create_test_app(Vec::new(), None, None, tracker(100, 100));

    let response = app
        .server
        .post("/v1/enterprise-search")
        .json(&json!({"personName": "田中太郎", "personAddress": "東京都渋谷区"}))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn enterprise_search_ranks_results() {
    let backend = FixedSemantic(vec![
        semantic_hit(
            "https://www.sample.co.jp/about",
            65.0,
            json!({"company_name": "株式会社サンプル", "phone": "03-1234-5678"}),
        ),
        semantic_hit(
            "https://www.linkedin.com/in/tanaka",
            90.0,
            json!({"company_name": "テクノロジー株式会社"}),
        ),
        semantic_hit("https://blog.example.com/post", 30.0, json!({"company_name": "低信頼"})),
    ]);
    let app = create_test_app(Vec::new(), None, Some(Arc::new(backend)), tracker(100, 100));

    let response = app
        .server
        .post("/v1/enterprise-search")
        .json(&json!({
            "personName": "田中太郎",
            "personAddress": "東京都渋谷区",
            "searchPrecision": "standard"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["query"], "田中太郎 東京都渋谷区");
    assert_eq!(body["results"][0]["companyName"], "株式会社サンプル");
    assert_eq!(body["results"][1]["companyName"], "テクノロジー株式会社");

    let usage: Value = app.server.get("/v1/quota").await.json();
    assert_eq!(usage["providerCalls"], 1);
    assert_eq!(usage["usedSearches"], 0);
}

#[tokio::test]
async fn enterprise_search_requires_address() {
    let backend = FixedSemantic(Vec::new());
    let app = create_test_app(Vec::new(), None, Some(Arc::new(backend)), tracker(100, 100));

    let response = app
        .server
        .post("/v1/enterprise-search")
        .json(&json!({"personName": "田中太郎", "personAddress": ""}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
