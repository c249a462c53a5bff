// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 聚合器配合真实适配器（上游由 wiremock 模拟）的端到端检索场景

use super::helpers::tracker;
use kensaku::domain::search::engine::SearchProvider;
use kensaku::domain::services::entity_extractor::EntityExtractor;
use kensaku::domain::services::search_service::{SearchService, SearchServiceError};
use kensaku::infrastructure::search::duckduckgo::DuckDuckGoSearchEngine;
use kensaku::infrastructure::search::google::GoogleSearchEngine;
use kensaku::infrastructure::search::http::build_client;
use kensaku::infrastructure::search::serper::SerperSearchEngine;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> Client {
    build_client(Duration::from_secs(5)).unwrap()
}

fn google(server: &MockServer) -> Arc<dyn SearchProvider> {
    Arc::new(GoogleSearchEngine::new(
        http(),
        "key",
        "cx",
        format!("{}/customsearch/v1", server.uri()),
        EntityExtractor::default(),
    ))
}

fn serper(server: &MockServer) -> Arc<dyn SearchProvider> {
    Arc::new(SerperSearchEngine::new(
        http(),
        "serper-key",
        format!("{}/search", server.uri()),
        EntityExtractor::default(),
    ))
}

async fn mount_google(server: &MockServer, items: serde_json::Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchInformation": {"totalResults": "57"},
            "items": items
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_serper(server: &MockServer, organic: serde_json::Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "organic": organic })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn exclusion_keyword_removes_matching_results() {
    let server = MockServer::start().await;
    mount_google(
        &server,
        json!([
            {"title": "田中太郎", "link": "https://a.jp/1", "snippet": "東京都渋谷区の株式会社サンプル"},
            {"title": "田中太郎", "link": "https://b.jp/2", "snippet": "大阪府の未来商事株式会社"}
        ]),
        1,
    )
    .await;

    let service = SearchService::new(vec![google(&server)], None, tracker(100, 100));
    let response = service
        .search_person_at("田中太郎", Some("東京都渋谷区1-2-3"), vec!["東京都".into()], 0)
        .await
        .unwrap();

    assert!(!response.fallback);
    assert_eq!(response.results.len(), 1);
    assert_eq!(
        response.results[0].destination_link.as_deref(),
        Some("https://b.jp/2")
    );
    assert_eq!(response.excluded_count, 1);
    assert!(response
        .results
        .iter()
        .all(|r| !r.snippet.contains("東京都")));
}

#[tokio::test]
async fn identical_links_are_merged_in_provider_order() {
    let server = MockServer::start().await;
    mount_google(
        &server,
        json!([{"title": "Google版", "link": "https://same.jp/profile", "snippet": "google"}]),
        1,
    )
    .await;
    mount_serper(
        &server,
        json!([
            {"title": "Serper版", "link": "https://same.jp/profile", "snippet": "serper"},
            {"title": "別ページ", "link": "https://other.jp/", "snippet": "serper"}
        ]),
        1,
    )
    .await;

    let service = SearchService::new(
        vec![google(&server), serper(&server)],
        None,
        tracker(100, 100),
    );
    let response = service
        .search_person_at("田中太郎", None, Vec::new(), 0)
        .await
        .unwrap();

    let same: Vec<_> = response
        .results
        .iter()
        .filter(|r| r.destination_link.as_deref() == Some("https://same.jp/profile"))
        .collect();
    assert_eq!(same.len(), 1);
    assert_eq!(same[0].provider, "google");
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.total_results, 57);

    let usage = service.quota().usage().await.unwrap();
    assert_eq!(usage.used_searches, 1);
    assert_eq!(usage.provider_calls, 2);
}

#[tokio::test]
async fn failing_provider_does_not_sink_the_others() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_serper(
        &server,
        json!([{"title": "田中太郎", "link": "https://ok.jp/", "snippet": "ok"}]),
        1,
    )
    .await;

    let service = SearchService::new(
        vec![google(&server), serper(&server)],
        None,
        tracker(100, 100),
    );
    let response = service
        .search_person_at("田中太郎", None, Vec::new(), 0)
        .await
        .unwrap();

    assert!(!response.fallback);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].provider, "serper");
}

#[tokio::test]
async fn overlong_name_makes_no_calls() {
    let server = MockServer::start().await;
    mount_google(&server, json!([]), 0).await;

    let quota = tracker(100, 100);
    let service = SearchService::new(vec![google(&server)], None, quota.clone());
    let err = service
        .search_person_at(&"名".repeat(51), None, Vec::new(), 0)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchServiceError::ValidationError(_)));
    let usage = quota.usage().await.unwrap();
    assert_eq!(usage.used_searches, 0);
    assert_eq!(usage.provider_calls, 0);
}

#[tokio::test]
async fn provider_call_ceiling_blocks_dispatch() {
    let server = MockServer::start().await;
    mount_google(&server, json!([]), 0).await;

    let service = SearchService::new(vec![google(&server)], None, tracker(100, 0));
    let response = service
        .search_person_at("田中太郎", None, Vec::new(), 0)
        .await
        .unwrap();

    assert!(response.limit_reached);
    assert!(response.results.is_empty());
    assert_eq!(response.total_results, 0);
}

#[tokio::test]
async fn duckduckgo_covers_when_nothing_is_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Heading": "田中太郎",
            "AbstractText": "株式会社サンプル 代表取締役",
            "AbstractURL": "https://ja.wikipedia.org/wiki/tanaka"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fallback: Arc<dyn SearchProvider> = Arc::new(DuckDuckGoSearchEngine::new(
        http(),
        format!("{}/", server.uri()),
        EntityExtractor::default(),
    ));
    let service = SearchService::new(Vec::new(), Some(fallback), tracker(100, 100));
    let response = service
        .search_person_at("田中太郎", None, Vec::new(), 0)
        .await
        .unwrap();

    assert!(!response.fallback);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].provider, "duckduckgo");
}

#[tokio::test]
async fn empty_google_page_does_not_zero_the_total() {
    let server = MockServer::start().await;
    mount_google(&server, json!([]), 1).await;
    mount_serper(
        &server,
        json!([
            {"title": "田中太郎", "link": "https://one.jp/", "snippet": "株式会社サンプル"},
            {"title": "田中太郎", "link": "https://two.jp/", "snippet": "未来商事株式会社"}
        ]),
        1,
    )
    .await;

    let service = SearchService::new(
        vec![google(&server), serper(&server)],
        None,
        tracker(100, 100),
    );
    let response = service
        .search_person_at("田中太郎", None, Vec::new(), 0)
        .await
        .unwrap();

    assert!(!response.fallback);
    assert_eq!(response.results.len(), 2);
    assert!(response.results.iter().all(|r| r.provider == "serper"));
    assert!(response.results.len() as u64 <= response.total_results);
}

#[tokio::test]
async fn out_of_range_page_makes_no_calls() {
    let server = MockServer::start().await;
    mount_google(&server, json!([]), 0).await;

    let quota = tracker(100, 100);
    let service = SearchService::new(vec![google(&server)], None, quota.clone());
    let err = service
        .search_person_at("田中太郎", None, Vec::new(), u32::MAX)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchServiceError::ValidationError(_)));
    assert_eq!(quota.usage().await.unwrap().provider_calls, 0);
}
