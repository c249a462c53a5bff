// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use kensaku::domain::search::engine::{SearchError, SearchProvider};
use kensaku::domain::search::query::SearchQuery;
use kensaku::domain::services::entity_extractor::EntityExtractor;
use kensaku::infrastructure::search::google::GoogleSearchEngine;
use kensaku::infrastructure::search::http::build_client;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine(server: &MockServer) -> GoogleSearchEngine {
    GoogleSearchEngine::new(
        build_client(Duration::from_secs(5)).unwrap(),
        "test-key",
        "test-cx",
        format!("{}/customsearch/v1", server.uri()),
        EntityExtractor::default(),
    )
}

#[tokio::test]
async fn google_sends_quoted_query_and_page_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("q", "\"田中太郎\" \"東京都\" -\"求人\""))
        .and(query_param("num", "10"))
        .and(query_param("start", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchInformation": {"totalResults": "1234"},
            "queries": {"nextPage": [{"startIndex": 21}]},
            "items": [{
                "title": "田中太郎 | 株式会社サンプル",
                "link": "https://www.sample.co.jp/team",
                "displayLink": "www.sample.co.jp",
                "snippet": "代表取締役 田中太郎。電話 03-1234-5678",
                "pagemap": {
                    "organization": [{"name": "株式会社サンプル", "address": "東京都千代田区丸の内1-1-1"}],
                    "person": [{"jobtitle": "代表取締役社長"}]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = SearchQuery::new("田中太郎")
        .with_region("東京都")
        .excluding(["求人"])
        .page(1);
    let page = engine(&server).search(&query).await.unwrap();

    assert_eq!(page.total_results, Some(1234));
    assert_eq!(page.has_next_page, Some(true));
    assert_eq!(page.results.len(), 1);

    let result = &page.results[0];
    assert_eq!(result.provider, "google");
    assert_eq!(result.source, "www.sample.co.jp");
    assert_eq!(result.organization.as_deref(), Some("株式会社サンプル"));
    assert_eq!(result.job_title.as_deref(), Some("代表取締役社長"));
    assert_eq!(
        result.postal_address.as_deref(),
        Some("東京都千代田区丸の内1-1-1")
    );
    assert_eq!(result.phone.as_deref(), Some("03-1234-5678"));
    assert_eq!(
        result.destination_link.as_deref(),
        Some("https://www.sample.co.jp/team")
    );
}

#[tokio::test]
async fn google_without_items_reports_no_next_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"searchInformation": {"totalResults": "0"}})),
        )
        .mount(&server)
        .await;

    let page = engine(&server)
        .search(&SearchQuery::new("田中太郎"))
        .await
        .unwrap();
    assert!(page.results.is_empty());
    assert_eq!(page.total_results, Some(0));
    assert_eq!(page.has_next_page, Some(false));
}

#[tokio::test]
async fn google_http_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let err = engine(&server)
        .search(&SearchQuery::new("田中太郎"))
        .await
        .unwrap_err();
    match err {
        SearchError::HttpStatus { provider, status } => {
            assert_eq!(provider, "google");
            assert_eq!(status, 403);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
