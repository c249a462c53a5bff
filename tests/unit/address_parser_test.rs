// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use kensaku::application::dto::search_request::PersonSearchRequestDto;
use kensaku::domain::services::address_parser::{parse_address, PREFECTURES};

#[test]
fn test_every_prefecture_is_recognised() {
    for prefecture in PREFECTURES {
        let parsed = parse_address(&format!("{}中央1-1", prefecture));
        assert_eq!(parsed.region.as_deref(), Some(prefecture));
        assert_eq!(parsed.remainder.as_deref(), Some("中央1-1"));
    }
}

#[test]
fn test_address_flows_into_query_string() {
    let dto: PersonSearchRequestDto = serde_json::from_str(
        r#"{"name":"田中太郎","address":"  神奈川県横浜市西区 ","excludeKeywords":["求人"]}"#,
    )
    .unwrap();
    let query = dto.into_query();
    assert_eq!(
        query.to_query_string(),
        "\"田中太郎\" \"神奈川県\" \"横浜市西区\" -\"求人\""
    );
}

#[test]
fn test_unknown_region_keeps_whole_address() {
    let parsed = parse_address("Springfield 742");
    assert_eq!(parsed.region, None);
    assert_eq!(parsed.remainder.as_deref(), Some("Springfield 742"));
}
