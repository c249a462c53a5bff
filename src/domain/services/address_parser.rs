// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::address::ParsedAddress;

/// 47 个都道府县，按列表顺序做前缀匹配
pub const PREFECTURES: [&str; 47] = [
    "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県", "茨城県", "栃木県",
    "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県", "新潟県", "富山県", "石川県", "福井県",
    "山梨県", "長野県", "岐阜県", "静岡県", "愛知県", "三重県", "滋賀県", "京都府", "大阪府",
    "兵庫県", "奈良県", "和歌山県", "鳥取県", "島根県", "岡山県", "広島県", "山口県", "徳島県",
    "香川県", "愛媛県", "高知県", "福岡県", "佐賀県", "長崎県", "熊本県", "大分県", "宮崎県",
    "鹿児島県", "沖縄県",
];

/// 把住址拆为都道府县与其余部分
///
/// 空白输入返回两个字段都为空的结果；未识别到都道府县时，
/// 整个去除首尾空白后的输入作为 remainder。
pub fn parse_address(address: &str) -> ParsedAddress {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return ParsedAddress::default();
    }

    match PREFECTURES.iter().find(|p| trimmed.starts_with(**p)) {
        Some(prefecture) => {
            let remainder = trimmed[prefecture.len()..].trim();
            ParsedAddress {
                region: Some(prefecture.to_string()),
                remainder: if remainder.is_empty() {
                    None
                } else {
                    Some(remainder.to_string())
                },
            }
        }
        None => ParsedAddress {
            region: None,
            remainder: Some(trimmed.to_string()),
        },
    }
}
