// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 拆分后的住址：都道府县 + 其余部分
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAddress {
    pub region: Option<String>,
    pub remainder: Option<String>,
}

impl ParsedAddress {
    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.remainder.is_none()
    }
}
