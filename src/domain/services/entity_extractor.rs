// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::ExtractedFields;
use crate::domain::services::address_parser::PREFECTURES;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// 可抽取的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityField {
    Organization,
    JobTitle,
    PostalAddress,
    Phone,
    Email,
}

/// 公司名：株式会社 / 有限会社 前后缀及常见的法人、集团后缀，按优先级排列
pub const ORGANIZATION_PATTERNS: &[&str] = &[
    r"株式会社[^、。\s]+",
    r"[^、。\s]+株式会社",
    r"有限会社[^、。\s]+",
    r"[^、。\s]+有限会社",
    r"[^、。\s]+会社",
    r"[^、。\s]+法人",
    r"[^、。\s]+グループ",
    r"[^、。\s]+コーポレーション",
    r"[^、。\s]+企業",
];

pub const JOB_TITLE_PATTERNS: &[&str] = &[
    r"代表取締役[^、。\s]*",
    r"取締役[^、。\s]*",
    r"社長",
    r"部長",
    r"課長",
    r"主任",
    r"係長",
    r"マネージャー",
    r"ディレクター",
    r"執行役員",
    r"常務",
    r"専務",
    r"(?i)cto|ceo|coo|cfo",
];

pub const PHONE_PATTERNS: &[&str] = &[r"\d{2,4}-\d{2,4}-\d{4}"];

pub const EMAIL_PATTERNS: &[&str] = &[r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"];

fn address_patterns() -> Vec<String> {
    vec![
        r"[^、。\s]*[都道府県][^、。\s]*市[^、。\s]*".to_string(),
        format!(r"(?:{})[^、。\s]*", PREFECTURES.join("|")),
        r"〒\d{3}-\d{4}[^、。\s]*".to_string(),
    ]
}

/// 按字段分组、按优先级排序的正则表
#[derive(Debug, Clone)]
pub struct PatternTable {
    organization: Vec<Regex>,
    job_title: Vec<Regex>,
    postal_address: Vec<Regex>,
    phone: Vec<Regex>,
    email: Vec<Regex>,
}

fn compile_all<S: AsRef<str>>(sources: &[S]) -> Result<Vec<Regex>, regex::Error> {
    sources.iter().map(|s| Regex::new(s.as_ref())).collect()
}

impl PatternTable {
    pub fn compile<S: AsRef<str>>(
        organization: &[S],
        job_title: &[S],
        postal_address: &[S],
        phone: &[S],
        email: &[S],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            organization: compile_all(organization)?,
            job_title: compile_all(job_title)?,
            postal_address: compile_all(postal_address)?,
            phone: compile_all(phone)?,
            email: compile_all(email)?,
        })
    }

    /// 内置的日文表
    pub fn japanese() -> Self {
        DEFAULT_TABLE.clone()
    }

    pub fn patterns(&self, field: EntityField) -> &[Regex] {
        match field {
            EntityField::Organization => &self.organization,
            EntityField::JobTitle => &self.job_title,
            EntityField::PostalAddress => &self.postal_address,
            EntityField::Phone => &self.phone,
            EntityField::Email => &self.email,
        }
    }

    /// 依次尝试该字段的正则，第一个命中者胜出
    pub fn first_match(&self, field: EntityField, text: &str) -> Option<String> {
        self.patterns(field)
            .iter()
            .find_map(|re| re.find(text))
            .map(|m| m.as_str().to_string())
    }
}

static DEFAULT_TABLE: Lazy<PatternTable> = Lazy::new(|| {
    let to_owned = |s: &[&str]| s.iter().map(|p| p.to_string()).collect::<Vec<_>>();
    PatternTable::compile(
        &to_owned(ORGANIZATION_PATTERNS),
        &to_owned(JOB_TITLE_PATTERNS),
        &address_patterns(),
        &to_owned(PHONE_PATTERNS),
        &to_owned(EMAIL_PATTERNS),
    )
    .expect("built-in extraction patterns must compile")
});

/// 基于正则的实体抽取器
///
/// 结构化提示优先；没有提示的字段才在小写化后的文本上跑正则。
/// 属于尽力而为的启发式，误报漏报都是预期内的。
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    table: Arc<PatternTable>,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new(PatternTable::japanese())
    }
}

impl EntityExtractor {
    pub fn new(table: PatternTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn extract(&self, raw_text: &str, hints: ExtractedFields) -> ExtractedFields {
        let text = raw_text.to_lowercase();
        let pick = |hint: Option<String>, field: EntityField| {
            hint.map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .or_else(|| self.table.first_match(field, &text))
        };

        ExtractedFields {
            organization: pick(hints.organization, EntityField::Organization),
            job_title: pick(hints.job_title, EntityField::JobTitle),
            postal_address: pick(hints.postal_address, EntityField::PostalAddress),
            phone: pick(hints.phone, EntityField::Phone),
            email: pick(hints.email, EntityField::Email),
        }
    }

    /// 标题与摘要拼接后抽取
    pub fn extract_from(&self, title: &str, snippet: &str, hints: ExtractedFields) -> ExtractedFields {
        self.extract(&format!("{} {}", title, snippet), hints)
    }
}
