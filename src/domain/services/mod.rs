// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod address_parser;
pub mod enterprise_search_service;
pub mod entity_extractor;
pub mod quota_service;
pub mod search_service;
