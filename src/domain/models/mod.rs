// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 住址（address）：都道府县与其余部分拆分后的住址
/// - 企业检索（enterprise）：语义检索路径的请求、结果与来源分类
/// - 配额（quota）：按日计数的检索与提供方调用配额
/// - 搜索结果（search_result）：归一化后的人物检索命中与聚合响应
pub mod address;
pub mod enterprise;
pub mod quota;
pub mod search_result;
