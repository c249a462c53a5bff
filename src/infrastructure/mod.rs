// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含与外部系统交互的具体实现：
/// - 配额（quota）：配额仓库接口的内存与 JSON 文件实现
/// - 检索（search）：各检索提供方的 HTTP 客户端与装配工厂
///
/// 基础设施层依赖领域层的抽象接口，领域层不感知这些实现。
pub mod quota;
pub mod search;
