// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 结果 ID 生成与日志初始化
pub mod id;
pub mod telemetry;
