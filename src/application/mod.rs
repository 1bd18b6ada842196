// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 负责请求数据的转换与用例编排，业务规则留在领域层
pub mod dto;
pub mod use_cases;
