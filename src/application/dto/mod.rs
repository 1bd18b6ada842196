// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义 API 请求体与统一响应包
pub mod api_response;
pub mod check_serp_request;
