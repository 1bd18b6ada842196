// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 排名服务（rank_service）：查询自然搜索结果并定位目标域名的排名
/// - 人机验证（captcha_service）：校验客户端提交的验证令牌
pub mod captcha_service;
pub mod rank_service;
