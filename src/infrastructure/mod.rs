// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 提供领域接口的具体实现以及与外部系统的交互：
/// - 人机验证（captcha）：Google reCAPTCHA 校验
/// - 可观测性（observability）：Prometheus 指标
/// - 搜索（search）：SerpApi 自然搜索结果提供方
pub mod captcha;
pub mod observability;
pub mod search;
