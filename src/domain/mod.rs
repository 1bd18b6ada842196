// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：核心业务实体和数据结构
/// - 搜索（search）：搜索结果提供方接口
/// - 服务（services）：排名解析和人机验证
pub mod models;
pub mod search;
pub mod services;
