// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 排名查询（rank_query）：经过校验的关键词与域名
/// - 排名结果（rank_result）：单个及批量关键词的排名结果
/// - 搜索结果（search_result）：提供方返回的自然搜索条目
pub mod rank_query;
pub mod rank_result;
pub mod search_result;
