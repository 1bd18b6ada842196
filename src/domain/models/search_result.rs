// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 自然搜索结果条目
///
/// `position` 从 1 开始，序列顺序即排名顺序
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResultItem {
    pub position: u32,
    pub title: String,
    #[serde(rename = "link")]
    pub url: String,
    pub snippet: String,
    pub displayed_link: String,
}

impl SearchResultItem {
    pub fn new(position: u32, title: String, url: String, snippet: String) -> Self {
        Self {
            position,
            title,
            url,
            snippet,
            displayed_link: String::new(),
        }
    }

    pub fn with_displayed_link(mut self, displayed_link: String) -> Self {
        self.displayed_link = displayed_link;
        self
    }
}
