// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 在进程启动时构建一次，之后以 `Arc<Settings>` 的形式注入到各个组件
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// SerpApi 配置
    pub serpapi: SerpApiSettings,
    /// 跨域配置
    pub cors: CorsSettings,
    /// 输入长度限制
    pub limits: LimitSettings,
    /// reCAPTCHA 配置
    pub recaptcha: RecaptchaSettings,
    /// 调试模式，降低默认日志级别
    pub debug: bool,
    /// 以 JSON 格式输出日志
    pub log_json: bool,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// SerpApi 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SerpApiSettings {
    /// API 密钥
    pub api_key: String,
    /// 搜索引擎 (google)
    pub engine: String,
    /// 搜索地理位置
    pub location: String,
    /// 每次查询最多获取的自然结果数 (1..=100)
    pub max_results: u32,
    /// 每次请求的结果数
    pub page_size: u32,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
    /// API 地址
    pub base_url: String,
    /// 国家代码
    pub gl: String,
    /// 界面语言
    pub hl: String,
    /// Google 域名
    pub google_domain: String,
}

/// 跨域配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// 允许的来源列表
    pub allowed_origins: Vec<String>,
}

/// 输入限制配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LimitSettings {
    /// 关键词最大长度（字符）
    pub max_keyword_length: usize,
    /// 域名最大长度（字符）
    pub max_domain_length: usize,
}

/// reCAPTCHA 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RecaptchaSettings {
    /// 服务端密钥，未配置时跳过校验
    pub secret_key: Option<String>,
    /// 校验地址
    pub verify_url: String,
    /// 校验请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 加载顺序：默认值 -> `config/default` -> `config/{APP_ENVIRONMENT}` -> `SERPTRACK__*` 环境变量。
    /// `PORT` 环境变量会覆盖 `server.port`。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::builder_with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("SERPTRACK")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            // Hosting platforms hand out the listening port through PORT
            .set_override_option("server.port", std::env::var("PORT").ok())?;

        builder.build()?.try_deserialize()
    }

    /// 仅使用内置默认值构建配置，不读取配置文件和前缀环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder_with_defaults()?.build()?.try_deserialize()
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // A bare SERPAPI_KEY is honoured as the lowest-precedence key source
            .set_default(
                "serpapi.api_key",
                std::env::var("SERPAPI_KEY").unwrap_or_default(),
            )?
            .set_default("serpapi.engine", "google")?
            .set_default("serpapi.location", "United States")?
            .set_default("serpapi.max_results", 100)?
            .set_default("serpapi.page_size", 100)?
            .set_default("serpapi.timeout_secs", 20)?
            .set_default("serpapi.base_url", "https://serpapi.com/search")?
            .set_default("serpapi.gl", "us")?
            .set_default("serpapi.hl", "en")?
            .set_default("serpapi.google_domain", "google.com")?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("limits.max_keyword_length", 200)?
            .set_default("limits.max_domain_length", 100)?
            .set_default(
                "recaptcha.verify_url",
                "https://www.google.com/recaptcha/api/siteverify",
            )?
            .set_default("recaptcha.timeout_secs", 10)?
            .set_default("debug", false)?
            .set_default("log_json", false)
    }

    /// 校验配置
    ///
    /// 缺少 API 密钥或数值越界时立即失败
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serpapi.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "serpapi.api_key is required. Set SERPTRACK__SERPAPI__API_KEY or SERPAPI_KEY"
                    .to_string(),
            ));
        }
        if !(1..=100).contains(&self.serpapi.max_results) {
            return Err(ConfigError::Message(format!(
                "serpapi.max_results must be between 1 and 100, got {}",
                self.serpapi.max_results
            )));
        }
        if !(1..=100).contains(&self.serpapi.page_size) {
            return Err(ConfigError::Message(format!(
                "serpapi.page_size must be between 1 and 100, got {}",
                self.serpapi.page_size
            )));
        }
        if self.serpapi.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "serpapi.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.limits.max_keyword_length == 0 || self.limits.max_domain_length == 0 {
            return Err(ConfigError::Message(
                "limits must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 是否配置了 reCAPTCHA 密钥
    pub fn recaptcha_enabled(&self) -> bool {
        self.recaptcha
            .secret_key
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}
