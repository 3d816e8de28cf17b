use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// 收据照片 base64 后通常超过 axum 默认的 2MB
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// 未设置或为空字符串 => 服务处于未配置状态
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    /// 有效的 API key (过滤空字符串)
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

// 日志里不能打印密钥
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
            gemini: GeminiConfig {
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置 (可选 scan.toml 作为底层)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(|name| std::env::var(name).ok())
    }

    /// 默认值 -> scan.toml -> 环境变量, 后者覆盖前者
    fn build<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.max_body_bytes", defaults.server.max_body_bytes as i64)?
            .set_default("gemini.model", defaults.gemini.model)?
            .set_default("gemini.base_url", defaults.gemini.base_url)?
            .add_source(File::with_name("scan").required(false))
            .set_override_option("server.host", env("SERVER_HOST"))?
            .set_override_option("server.port", env("SERVER_PORT"))?
            .set_override_option("server.max_body_bytes", env("MAX_BODY_BYTES"))?
            .set_override_option("gemini.api_key", env("API_KEY"))?
            .set_override_option("gemini.model", env("GEMINI_MODEL"))?
            .set_override_option("gemini.base_url", env("GEMINI_BASE_URL"))?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn build_with(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::build(|name| vars.get(name).cloned()).expect("config should build")
    }

    #[test]
    fn defaults_without_env() {
        let config = build_with(&[]);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert!(config.gemini.api_key().is_none());
    }

    #[test]
    fn env_overrides_defaults() {
        let config = build_with(&[
            ("SERVER_PORT", "3000"),
            ("API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-test"),
        ]);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.gemini.api_key(), Some("secret"));
        assert_eq!(config.gemini.model, "gemini-test");
    }

    #[test]
    fn blank_api_key_is_unconfigured() {
        let config = build_with(&[("API_KEY", "   ")]);
        assert!(config.gemini.api_key().is_none());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = build_with(&[("API_KEY", "super-secret")]);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
