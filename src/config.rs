//! 配置加载
//!
//! 配置来源优先级：环境变量 > 配置文件 (~/.relaycast/config.yaml) > 内置默认值。
//! 上游地址在启动时读入后通过构造参数注入各组件，运行期不再变化。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 默认上游地址
const DEFAULT_UPSTREAM_URL: &str = "https://api-preview.chatgot.io";

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
}

/// 监听配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// 上游配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 默认配置文件路径: ~/.relaycast/config.yaml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".relaycast")
            .join("config.yaml")
    }

    /// 加载配置
    ///
    /// 文件不存在或解析失败时退回默认值，环境变量最后覆盖。
    pub fn load() -> Self {
        let mut config = Self::from_file(&Self::config_path()).unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    /// 从指定文件加载
    pub fn from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_yaml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("[CONFIG] 配置文件解析失败，使用默认配置: {}", e);
                None
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("RELAYCAST_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("RELAYCAST_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("[CONFIG] RELAYCAST_PORT 不是合法端口: {}", port),
            }
        }
        if let Ok(url) = std::env::var("RELAYCAST_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        if let Ok(level) = std::env::var("RELAYCAST_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
