//! 客户端配置
//!
//! 后端地址在构建时注入（`MYNDFULL_BACKEND_URL`），未设置时使用本地开发地址。

/// 默认后端地址
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 不带结尾斜杠的后端地址
    pub backend_url: String,
}

impl ClientConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        let url = backend_url.into();
        let trimmed = url.trim().trim_end_matches('/');
        let backend_url = if trimmed.is_empty() {
            DEFAULT_BACKEND_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { backend_url }
    }

    /// 读取构建期环境变量
    pub fn from_build_env() -> Self {
        Self::new(option_env!("MYNDFULL_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_removed() {
        let cfg = ClientConfig::new("https://api.myndfull.app//");
        assert_eq!(cfg.backend_url, "https://api.myndfull.app");
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        assert_eq!(ClientConfig::new("  ").backend_url, DEFAULT_BACKEND_URL);
    }
}
