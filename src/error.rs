use thiserror::Error;

// =========================================================
// 错误分类
// =========================================================

/// 界面层关心的错误类别
///
/// 决定页面如何反应：跳转登录、显示提示，或在本地拦下提交。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// 跳转到登录页并重置页面状态
    Unauthorized,
    /// 页面内可关闭的提示，保留用户输入
    NetworkOrServer,
    /// 客户端校验失败，不发出请求
    Validation,
}

// =========================================================
// 核心错误类型
// =========================================================

/// 同一次会话探测的结果会克隆给所有等待方
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized(Option<String>),
    #[error("{0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to build request: {0}")]
    Build(String),
    #[error("server responded with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ClientError::Unauthorized(_) => ErrorClass::Unauthorized,
            ClientError::Validation(_) => ErrorClass::Validation,
            ClientError::Network(_)
            | ClientError::Build(_)
            | ClientError::Server { .. }
            | ClientError::Decode(_) => ErrorClass::NetworkOrServer,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.class() == ErrorClass::Unauthorized
    }

    /// 面向用户的提示
    ///
    /// 优先使用后端返回的 message，其次使用页面给出的通用提示。
    pub fn user_message(&self, fallback: &str) -> String {
        let server_message = match self {
            ClientError::Validation(message) => return message.clone(),
            ClientError::Unauthorized(message) | ClientError::Server { message, .. } => {
                message.as_deref()
            }
            _ => None,
        };
        match server_message {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => fallback.to_string(),
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ClientError::Server {
            status: 400,
            message: Some("Mood is required".into()),
        };
        assert_eq!(err.user_message("Failed to save mood entry"), "Mood is required");
        assert_eq!(err.class(), ErrorClass::NetworkOrServer);
    }

    #[test]
    fn network_errors_use_fallback() {
        let err = ClientError::Network("connection reset".into());
        assert_eq!(err.user_message("Failed to create post"), "Failed to create post");
    }

    #[test]
    fn unauthorized_keeps_login_message() {
        let err = ClientError::Unauthorized(Some("Invalid user credentials".into()));
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("Login failed"), "Invalid user credentials");
        assert_eq!(ClientError::Unauthorized(None).user_message("Login failed"), "Login failed");
    }

    #[test]
    fn decode_errors_keep_serde_message() {
        let err: ClientError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert_eq!(err.class(), ErrorClass::NetworkOrServer);
        assert!(err.to_string().starts_with("failed to decode response: invalid type"));
    }

    #[test]
    fn display_includes_status() {
        let err = ClientError::Server {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "server responded with status 502: no message");
    }
}
