//! Provider 错误类型

use thiserror::Error;

/// 上游调用错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 上游返回非 2xx 状态，响应体已读出，不重试
    #[error("upstream returned {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    /// 传输层错误（连接失败、发送中断等）
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display() {
        let err = ProviderError::Upstream {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "upstream returned 502 Bad Gateway: boom");
    }
}
