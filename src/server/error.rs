//! API 错误类型
//!
//! 对客户端暴露的结构化错误，与 OpenAI 错误格式对齐：
//! `{ "error": { "message": ..., "type": ... } }`
//!
//! 帧级解析错误不在此列，它们在流处理中被静默跳过，永远不会
//! 让整个请求失败。

use crate::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// API 错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 未知模型（客户端输入错误）
    #[error("Invalid model. Supported models: {supported}")]
    InvalidModel { supported: String },

    /// /v1/chat/completions 的非 POST 请求
    #[error("Invalid request. Please use POST /v1/chat/completions.")]
    MethodNotAllowed,

    /// 上游返回非 2xx，状态码原样透传给客户端
    #[error("API error: {body}")]
    Upstream { status: StatusCode, body: String },

    /// 内部错误（请求体缺失、解析失败、上游传输失败等）
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// 按当前模型表构造未知模型错误
    pub fn invalid_model() -> Self {
        Self::InvalidModel {
            supported: crate::router::supported_names(),
        }
    }

    /// 获取对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidModel { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::BAD_REQUEST,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 获取错误类型字符串
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidModel { .. } | ApiError::MethodNotAllowed => "invalid_request_error",
            ApiError::Upstream { .. } => "api_error",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// 转换为 JSON 错误响应体
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "message": self.to_string(),
                "type": self.error_type(),
            }
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Upstream { status, body } => ApiError::Upstream { status, body },
            ProviderError::Transport(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_model_message() {
        let err = ApiError::invalid_model();
        assert_eq!(
            err.to_string(),
            "Invalid model. Supported models: 'deepseek-r1', 'deepseek-v3'"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "invalid_request_error");
    }

    #[test]
    fn test_method_not_allowed_message() {
        let err = ApiError::MethodNotAllowed;
        assert_eq!(
            err.to_string(),
            "Invalid request. Please use POST /v1/chat/completions."
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_error_propagates_status() {
        let err = ApiError::Upstream {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "API error: overloaded");
        assert_eq!(err.error_type(), "api_error");
    }

    #[test]
    fn test_internal_error() {
        let err = ApiError::Internal("Missing request body".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal error: Missing request body");
        assert_eq!(err.error_type(), "internal_error");
    }

    #[test]
    fn test_to_json_shape() {
        let json = ApiError::MethodNotAllowed.to_json();
        assert_eq!(
            json["error"]["message"],
            "Invalid request. Please use POST /v1/chat/completions."
        );
        assert_eq!(json["error"]["type"], "invalid_request_error");
    }
}
