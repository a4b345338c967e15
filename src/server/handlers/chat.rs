//! Chat Completions 端点
//!
//! 把 OpenAI 格式请求翻译为 ChatGot 会话请求，再把上游事件流
//! 还原成 OpenAI 流式或聚合响应。每个请求走一次上游调用，
//! 上游失败原样透出，不重试。

use crate::models::openai::ChatCompletionRequest;
use crate::router;
use crate::server::error::ApiError;
use crate::server::AppState;
use crate::stream::pipeline::{self, PipelineConfig};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// POST /v1/chat/completions
///
/// 非 POST 方法返回结构化的 invalid_request_error 而不是 405。
/// 请求体缺失或无法解析按内部错误处理，返回 500。
pub async fn chat_completions(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    if body.is_empty() {
        return Err(ApiError::Internal("Missing request body".to_string()));
    }
    let request: ChatCompletionRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::Internal(e.to_string()))?;

    let target = router::resolve(&request.model).ok_or_else(ApiError::invalid_model)?;

    tracing::info!(
        "[CHAT] model={} upstream_id={} stream={}",
        target.public_name,
        target.upstream_id,
        request.stream
    );

    let resp = state
        .provider
        .send_conversation(target.upstream_id, request.messages)
        .await?;

    let config = PipelineConfig::new(request.model, target.supports_reasoning);

    if request.stream {
        let sse_stream = pipeline::create_sse_stream(resp.bytes_stream(), config);
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/event-stream")
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::CONNECTION, "keep-alive")
            .body(Body::from_stream(sse_stream))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(response)
    } else {
        let completion = pipeline::collect_completion(resp.bytes_stream(), config)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(Json(completion).into_response())
    }
}
