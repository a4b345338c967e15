//! 透传反向代理
//!
//! 未识别的路径原样转发给上游：方法、路径加查询串、请求头和请求体。
//! 请求头里去掉 host 和 content-length，后者由客户端按实际请求体重算。
//! 上游的状态码、响应头和响应体原样转发，响应体以流式转发。

use crate::server::error::ApiError;
use crate::server::AppState;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::Response,
};

pub async fn passthrough(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let url = format!("{}{}", state.provider.base_url(), path_and_query);

    tracing::debug!("[PROXY] {} {}", method, path_and_query);

    let mut builder = state.http.request(method, url);
    for (name, value) in headers.iter() {
        if *name == header::HOST || *name == header::CONTENT_LENGTH {
            continue;
        }
        builder = builder.header(name, value);
    }
    if !body.is_empty() {
        builder = builder.body(body);
    }

    let resp = builder
        .send()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut response = Response::builder().status(resp.status());
    for (name, value) in resp.headers().iter() {
        // 响应体按我方连接重新分帧
        if *name == header::TRANSFER_ENCODING {
            continue;
        }
        response = response.header(name, value);
    }
    response
        .body(Body::from_stream(resp.bytes_stream()))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
