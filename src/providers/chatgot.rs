//! ChatGot Provider
//!
//! 调用 ChatGot 会话接口。上游只提供 event-stream 响应，
//! 无论客户端是否要求流式输出，这里都以 `text/event-stream` 拉取，
//! 由上层决定实时转发还是聚合。

use super::error::ProviderError;
use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;

/// 会话接口路径
const CONVERSATIONS_PATH: &str = "/api/v1/char-gpt/conversations";

/// 会话请求体
#[derive(Debug, Clone, Serialize)]
pub struct ConversationRequest {
    pub device_id: String,
    pub model_id: u32,
    pub include_reasoning: bool,
    pub messages: Vec<Value>,
}

/// ChatGot 上游客户端
///
/// base_url 由配置注入，不持有进程级可变状态。
#[derive(Debug, Clone)]
pub struct ChatGotProvider {
    base_url: String,
    client: Client,
}

impl ChatGotProvider {
    /// 创建客户端
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// 发起一次会话请求，返回上游的原始响应
    ///
    /// 每次调用生成新的随机 device_id，仅用于关联本次会话，
    /// 不跨调用复用。推理链总是请求，是否透出由上层按模型能力决定。
    /// 非 2xx 状态会读出响应体并作为 [`ProviderError::Upstream`] 返回，
    /// 不重试。
    pub async fn send_conversation(
        &self,
        model_id: u32,
        messages: Vec<Value>,
    ) -> Result<reqwest::Response, ProviderError> {
        let body = ConversationRequest {
            device_id: uuid::Uuid::new_v4().to_string(),
            model_id,
            include_reasoning: true,
            messages,
        };

        tracing::debug!(
            "[UPSTREAM] POST {}{} model_id={}",
            self.base_url,
            CONVERSATIONS_PATH,
            model_id
        );

        let resp = self
            .client
            .post(format!("{}{}", self.base_url, CONVERSATIONS_PATH))
            .header(header::ACCEPT, "text/event-stream")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream { status, body });
        }
        Ok(resp)
    }

    /// 上游基础地址
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
