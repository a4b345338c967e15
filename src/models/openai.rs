//! OpenAI 兼容接口数据模型
//!
//! 对客户端暴露的请求/响应结构，字段顺序与 OpenAI 线上格式对齐。
//! 可选字段使用 `skip_serializing_if`，缺失时不输出 null。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// POST /v1/chat/completions 请求体
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionRequest {
    /// 对外公开的模型名
    pub model: String,
    /// 消息列表，原样透传给上游，不做结构校验
    pub messages: Vec<Value>,
    /// 是否流式返回，缺省为 false
    #[serde(default)]
    pub stream: bool,
}

/// 流式响应 chunk
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub created: i64,
    pub model: String,
    /// 固定为 "chat.completion.chunk"
    pub object: &'static str,
    pub choices: Vec<ChunkChoice>,
}

/// 流式响应的单个 choice
#[derive(Debug, Clone, Serialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: Delta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<&'static str>,
}

/// 流式增量
///
/// 心跳帧的 delta 是空对象，两个字段都不输出。
#[derive(Debug, Clone, Default, Serialize)]
pub struct Delta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
}

/// 非流式完整响应
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletion {
    pub id: String,
    pub created: i64,
    pub model: String,
    /// 固定为 "chat.completion"
    pub object: &'static str,
    pub choices: Vec<CompletionChoice>,
}

/// 非流式响应的单个 choice
#[derive(Debug, Clone, Serialize)]
pub struct CompletionChoice {
    pub message: AssistantMessage,
    pub finish_reason: &'static str,
    pub index: u32,
}

/// 助手消息
#[derive(Debug, Clone, Serialize)]
pub struct AssistantMessage {
    /// 固定为 "assistant"
    pub role: &'static str,
    pub content: String,
    /// 仅推理模型输出该字段，非推理模型不出现
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
}

/// GET /v1/models 的单个模型条目
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    /// 固定为 "model"
    pub object: &'static str,
    pub created: u64,
    pub owned_by: &'static str,
}

/// GET /v1/models 响应
#[derive(Debug, Clone, Serialize)]
pub struct ModelList {
    /// 固定为 "list"
    pub object: &'static str,
    pub data: Vec<ModelInfo>,
}
