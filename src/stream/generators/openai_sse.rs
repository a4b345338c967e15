//! OpenAI SSE 生成器
//!
//! 将 ChatGot 上游事件帧转换为 OpenAI Chat Completions SSE 格式。
//!
//! # 格式说明
//!
//! ```text
//! data: {"id":"chatcmpl-xxx","created":1234567890,"model":"deepseek-r1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{"content":"Hello"}}]}
//!
//! data: [DONE]
//! ```
//!
//! `id` 和 `created` 在生成器创建时确定一次，同一次响应的所有 chunk
//! 共享同一组值，客户端据此把增量关联到同一个 completion。

use crate::models::openai::{ChatCompletionChunk, ChunkChoice, Delta};
use crate::stream::events::UpstreamEvent;

/// OpenAI SSE 生成器
#[derive(Debug)]
pub struct OpenAiSseGenerator {
    /// 响应 ID
    response_id: String,
    /// 对客户端展示的模型名
    model: String,
    /// 创建时间戳（秒）
    created: i64,
    /// 是否透出推理链字段
    include_reasoning: bool,
    /// 是否已收到结束帧
    done: bool,
}

impl OpenAiSseGenerator {
    /// 创建新的生成器
    pub fn new(model: String, include_reasoning: bool) -> Self {
        Self::with_id(
            format!("chatcmpl-{}", uuid::Uuid::new_v4()),
            chrono::Utc::now().timestamp(),
            model,
            include_reasoning,
        )
    }

    /// 使用指定的响应 ID 和时间戳创建生成器
    pub fn with_id(id: String, created: i64, model: String, include_reasoning: bool) -> Self {
        Self {
            response_id: id,
            model,
            created,
            include_reasoning,
            done: false,
        }
    }

    /// 将上游事件帧转换为 OpenAI SSE 字符串
    ///
    /// # 返回
    ///
    /// - `Some(String)` - 生成的 SSE 字符串（包含 `data: ` 前缀和空行）
    /// - `None` - 该事件不产生输出（未知 code，或结束帧之后的事件）
    pub fn generate(&mut self, event: &UpstreamEvent) -> Option<String> {
        if self.done {
            return None;
        }

        if event.is_delta() {
            // 空增量帧也要产出空 delta 的 chunk，上游以此做心跳
            let content = event
                .data
                .content
                .clone()
                .filter(|s| !s.is_empty());
            let reasoning_content = if self.include_reasoning {
                event
                    .data
                    .reasoning_content
                    .clone()
                    .filter(|s| !s.is_empty())
            } else {
                None
            };

            let chunk = self.build_chunk(
                Delta {
                    content,
                    reasoning_content,
                },
                None,
            );
            return Some(format!("data: {}\n\n", serde_json::to_string(&chunk).ok()?));
        }

        if event.is_end() {
            self.done = true;
            let chunk = self.build_chunk(Delta::default(), Some("stop"));
            let chunk_str = format!("data: {}\n\n", serde_json::to_string(&chunk).ok()?);
            return Some(format!("{chunk_str}data: [DONE]\n\n"));
        }

        None
    }

    fn build_chunk(&self, delta: Delta, finish_reason: Option<&'static str>) -> ChatCompletionChunk {
        ChatCompletionChunk {
            id: self.response_id.clone(),
            created: self.created,
            model: self.model.clone(),
            object: "chat.completion.chunk",
            choices: vec![ChunkChoice {
                index: 0,
                delta,
                finish_reason,
            }],
        }
    }

    /// 是否已收到结束帧
    ///
    /// 结束帧之后调用方应停止继续拉取上游数据。
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// 获取响应 ID
    pub fn response_id(&self) -> &str {
        &self.response_id
    }
}
