//! 统一流处理管道
//!
//! 封装完整的流式处理流程：上游字节流 → 行解析 → OpenAI 输出。
//! 两种模式共用同一套解析链路：
//!
//! - 流式：[`create_sse_stream`]，每个上游帧实时转为一条 SSE 字符串
//! - 聚合：[`collect_completion`]，消费完整个流后产出一个完整响应
//!
//! 管道严格按到达顺序逐 chunk 处理，每个请求持有自己的解析器和
//! 累积器，不存在跨请求共享的可变状态。

use crate::models::openai::{AssistantMessage, ChatCompletion, CompletionChoice};
use crate::stream::events::UpstreamEvent;
use crate::stream::generators::OpenAiSseGenerator;
use crate::stream::parsers::EventStreamParser;
use bytes::Bytes;
use futures::{Stream, StreamExt};

/// 流处理管道配置
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 对客户端展示的模型名
    pub model: String,
    /// 是否透出推理链字段
    pub include_reasoning: bool,
}

impl PipelineConfig {
    /// 创建管道配置
    pub fn new(model: impl Into<String>, include_reasoning: bool) -> Self {
        Self {
            model: model.into(),
            include_reasoning,
        }
    }
}

/// 将上游字节流转换为 OpenAI SSE 字符串流
///
/// 每个到达的字节块立即经过解析器和生成器，产出的 SSE 字符串
/// 随即下推，除当前行缓冲外没有任何积压。收到结束帧后不再拉取
/// 上游数据，即使上游还有剩余字节。
///
/// 上游中途传输失败时，错误下推后流直接结束，不补发 `[DONE]`。
pub fn create_sse_stream<S, E>(
    byte_stream: S,
    config: PipelineConfig,
) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Send + 'static,
{
    async_stream::stream! {
        let mut parser = EventStreamParser::new();
        let mut generator = OpenAiSseGenerator::new(config.model, config.include_reasoning);
        let mut byte_stream = std::pin::pin!(byte_stream);

        while let Some(result) = byte_stream.next().await {
            match result {
                Ok(bytes) => {
                    for event in parser.process(&bytes) {
                        if let Some(sse) = generator.generate(&event) {
                            yield Ok(sse);
                        }
                        if generator.is_done() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }

        // 上游没有发结束帧就关闭了连接，客户端流就此结束
        if let Some(leftover) = parser.finish() {
            tracing::warn!("[STREAM] 上游流结束时缓冲区残留 {} 字节", leftover.len());
        }
    }
}

/// 消费整个上游字节流，聚合为一个完整响应
///
/// 结束帧和上游关闭连接都视为完成；没有结束帧也不报错，
/// 以已累积的内容收尾。传输错误原样上抛。
pub async fn collect_completion<S, E>(
    byte_stream: S,
    config: PipelineConfig,
) -> Result<ChatCompletion, E>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let mut parser = EventStreamParser::new();
    let mut aggregator = CompletionAggregator::new(config.model, config.include_reasoning);
    let mut byte_stream = std::pin::pin!(byte_stream);

    'outer: while let Some(result) = byte_stream.next().await {
        let bytes = result?;
        for event in parser.process(&bytes) {
            aggregator.absorb(&event);
            if aggregator.is_done() {
                break 'outer;
            }
        }
    }

    if let Some(leftover) = parser.finish() {
        tracing::warn!("[STREAM] 上游流结束时缓冲区残留 {} 字节", leftover.len());
    }

    Ok(aggregator.into_completion())
}

/// 聚合模式的累积器
///
/// 按到达顺序拼接 202 帧的正文和推理链，直到结束帧或流关闭。
#[derive(Debug)]
pub struct CompletionAggregator {
    response_id: String,
    model: String,
    created: i64,
    include_reasoning: bool,
    content: String,
    reasoning_content: String,
    done: bool,
}

impl CompletionAggregator {
    /// 创建新的累积器
    pub fn new(model: impl Into<String>, include_reasoning: bool) -> Self {
        Self::with_id(
            format!("chatcmpl-{}", uuid::Uuid::new_v4()),
            chrono::Utc::now().timestamp(),
            model,
            include_reasoning,
        )
    }

    /// 使用指定的响应 ID 和时间戳创建累积器
    pub fn with_id(
        id: String,
        created: i64,
        model: impl Into<String>,
        include_reasoning: bool,
    ) -> Self {
        Self {
            response_id: id,
            model: model.into(),
            created,
            include_reasoning,
            content: String::new(),
            reasoning_content: String::new(),
            done: false,
        }
    }

    /// 吸收一个上游事件帧
    ///
    /// 未知 code 的帧不改变任何累积状态。
    pub fn absorb(&mut self, event: &UpstreamEvent) {
        if self.done {
            return;
        }

        if event.is_delta() {
            if let Some(content) = &event.data.content {
                self.content.push_str(content);
            }
            if self.include_reasoning {
                if let Some(reasoning) = &event.data.reasoning_content {
                    self.reasoning_content.push_str(reasoning);
                }
            }
        } else if event.is_end() {
            self.done = true;
        }
    }

    /// 是否已收到结束帧
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// 产出完整响应
    ///
    /// 无论是否收到过结束帧，finish_reason 都是 "stop"。
    pub fn into_completion(self) -> ChatCompletion {
        ChatCompletion {
            id: self.response_id,
            created: self.created,
            model: self.model,
            object: "chat.completion",
            choices: vec![CompletionChoice {
                message: AssistantMessage {
                    role: "assistant",
                    content: self.content,
                    reasoning_content: if self.include_reasoning {
                        Some(self.reasoning_content)
                    } else {
                        None
                    },
                },
                finish_reason: "stop",
                index: 0,
            }],
        }
    }
}
