//! 流式输出生成器
//!
//! 消费 [`crate::stream::events::UpstreamEvent`]，生成客户端可见的输出格式。

pub mod openai_sse;

pub use openai_sse::OpenAiSseGenerator;
