//! 流式处理
//!
//! 上游字节流 → 事件帧 → OpenAI 兼容输出的完整链路：
//!
//! - [`parsers`] 负责把任意切分的字节流还原为事件帧
//! - [`generators`] 把事件帧转为 OpenAI SSE 字符串
//! - [`pipeline`] 把两者串起来，并提供聚合模式

pub mod events;
pub mod generators;
pub mod parsers;
pub mod pipeline;

pub use events::{UpstreamEvent, UpstreamEventData};
pub use pipeline::{collect_completion, create_sse_stream, CompletionAggregator, PipelineConfig};
