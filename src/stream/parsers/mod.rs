//! 流式数据解析器
//!
//! 把上游的流式响应还原为统一的 [`crate::stream::events::UpstreamEvent`]。

pub mod event_stream;

pub use event_stream::EventStreamParser;
