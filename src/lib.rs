//! relaycast - OpenAI 兼容的 ChatGot 中继服务
//!
//! 对外提供 OpenAI Chat Completions 兼容接口，实际由 ChatGot 上游
//! 提供服务。核心是双向协议翻译：
//!
//! - 公开模型名 ↔ 上游数字模型 id（[`router`]）
//! - 上游 `code 202/203` 事件流 ↔ OpenAI SSE / 聚合响应（[`stream`]）
//!
//! 未识别的路径透传给上游（[`server::handlers::passthrough`]）。

pub mod config;
pub mod models;
pub mod providers;
pub mod router;
pub mod server;
pub mod stream;
