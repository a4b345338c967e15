//! ChatGot 上游事件类型
//!
//! 上游以 `data: {"code": 202, "data": {...}}` 形式逐行推送事件，
//! 这里定义的事件帧作为解析器 (parsers) 和生成器 (generators)
//! 之间的中间表示。
//!
//! # 事件码
//!
//! - `202` - 内容增量
//! - `203` - 流结束
//! - 其他 code 会被原样保留，由消费方决定忽略

use serde::Deserialize;

/// 内容增量事件码
pub const CODE_CONTENT_DELTA: i64 = 202;
/// 流结束事件码
pub const CODE_STREAM_END: i64 = 203;

/// 上游事件帧
///
/// 对应事件流中一条完整的 `data:` 行。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamEvent {
    /// 事件码
    pub code: i64,
    /// 事件负载
    #[serde(default)]
    pub data: UpstreamEventData,
}

/// 事件负载
///
/// 两个字段都可能缺失，结束帧的负载通常为空对象。
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UpstreamEventData {
    /// 正文增量
    #[serde(default)]
    pub content: Option<String>,
    /// 推理链增量（仅推理模型会下发）
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

impl UpstreamEvent {
    /// 是否为内容增量事件
    pub fn is_delta(&self) -> bool {
        self.code == CODE_CONTENT_DELTA
    }

    /// 是否为流结束事件
    pub fn is_end(&self) -> bool {
        self.code == CODE_STREAM_END
    }
}
