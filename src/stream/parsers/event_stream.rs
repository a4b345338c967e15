//! ChatGot 事件流解析器
//!
//! 上游响应是 `text/event-stream` 字节流，事件以 `data: <json>` 行承载，
//! 行可能在任意字节处被切分。解析器持有跨 chunk 的行缓冲，
//! 逐行提取完整行并解析为 [`UpstreamEvent`]。
//!
//! 坏帧策略：空行、非 `data:` 行、空负载、JSON 解析失败的行一律丢弃，
//! 单条坏帧不会中断整个流。

use crate::stream::events::UpstreamEvent;

/// 行前缀标记
const DATA_PREFIX: &str = "data:";

/// ChatGot 事件流解析器
///
/// 每个上游响应使用独立的解析器实例，缓冲区状态不允许跨请求共享，
/// 也不允许并发喂入。
#[derive(Debug, Default)]
pub struct EventStreamParser {
    /// 行缓冲，保存末尾未完成的行
    ///
    /// 以原始字节保存，多字节字符被 chunk 边界切开时不会损坏。
    buffer: Vec<u8>,
}

impl EventStreamParser {
    /// 创建新的解析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 处理一个字节块，返回其中包含的完整事件帧
    ///
    /// 末尾未以换行符结束的部分留在缓冲区，等待下一个 chunk 拼接。
    pub fn process(&mut self, chunk: &[u8]) -> Vec<UpstreamEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = Self::parse_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// 解析一条完整的行
    ///
    /// 返回 `None` 表示该行被丢弃。
    fn parse_line(line: &str) -> Option<UpstreamEvent> {
        let trimmed = line.trim();
        if trimmed.is_empty() || !trimmed.starts_with(DATA_PREFIX) {
            return None;
        }

        let payload = trimmed[DATA_PREFIX.len()..].trim();
        if payload.is_empty() {
            return None;
        }

        match serde_json::from_str::<UpstreamEvent>(payload) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::debug!("[STREAM] 丢弃无法解析的事件行: {} - {}", e, payload);
                None
            }
        }
    }

    /// 结束解析，取出缓冲区中残留的未完成行
    ///
    /// 流正常结束时缓冲区应为空，返回 `None`。
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let leftover = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        Some(leftover)
    }

    /// 重置解析器状态
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_line() {
        let mut parser = EventStreamParser::new();
        let events = parser.process(b"data: {\"code\":202,\"data\":{\"content\":\"Hello\"}}\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, 202);
        assert_eq!(events[0].data.content.as_deref(), Some("Hello"));
        assert!(parser.finish().is_none());
    }

    #[test]
    fn test_partial_line_across_chunks() {
        let mut parser = EventStreamParser::new();

        let first = parser.process(b"data: {\"code\":202,\"data\":{\"content\":\"a\"}}\n");
        assert_eq!(first.len(), 1);

        // 第二行被切成两个 chunk，拼接完成前不产出任何帧
        let second = parser.process(b"data: {\"code\":202,\"data\":{\"co");
        assert!(second.is_empty());

        let third = parser.process(b"ntent\":\"b\"}}\n");
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].data.content.as_deref(), Some("b"));
        assert!(parser.finish().is_none());
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut parser = EventStreamParser::new();
        let events = parser.process(
            b"data: {\"code\":202,\"data\":{\"content\":\"a\"}}\n\ndata: {\"code\":203,\"data\":{}}\n",
        );
        assert_eq!(events.len(), 2);
        assert!(events[0].is_delta());
        assert!(events[1].is_end());
    }

    #[test]
    fn test_ignores_blank_and_non_data_lines() {
        let mut parser = EventStreamParser::new();
        let events = parser.process(
            b"\n\nevent: message\nretry: 3000\n: comment\ndata: {\"code\":202,\"data\":{}}\n",
        );
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_discards_non_json_payloads() {
        let mut parser = EventStreamParser::new();
        let events = parser.process(b"data: [DONE]\ndata: not json\ndata:\ndata:   \n");
        assert!(events.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut parser = EventStreamParser::new();
        let events = parser.process(b"data: {\"code\":202,\"data\":{\"content\":\"x\"}}\r\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data.content.as_deref(), Some("x"));
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let mut parser = EventStreamParser::new();
        let line = "data: {\"code\":202,\"data\":{\"content\":\"你好\"}}\n".as_bytes();

        // 逐字节喂入，多字节字符必然被切开
        let mut events = Vec::new();
        for &b in line {
            events.extend(parser.process(&[b]));
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data.content.as_deref(), Some("你好"));
    }

    #[test]
    fn test_finish_returns_leftover() {
        let mut parser = EventStreamParser::new();
        parser.process(b"data: {\"code\":202");
        assert_eq!(parser.finish().as_deref(), Some("data: {\"code\":202"));
        // 取出后缓冲区清空
        assert!(parser.finish().is_none());
    }

    #[test]
    fn test_reset_clears_buffer() {
        let mut parser = EventStreamParser::new();
        parser.process(b"data: {\"code\":202");
        parser.reset();
        assert!(parser.finish().is_none());

        // 重置后可继续用于新的流
        let events = parser.process(b"data: {\"code\":203,\"data\":{}}\n");
        assert_eq!(events.len(), 1);
    }
}
