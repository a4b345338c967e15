//! 模型路由表
//!
//! 把对外公开的模型名映射为上游的数字模型 id 及能力标记。
//! 表是编译期常量，进程生命周期内不变，跨请求只读。

/// 模型路由目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelTarget {
    /// 对外公开的模型名
    pub public_name: &'static str,
    /// 上游的数字模型 id
    pub upstream_id: u32,
    /// 是否支持推理链通道
    pub supports_reasoning: bool,
    /// /v1/models 返回的归属方
    pub owned_by: &'static str,
    /// /v1/models 返回的创建时间戳
    pub created: u64,
}

/// 固定模型表
pub const MODEL_TABLE: &[ModelTarget] = &[
    ModelTarget {
        public_name: "deepseek-r1",
        upstream_id: 1,
        supports_reasoning: true,
        owned_by: "openai",
        created: 1677610602,
    },
    ModelTarget {
        public_name: "deepseek-v3",
        upstream_id: 2,
        supports_reasoning: false,
        owned_by: "openai",
        created: 1677610602,
    },
];

/// 解析模型名
///
/// 区分大小写的精确匹配，近似名一律不命中。
pub fn resolve(model: &str) -> Option<&'static ModelTarget> {
    MODEL_TABLE.iter().find(|t| t.public_name == model)
}

/// 枚举所有支持的模型
pub fn all() -> &'static [ModelTarget] {
    MODEL_TABLE
}

/// 支持的模型名列表，用于错误信息
pub fn supported_names() -> String {
    MODEL_TABLE
        .iter()
        .map(|t| format!("'{}'", t.public_name))
        .collect::<Vec<_>>()
        .join(", ")
}
