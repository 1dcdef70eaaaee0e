//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图片表示链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 约定：
//! - `EmptyPayload` / `MalformedBlob` 作为可恢复错误抛给调用方；
//! - `PlatformUnsupported` 走“日志 + 空结果”的非抛出路径（见 `file.rs`）；
//! - 平台级解码/提取失败属于预期分支（条目被丢弃），不在此建模。

/// 图片表示统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum ImageDataError {
    /// 对空负载执行 minify 等变换。
    #[error("图片负载为空：{0}")]
    EmptyPayload(String),

    /// 平台缺少文件/Blob 构造能力。
    #[error("平台能力缺失：{0}")]
    PlatformUnsupported(String),

    /// Blob 构造器拒绝输入（逐级回退后仍失败才会向外传播）。
    #[error("Blob 构造失败：{0}")]
    MalformedBlob(String),

    /// 解码错误（Base64 / 像素解码）。
    #[error("解码错误：{0}")]
    Decode(String),

    /// 重编码错误。
    #[error("编码错误：{0}")]
    Encode(String),
}

impl From<ImageDataError> for String {
    /// 兼容仍使用字符串错误的调用点。
    fn from(error: ImageDataError) -> Self {
        error.to_string()
    }
}
