//! # Data URL 包络与 Blob 转换模块
//!
//! ## 设计思路
//!
//! 集中处理“编码负载 ↔ 原始字节”的边界：
//! - 解析时剥掉 Data URL 包络，只解码 Base64 主体；
//! - 构造 Blob 时不直接依赖具体平台，而是走注入的构造器策略链，
//!   主构造器拒绝输入时逐级回退（见 `platform.rs`）。
//!
//! ## 实现思路
//!
//! - 包络按“首个逗号之前”剥离，无包络时整体按 Base64 解码。
//! - 二进制串转字节是纯的逐字符拷贝，不做任何字符编码再解释。

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;

use crate::platform::PlatformCapabilities;

use super::{ImageData, ImageDataError};

/// 原始字节 Blob：字节缓冲 + 媒体类型标签。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBlob {
    /// 原始字节。
    pub bytes: Bytes,
    /// 媒体类型，如 `image/png`。
    pub media_type: String,
}

impl ByteBlob {
    pub fn new(bytes: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ImageData {
    /// 剥离包络并还原出原始字节，经平台构造器策略链包装为 Blob。
    ///
    /// 主构造器把输入判为畸形时在本地回退到下一个构造器；
    /// 全部不可用才向外传播失败。
    pub fn to_blob(&self, platform: &PlatformCapabilities) -> Result<ByteBlob, ImageDataError> {
        let bytes = self.decoded_bytes()?;
        platform.construct_blob(&[Bytes::from(bytes)], self.media_type())
    }

    /// 解码出负载的原始字节。
    pub(crate) fn decoded_bytes(&self) -> Result<Vec<u8>, ImageDataError> {
        parse_data_url(self.data_url())
    }

    /// 二进制串 → 字节缓冲：逐字符取码点低 8 位。
    ///
    /// 输出长度恒等于输入字符数（含空串），不做字符编码再解释。
    pub fn binary_string_to_bytes(binary: &str) -> Vec<u8> {
        binary.chars().map(|c| (c as u32 & 0xFF) as u8).collect()
    }
}

/// 将原始字节编码为自包含 Data URL。
pub(crate) fn encode_data_url(bytes: &[u8], media_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// 解析编码负载：剥掉首个逗号之前的包络，解码剩余 Base64 主体。
///
/// 无逗号时视为裸 Base64 整体解码。
pub(crate) fn parse_data_url(payload: &str) -> Result<Vec<u8>, ImageDataError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(ImageDataError::EmptyPayload("编码负载为空".to_string()));
    }

    let body = match trimmed.find(',') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    };

    general_purpose::STANDARD
        .decode(body)
        .map_err(|e| ImageDataError::Decode(format!("Base64 解码失败：{}", e)))
}
