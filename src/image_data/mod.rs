//! # 图片表示模块（image_data）
//!
//! ## 设计思路
//!
//! `ImageData` 是整条拖放/粘贴流水线的规范化内存表示：一段自包含的
//! Data URL 负载加上媒体类型。所有变换（缩小、转 Blob、转文件对象）
//! 都返回新实例，负载本身从不原地修改。
//!
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合：
//!
//! - `minify`：解码 → 按边界缩放 → 重编码
//! - `blob`：Data URL 包络解析、二进制串转字节、Blob 构造回退
//! - `file`：包装为命名文件对象（能力缺失时走非抛出路径）
//! - `error`：错误模型
//!
//! ## 实现思路
//!
//! 对外仅暴露必要类型，内部细节保持 `mod` 私有。
//! 平台能力（Blob/文件构造器）通过 `PlatformCapabilities` 显式注入，
//! 而非运行时环境嗅探。

mod blob;
mod error;
mod file;
mod minify;

pub use blob::ByteBlob;
pub use error::ImageDataError;
pub use file::FileObject;
pub use minify::MinifyOptions;

pub(crate) use blob::{encode_data_url, parse_data_url};

use serde::Serialize;

/// 媒体类型缺省值，与宿主平台渲染原语的缺省一致。
pub const DEFAULT_MEDIA_TYPE: &str = "image/png";

/// 规范化的图片表示：自包含编码负载 + 媒体类型。
///
/// 负载为 Data URL 形式（`data:image/png;base64,...`），
/// 既可直接交给渲染原语，也可还原出原始字节。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageData {
    /// 自包含编码负载。不外部引用任何资源。
    #[serde(rename = "dataUrl")]
    data_url: String,
    /// 媒体类型，如 `image/png`。
    #[serde(rename = "type")]
    media_type: String,
}

impl ImageData {
    /// 创建图片表示。
    ///
    /// `media_type` 缺失或为空时回落到 [`DEFAULT_MEDIA_TYPE`]。
    pub fn new(data_url: impl Into<String>, media_type: Option<&str>) -> Self {
        let media_type = media_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_MEDIA_TYPE)
            .to_string();

        Self {
            data_url: data_url.into(),
            media_type,
        }
    }

    /// 从原始字节构造：编码为 Data URL 并持有。
    pub fn from_bytes(bytes: &[u8], media_type: Option<&str>) -> Self {
        let media_type = media_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_MEDIA_TYPE);

        Self {
            data_url: encode_data_url(bytes, media_type),
            media_type: media_type.to_string(),
        }
    }

    /// 编码负载（Data URL 字符串）。
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// 媒体类型。
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// 负载是否为空。
    pub fn is_empty(&self) -> bool {
        self.data_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_defaults_to_png_when_absent() {
        let image = ImageData::new("data:image/png;base64,AAAA", None);
        assert_eq!(image.media_type(), "image/png");
    }

    #[test]
    fn media_type_defaults_to_png_when_blank() {
        let image = ImageData::new("data:image/png;base64,AAAA", Some("  "));
        assert_eq!(image.media_type(), "image/png");
    }

    #[test]
    fn explicit_media_type_is_kept() {
        let image = ImageData::new("data:image/gif;base64,AAAA", Some("image/gif"));
        assert_eq!(image.media_type(), "image/gif");
    }

    #[test]
    fn from_bytes_round_trips_through_data_url() {
        let bytes = [1_u8, 2, 3, 4, 5];
        let image = ImageData::from_bytes(&bytes, Some("image/png"));

        let decoded = parse_data_url(image.data_url()).expect("data url should parse");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn serializes_with_host_facing_field_names() {
        let image = ImageData::from_bytes(&[0_u8], Some("image/gif"));
        let json = serde_json::to_value(&image).expect("serialize failed");

        assert!(json.get("dataUrl").is_some());
        assert_eq!(json.get("type").and_then(|t| t.as_str()), Some("image/gif"));
    }
}
