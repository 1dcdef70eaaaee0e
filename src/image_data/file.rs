//! # 文件对象转换模块
//!
//! ## 设计思路
//!
//! 将解码后的字节包装为命名文件对象，供自定义处理器做上传等后续动作。
//! 平台没有文件构造能力时不抛错：记录 `PlatformUnsupported` 诊断日志并
//! 返回空结果，调用方需做空值检查。

use crate::platform::PlatformCapabilities;

use super::{ImageData, ImageDataError};

/// 命名文件对象：文件名 + 媒体类型 + 字节。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileObject {
    /// 文件名（含扩展名由调用方决定）。
    pub name: String,
    /// 媒体类型标签。
    pub media_type: String,
    /// 文件内容字节。
    pub bytes: bytes::Bytes,
}

impl ImageData {
    /// 将解码字节包装为命名文件对象。
    ///
    /// 平台缺少文件构造器时返回 `None`（非抛出路径）。
    pub fn to_file(&self, filename: &str, platform: &PlatformCapabilities) -> Option<FileObject> {
        let Some(constructor) = platform.file_constructor() else {
            let err = ImageDataError::PlatformUnsupported(
                "当前平台不支持文件对象构造".to_string(),
            );
            log::error!("❌ to_file 失败：{}", err);
            return None;
        };

        match self.to_blob(platform) {
            Ok(blob) => Some(constructor.construct(blob, filename)),
            Err(e) => {
                log::warn!("⚠️ to_file 无法还原字节：{}", e);
                None
            }
        }
    }
}
