//! # 平台能力模块
//!
//! ## 设计思路
//!
//! 把“宿主平台有没有某个原语”从运行时环境嗅探改为构造期显式注入：
//! 文件对象构造、Blob 构造策略链、光标点位解析，全部挂在
//! `PlatformCapabilities` 上，能力缺失是一个显式、可测试的输入。
//!
//! ## 实现思路
//!
//! - Blob 构造器是有序策略列表：主构造器把输入判为畸形
//!   （`MalformedBlob`）时本地回退到下一个；其余错误立即向外传播；
//!   全部失败才把最后的失败交还调用方。
//! - 策略列表在初始化时探测一次，调用期不再做能力判断。

use bytes::Bytes;

use crate::image_data::{ByteBlob, FileObject, ImageDataError};
use crate::transfer::CaretPoint;

/// Blob 构造策略。
///
/// 对应平台上可用的一种 Blob 构造原语。
pub trait BlobConstructor {
    /// 策略名，用于诊断日志。
    fn name(&self) -> &'static str;

    /// 将若干字节片段构造为一个 Blob。
    ///
    /// 输入畸形时返回 `MalformedBlob`，由策略链本地回退。
    fn construct(&self, parts: &[Bytes], media_type: &str) -> Result<ByteBlob, ImageDataError>;
}

/// 文件对象构造原语。
pub trait FileConstructor {
    fn construct(&self, blob: ByteBlob, filename: &str) -> FileObject;
}

/// 光标点位解析原语：把落点坐标换算为文档内偏移。
pub trait CaretResolver {
    fn resolve(&self, point: CaretPoint) -> Option<usize>;
}

/// 构造期注入的平台能力集合。
pub struct PlatformCapabilities {
    blob_constructors: Vec<Box<dyn BlobConstructor>>,
    file_constructor: Option<Box<dyn FileConstructor>>,
    caret_resolver: Option<Box<dyn CaretResolver>>,
}

impl PlatformCapabilities {
    /// 本地缺省能力：单一 Blob 构造器 + 文件构造器，无光标解析。
    pub fn native() -> Self {
        Self {
            blob_constructors: vec![Box::new(NativeBlobConstructor)],
            file_constructor: Some(Box::new(NativeFileConstructor)),
            caret_resolver: None,
        }
    }

    /// 替换 Blob 构造策略链（按回退顺序给出）。
    pub fn with_blob_constructors(
        mut self,
        constructors: Vec<Box<dyn BlobConstructor>>,
    ) -> Self {
        self.blob_constructors = constructors;
        self
    }

    /// 注入光标点位解析能力。
    pub fn with_caret_resolver(mut self, resolver: Box<dyn CaretResolver>) -> Self {
        self.caret_resolver = Some(resolver);
        self
    }

    /// 移除文件对象构造能力（用于模拟受限平台）。
    pub fn without_file_support(mut self) -> Self {
        self.file_constructor = None;
        self
    }

    pub(crate) fn file_constructor(&self) -> Option<&dyn FileConstructor> {
        self.file_constructor.as_deref()
    }

    /// 是否支持把落点坐标换算为文档偏移。
    pub(crate) fn supports_caret_from_point(&self) -> bool {
        self.caret_resolver.is_some()
    }

    pub(crate) fn resolve_caret(&self, point: CaretPoint) -> Option<usize> {
        self.caret_resolver.as_ref().and_then(|r| r.resolve(point))
    }

    /// 沿策略链构造 Blob。
    pub(crate) fn construct_blob(
        &self,
        parts: &[Bytes],
        media_type: &str,
    ) -> Result<ByteBlob, ImageDataError> {
        if self.blob_constructors.is_empty() {
            return Err(ImageDataError::PlatformUnsupported(
                "没有可用的 Blob 构造器".to_string(),
            ));
        }

        let mut last_err = None;
        for constructor in &self.blob_constructors {
            match constructor.construct(parts, media_type) {
                Ok(blob) => return Ok(blob),
                Err(ImageDataError::MalformedBlob(msg)) => {
                    log::warn!("⚠️ Blob 构造器 {} 拒绝输入：{}，尝试下一个", constructor.name(), msg);
                    last_err = Some(ImageDataError::MalformedBlob(msg));
                }
                Err(other) => return Err(other),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            ImageDataError::PlatformUnsupported("Blob 构造策略链为空".to_string())
        }))
    }
}

/// 缺省 Blob 构造器：拼接片段并打上媒体类型标签。
struct NativeBlobConstructor;

impl BlobConstructor for NativeBlobConstructor {
    fn name(&self) -> &'static str {
        "native"
    }

    fn construct(&self, parts: &[Bytes], media_type: &str) -> Result<ByteBlob, ImageDataError> {
        let total: usize = parts.iter().map(Bytes::len).sum();
        let mut buffer = Vec::with_capacity(total);
        for part in parts {
            buffer.extend_from_slice(part);
        }

        Ok(ByteBlob::new(buffer, media_type))
    }
}

/// 缺省文件构造器：Blob + 文件名。
struct NativeFileConstructor;

impl FileConstructor for NativeFileConstructor {
    fn construct(&self, blob: ByteBlob, filename: &str) -> FileObject {
        FileObject {
            name: filename.to_string(),
            media_type: blob.media_type,
            bytes: blob.bytes,
        }
    }
}
