//! # 传输条目与事件模型
//!
//! ## 设计思路
//!
//! 将“外部输入”和“流水线中间结果”解耦：
//! - [`TransferredItem`] 表示事件里的一个传输条目（媒体类型 + 负载访问器）
//! - [`DropEvent`] / [`PasteEvent`] 表示归一化后的拖放/粘贴事件
//! - [`ClassifiedItem`] 表示分类阶段的产出
//!
//! 事件显式记录“缺省行为是否被抑制”，让抑制决策成为可断言的行为
//! 而非浏览器副作用。

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::image_data::ImageData;

/// 落点坐标（宿主视口坐标系）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaretPoint {
    pub x: f64,
    pub y: f64,
}

/// 传输条目的负载访问结果。
///
/// `Unsupported` 对应字节访问器给出非 Blob 值的情况：
/// 条目被静默丢弃，不算错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferPayload {
    /// 字节流负载。
    Blob(Bytes),
    /// 字符串负载。
    Text(String),
    /// 访问器未能给出可用负载。
    Unsupported,
}

/// 事件中的一个传输条目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferredItem {
    /// 媒体类型字符串，如 `image/png`、`text/plain`。
    pub media_type: String,
    /// 负载。
    pub payload: TransferPayload,
}

impl TransferredItem {
    pub fn blob(media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            media_type: media_type.into(),
            payload: TransferPayload::Blob(bytes.into()),
        }
    }

    pub fn text(media_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            payload: TransferPayload::Text(text.into()),
        }
    }

    pub fn unsupported(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            payload: TransferPayload::Unsupported,
        }
    }

    /// 是否携带字节流负载（对应“事件里有文件”）。
    pub fn is_blob(&self) -> bool {
        matches!(self.payload, TransferPayload::Blob(_))
    }
}

/// 拖放事件。
#[derive(Debug)]
pub struct DropEvent {
    pub items: Vec<TransferredItem>,
    /// 释放时的落点，用于把插入光标钉到鼠标下方。
    pub point: CaretPoint,
    default_suppressed: bool,
}

impl DropEvent {
    pub fn new(items: Vec<TransferredItem>, point: CaretPoint) -> Self {
        Self {
            items,
            point,
            default_suppressed: false,
        }
    }

    /// 抑制宿主的缺省导航行为。
    pub fn suppress_default(&mut self) {
        self.default_suppressed = true;
    }

    pub fn default_suppressed(&self) -> bool {
        self.default_suppressed
    }
}

/// 粘贴事件。
#[derive(Debug)]
pub struct PasteEvent {
    pub items: Vec<TransferredItem>,
    default_suppressed: bool,
}

impl PasteEvent {
    pub fn new(items: Vec<TransferredItem>) -> Self {
        Self {
            items,
            default_suppressed: false,
        }
    }

    /// 抑制宿主的缺省粘贴行为。
    pub fn suppress_default(&mut self) {
        self.default_suppressed = true;
    }

    pub fn default_suppressed(&self) -> bool {
        self.default_suppressed
    }
}

/// 分类结果的内容种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Image,
    Text,
    Ignored,
}

/// 分类内容的来源通道。
///
/// 粘贴路径的缺省插入规则依赖来源而非分类结果（见 `ingest.rs`），
/// 单独建模避免二次分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    /// 字节流解码而来。
    Blob,
    /// 探测为可达图片地址的纯文本。
    UrlText,
    /// 普通纯文本。
    PlainText,
}

/// 分类阶段产出：内容 + 种类 + 来源，字节流条目附带现成的图片表示。
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedItem {
    /// 编码负载、纯文本或图片地址。
    pub content: String,
    pub kind: ContentKind,
    #[serde(skip)]
    pub origin: PayloadOrigin,
    /// 字节流条目的规范化表示，供自定义处理器直接使用。
    pub image: Option<ImageData>,
}
