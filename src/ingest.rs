//! # 事件摄取模块
//!
//! ## 设计思路
//!
//! `EventIngestor` 只负责把拖放/粘贴事件归一化并编排后续阶段，
//! 不做分类与插入的具体工作：
//!
//! 1. 抑制宿主缺省行为（粘贴含富 HTML 时整体让行，不抑制）
//! 2. 拖放且事件携带文件时，把选区钉到落点（平台具备该能力才做）
//! 3. 交给分类器并发产出 (内容, 种类)
//! 4. 逐条路由到自定义处理器或缺省插入策略
//!
//! ## 实现思路
//!
//! 粘贴路径保留来源行为：无处理器时，字节流解码的内容一律按
//! `Image` 插入（即使分类结果不是图片），探测命中的地址按 `Image`、
//! 剩余纯文本按 `Text`。该怪癖由显式测试钉住，不做静默“修正”。

use std::sync::Arc;

use crate::classify::PayloadClassifier;
use crate::host::HostSurface;
use crate::insert::InsertionPolicy;
use crate::module::ContentHandler;
use crate::platform::PlatformCapabilities;
use crate::transfer::{ClassifiedItem, ContentKind, DropEvent, PasteEvent, PayloadOrigin, TransferredItem};

/// 事件摄取器：归一化事件并驱动分类与路由。
pub struct EventIngestor {
    host: Arc<dyn HostSurface>,
    platform: Arc<PlatformCapabilities>,
    classifier: PayloadClassifier,
}

impl EventIngestor {
    pub fn new(
        host: Arc<dyn HostSurface>,
        platform: Arc<PlatformCapabilities>,
        classifier: PayloadClassifier,
    ) -> Self {
        Self {
            host,
            platform,
            classifier,
        }
    }

    /// 处理拖放事件。
    pub async fn on_drop(&self, event: &mut DropEvent, handler: Option<&ContentHandler>) {
        event.suppress_default();

        if event.items.is_empty() {
            return;
        }

        let has_files = event.items.iter().any(TransferredItem::is_blob);
        if has_files && self.platform.supports_caret_from_point() {
            if let Some(index) = self.platform.resolve_caret(event.point) {
                self.host.set_selection(index);
                log::debug!("📍 已把插入光标钉到落点偏移 {}", index);
            }
        }

        let classified = self.classifier.classify_items(&event.items).await;
        log::info!("📥 拖放事件产出 {} 个分类结果", classified.len());

        for item in classified {
            self.route(item, handler);
        }
    }

    /// 处理粘贴事件。
    pub async fn on_paste(&self, event: &mut PasteEvent, handler: Option<&ContentHandler>) {
        if event.items.is_empty() {
            return;
        }

        // 剪贴板同时携带富 HTML：整体让行给宿主原生粘贴，
        // 避免把 HTML 里已嵌入的图片插两遍。此时不抑制缺省行为。
        if contains_html_item(&event.items) {
            log::debug!("📋 粘贴内容携带 HTML，让行给宿主原生处理");
            return;
        }

        event.suppress_default();

        let classified = self.classifier.classify_items(&event.items).await;
        log::info!("📥 粘贴事件产出 {} 个分类结果", classified.len());

        for item in classified {
            match handler {
                Some(h) => h(&item.content, item.kind, item.image.as_ref()),
                None => self.route_paste_default(item),
            }
        }
    }

    /// 统一路由：自定义处理器优先，否则走缺省插入。
    fn route(&self, item: ClassifiedItem, handler: Option<&ContentHandler>) {
        match handler {
            Some(h) => h(&item.content, item.kind, item.image.as_ref()),
            None => InsertionPolicy::insert(self.host.as_ref(), &item.content, item.kind),
        }
    }

    /// 粘贴路径的缺省插入：插入种类由来源通道决定（保留的来源怪癖）。
    fn route_paste_default(&self, item: ClassifiedItem) {
        let kind = paste_insertion_kind(item.origin);
        InsertionPolicy::insert(self.host.as_ref(), &item.content, kind);
    }
}

/// 来源通道 → 粘贴缺省插入种类。
fn paste_insertion_kind(origin: PayloadOrigin) -> ContentKind {
    match origin {
        PayloadOrigin::Blob => ContentKind::Image,
        PayloadOrigin::UrlText => ContentKind::Image,
        PayloadOrigin::PlainText => ContentKind::Text,
    }
}

/// 判断条目集合中是否携带富 HTML 内容。
fn contains_html_item(items: &[TransferredItem]) -> bool {
    items
        .iter()
        .any(|item| item.media_type.trim().eq_ignore_ascii_case("text/html"))
}
