//! # 负载分类模块
//!
//! ## 设计思路
//!
//! 逐条目判定传输负载是图片字节流、纯文本还是无关内容：
//! - 媒体类型命中图片允许清单 → 解码为 Data URL，产出 `Image`；
//! - 恰为 `text/plain` → 异步探测字符串是否指向可达图片资源，
//!   命中则以 URL 为内容产出 `Image`，否则产出 `Text`；
//! - 其余类型 → 忽略，不产出任何结果。
//!
//! URL 可达性判定的策略归外部所有，通过 [`UrlProbe`] 注入。
//!
//! ## 实现思路
//!
//! - 允许清单用 `once_cell::sync::Lazy` 预编译正则，一次编译零成本复用。
//! - 条目间用 `join_all` 并发处理，互不影响；单个条目内部
//!   “分类 → 解码”严格有序。任何条目的失败都不会波及兄弟条目。

use async_trait::async_trait;
use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::image_data::ImageData;
use crate::transfer::{ClassifiedItem, ContentKind, PayloadOrigin, TransferPayload, TransferredItem};

/// 图片媒体类型允许清单：gif / jpeg / png（含动图）/ svg / webp / bmp。
static IMAGE_MEDIA_TYPES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^image/(gif|jpe?g|a?png|svg(\+xml)?|webp|bmp)").unwrap()
});

/// 判断媒体类型是否在图片允许清单内。
pub fn is_image_media_type(media_type: &str) -> bool {
    IMAGE_MEDIA_TYPES.is_match(media_type.trim())
}

/// 判断媒体类型是否恰为纯文本。
pub fn is_plain_text_media_type(media_type: &str) -> bool {
    media_type.trim().eq_ignore_ascii_case("text/plain")
}

/// URL 可达性探测：字符串是否指向可取回的图片资源。
///
/// 判定策略（请求方式、超时等）完全由实现方所有。
#[async_trait(?Send)]
pub trait UrlProbe {
    async fn url_is_image(&self, url: &str) -> bool;
}

/// 负载分类器。
pub struct PayloadClassifier {
    probe: Arc<dyn UrlProbe>,
}

impl PayloadClassifier {
    pub fn new(probe: Arc<dyn UrlProbe>) -> Self {
        Self { probe }
    }

    /// 并发分类一批条目，返回全部产出（无跨条目顺序保证）。
    pub async fn classify_items(&self, items: &[TransferredItem]) -> Vec<ClassifiedItem> {
        let futures = items.iter().map(|item| self.classify_item(item));
        join_all(futures).await.into_iter().flatten().collect()
    }

    /// 单条目分类；无产出返回 `None`。
    async fn classify_item(&self, item: &TransferredItem) -> Option<ClassifiedItem> {
        if is_image_media_type(&item.media_type) {
            return self.classify_image_item(item);
        }

        if is_plain_text_media_type(&item.media_type) {
            return self.classify_text_item(item).await;
        }

        log::debug!("忽略无关条目：{}", item.media_type);
        None
    }

    fn classify_image_item(&self, item: &TransferredItem) -> Option<ClassifiedItem> {
        let TransferPayload::Blob(bytes) = &item.payload else {
            // 字节访问器没给出 Blob：预期分支，条目丢弃
            log::debug!("图片条目 {} 缺少字节流负载，丢弃", item.media_type);
            return None;
        };

        let image = ImageData::from_bytes(bytes, Some(&item.media_type));
        Some(ClassifiedItem {
            content: image.data_url().to_string(),
            kind: ContentKind::Image,
            origin: PayloadOrigin::Blob,
            image: Some(image),
        })
    }

    async fn classify_text_item(&self, item: &TransferredItem) -> Option<ClassifiedItem> {
        let TransferPayload::Text(text) = &item.payload else {
            return None;
        };

        if self.probe.url_is_image(text).await {
            log::debug!("📷 纯文本命中图片地址探测");
            Some(ClassifiedItem {
                content: text.clone(),
                kind: ContentKind::Image,
                origin: PayloadOrigin::UrlText,
                image: None,
            })
        } else {
            Some(ClassifiedItem {
                content: text.clone(),
                kind: ContentKind::Text,
                origin: PayloadOrigin::PlainText,
                image: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 以固定前缀判定图片地址的探测替身。
    struct PrefixProbe;

    #[async_trait(?Send)]
    impl UrlProbe for PrefixProbe {
        async fn url_is_image(&self, url: &str) -> bool {
            url.starts_with("https://img.example/")
        }
    }

    fn classifier() -> PayloadClassifier {
        PayloadClassifier::new(Arc::new(PrefixProbe))
    }

    #[test]
    fn allow_list_accepts_expected_media_types() {
        for media_type in [
            "image/gif",
            "image/jpeg",
            "image/jpg",
            "image/png",
            "image/apng",
            "image/svg+xml",
            "image/webp",
            "image/bmp",
            "IMAGE/PNG",
        ] {
            assert!(is_image_media_type(media_type), "{media_type} should match");
        }
    }

    #[test]
    fn allow_list_rejects_other_media_types() {
        for media_type in ["image/tiff", "text/plain", "text/html", "application/pdf", ""] {
            assert!(!is_image_media_type(media_type), "{media_type} should not match");
        }
    }

    #[test]
    fn plain_text_match_is_exact_and_case_insensitive() {
        assert!(is_plain_text_media_type("text/plain"));
        assert!(is_plain_text_media_type("TEXT/PLAIN"));
        assert!(!is_plain_text_media_type("text/plain;charset=utf-8"));
        assert!(!is_plain_text_media_type("text/html"));
    }

    #[tokio::test]
    async fn image_blob_classifies_as_image_with_data_url() {
        let items = [TransferredItem::blob("image/png", vec![1_u8, 2, 3])];

        let classified = classifier().classify_items(&items).await;

        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].kind, ContentKind::Image);
        assert_eq!(classified[0].origin, PayloadOrigin::Blob);
        assert!(classified[0].content.starts_with("data:image/png;base64,"));
        assert!(classified[0].image.is_some());
    }

    #[tokio::test]
    async fn image_item_without_blob_is_dropped_silently() {
        let items = [TransferredItem::unsupported("image/png")];

        let classified = classifier().classify_items(&items).await;

        assert!(classified.is_empty());
    }

    #[tokio::test]
    async fn reachable_image_url_classifies_as_image_by_reference() {
        let items = [TransferredItem::text(
            "text/plain",
            "https://img.example/cat.png",
        )];

        let classified = classifier().classify_items(&items).await;

        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].kind, ContentKind::Image);
        assert_eq!(classified[0].origin, PayloadOrigin::UrlText);
        assert_eq!(classified[0].content, "https://img.example/cat.png");
        assert!(classified[0].image.is_none());
    }

    #[tokio::test]
    async fn unreachable_text_classifies_as_plain_text() {
        let items = [TransferredItem::text("text/plain", "just some words")];

        let classified = classifier().classify_items(&items).await;

        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].kind, ContentKind::Text);
        assert_eq!(classified[0].origin, PayloadOrigin::PlainText);
    }

    #[tokio::test]
    async fn irrelevant_media_types_emit_nothing() {
        let items = [
            TransferredItem::text("text/html", "<p>hi</p>"),
            TransferredItem::blob("application/pdf", vec![0_u8]),
        ];

        let classified = classifier().classify_items(&items).await;

        assert!(classified.is_empty());
    }

    #[tokio::test]
    async fn one_failed_item_never_aborts_siblings() {
        let items = [
            TransferredItem::unsupported("image/png"),
            TransferredItem::blob("image/gif", vec![9_u8]),
            TransferredItem::text("text/plain", "hello"),
        ];

        let classified = classifier().classify_items(&items).await;

        assert_eq!(classified.len(), 2);
    }
}
