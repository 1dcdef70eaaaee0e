//! # 插入策略模块
//!
//! ## 设计思路
//!
//! 缺省插入路径：现场解析插入偏移（有选区用选区起点，否则文档末尾），
//! 图片走嵌入原语并把光标推进一格，文本走文本原语、光标位置由宿主决定。
//! 偏移从不缓存——多条目事件里每次插入都会读到最新选区。
//!
//! 所有插入都归属交互用户（`EditSource::User`），让宿主的撤销/重做
//! 把它们记成用户操作。

use crate::host::{EditSource, HostSurface};
use crate::transfer::ContentKind;

/// 嵌入对象的种类标签，与宿主嵌入原语的约定一致。
pub(crate) const IMAGE_EMBED_KIND: &str = "image";

/// 缺省插入策略。
pub struct InsertionPolicy;

impl InsertionPolicy {
    /// 把分类内容插入宿主编辑面。
    ///
    /// `Image` → 嵌入 + 光标推进一格；`Text` → 字面文本；其余种类空操作。
    pub fn insert(host: &dyn HostSurface, content: &str, kind: ContentKind) {
        let index = Self::resolve_index(host);

        match kind {
            ContentKind::Image => {
                host.insert_embed(index, IMAGE_EMBED_KIND, content, EditSource::User);
                host.set_selection(index + 1);
                log::debug!("🖼️ 已在偏移 {} 插入图片嵌入", index);
            }
            ContentKind::Text => {
                host.insert_text(index, content, EditSource::User);
                log::debug!("✏️ 已在偏移 {} 插入 {} 个字符的文本", index, content.chars().count());
            }
            ContentKind::Ignored => {}
        }
    }

    /// 解析插入偏移：现有选区起点，否则文档末尾。
    fn resolve_index(host: &dyn HostSurface) -> usize {
        match host.get_selection(true) {
            Some(selection) => selection.index,
            None => host.get_length(),
        }
    }
}
