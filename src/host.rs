//! # 宿主编辑面能力契约
//!
//! ## 设计思路
//!
//! 富文本编辑面只以一个小能力契约出现：选区读写、文档长度、
//! 嵌入/文本插入。本库从不持有文档状态，每次插入都现场读取选区。
//!
//! 实现方自行决定内部可变性（测试替身通常用 `RefCell`）。

use serde::{Deserialize, Serialize};

/// 选区：文档内起始偏移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub index: usize,
}

/// 插入归属：交互用户或程序调用。
///
/// 影响宿主的撤销/重做记账，本库的插入一律归属 `User`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSource {
    User,
    Api,
}

impl EditSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Api => "api",
        }
    }
}

/// 宿主编辑面契约。
pub trait HostSurface {
    /// 当前选区；`focus` 要求宿主先把焦点拉回编辑面再取值。
    fn get_selection(&self, focus: bool) -> Option<Selection>;

    /// 文档长度。
    fn get_length(&self) -> usize;

    /// 折叠选区到指定偏移。
    fn set_selection(&self, index: usize);

    /// 在偏移处插入嵌入对象（如图片）。
    fn insert_embed(&self, index: usize, kind: &str, payload: &str, source: EditSource);

    /// 在偏移处插入字面文本。
    fn insert_text(&self, index: usize, text: &str, source: EditSource);
}
