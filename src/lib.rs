//! # 富文本编辑面图片拖放/粘贴库 — 入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    宿主应用 / 编辑框架                     │
//! │                                                          │
//! │   HostSurface（选区·长度·插入原语）     PluginRegistry     │
//! │   UrlProbe（图片地址可达性探测）                           │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ drop / paste 事件
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕              本库 (Rust)                         │
//! │                                                          │
//! │  ┌─ module ───── ImageDropAndPaste（绑定·挂载/拆卸）       │
//! │  │                                                       │
//! │  ├─ ingest ───── 事件归一化 + 路由（HTML 让行·光标钉点）    │
//! │  │                                                       │
//! │  ├─ classify ─── 允许清单 + URL 探测 → (内容, 种类)        │
//! │  │                                                       │
//! │  ├─ insert ───── 缺省插入策略（嵌入/文本·归属用户）        │
//! │  │                                                       │
//! │  ├─ image_data ─ 规范化表示：minify / to_blob / to_file    │
//! │  │                                                       │
//! │  └─ platform ─── 注入式平台能力（Blob 链·文件·光标解析）    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`module`] | 协调器：绑定宿主实例与选项，挂载/拆卸生命周期 |
//! | [`ingest`] | 事件摄取：缺省抑制、HTML 让行、驱动分类与路由 |
//! | [`classify`] | 负载分类：图片允许清单、纯文本的图片地址探测 |
//! | [`insert`] | 缺省插入策略：偏移解析、嵌入/文本插入 |
//! | [`image_data`] | 规范化图片表示与变换（缩小、Blob、文件对象） |
//! | [`platform`] | 构造期注入的平台能力（Blob 构造链等） |
//! | [`host`] | 宿主编辑面能力契约 |
//! | [`registry`] | 显式插件注册 |

pub mod classify;
pub mod host;
pub mod image_data;
pub mod ingest;
pub mod insert;
pub mod module;
pub mod platform;
pub mod registry;
pub mod transfer;

pub use classify::{PayloadClassifier, UrlProbe, is_image_media_type};
pub use host::{EditSource, HostSurface, Selection};
pub use image_data::{ByteBlob, FileObject, ImageData, ImageDataError, MinifyOptions};
pub use module::{ContentHandler, ImageDropAndPaste, ModuleOptions};
pub use platform::{BlobConstructor, CaretResolver, FileConstructor, PlatformCapabilities};
pub use registry::{MODULE_NAME, PluginRegistry, register_with};
pub use transfer::{
    CaretPoint, ClassifiedItem, ContentKind, DropEvent, PasteEvent, PayloadOrigin,
    TransferPayload, TransferredItem,
};
