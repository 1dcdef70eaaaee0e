//! # 协调器模块
//!
//! ## 设计思路
//!
//! `ImageDropAndPaste` 把一个宿主编辑面实例、平台能力与选项绑定在一起，
//! 对外暴露拖放/粘贴两个入口。构造即就绪（attached）；
//! `detach` 提供来源实现所缺的显式拆卸——拆卸后事件被整体忽略，
//! `attach` 可重新启用。
//!
//! ## 实现思路
//!
//! - 自定义处理器存在时完全接管插入，调用方自行负责落盘到编辑面。
//! - 协调器只做生命周期与转发，编排逻辑在 `EventIngestor`。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::classify::{PayloadClassifier, UrlProbe};
use crate::host::HostSurface;
use crate::image_data::ImageData;
use crate::ingest::EventIngestor;
use crate::platform::PlatformCapabilities;
use crate::transfer::{ContentKind, DropEvent, PasteEvent};

/// 自定义内容处理器：(内容, 种类, 现成图片表示)。
///
/// 提供处理器即完全覆盖缺省插入策略。
pub type ContentHandler = Box<dyn Fn(&str, ContentKind, Option<&ImageData>)>;

/// 协调器选项。
#[derive(Default)]
pub struct ModuleOptions {
    /// 可选的自定义处理器。
    pub handler: Option<ContentHandler>,
}

/// 拖放/粘贴协调器：宿主框架集成的公共入口。
pub struct ImageDropAndPaste {
    ingestor: EventIngestor,
    options: ModuleOptions,
    attached: AtomicBool,
}

impl ImageDropAndPaste {
    /// 绑定宿主编辑面、平台能力、URL 探测与选项。
    pub fn new(
        host: Arc<dyn HostSurface>,
        platform: Arc<PlatformCapabilities>,
        probe: Arc<dyn UrlProbe>,
        options: ModuleOptions,
    ) -> Self {
        let classifier = PayloadClassifier::new(probe);
        Self {
            ingestor: EventIngestor::new(host, platform, classifier),
            options,
            attached: AtomicBool::new(true),
        }
    }

    /// 拖放事件入口。
    pub async fn handle_drop(&self, event: &mut DropEvent) {
        if !self.is_attached() {
            log::debug!("协调器已拆卸，忽略拖放事件");
            return;
        }

        self.ingestor
            .on_drop(event, self.options.handler.as_ref())
            .await;
    }

    /// 粘贴事件入口。
    pub async fn handle_paste(&self, event: &mut PasteEvent) {
        if !self.is_attached() {
            log::debug!("协调器已拆卸，忽略粘贴事件");
            return;
        }

        self.ingestor
            .on_paste(event, self.options.handler.as_ref())
            .await;
    }

    /// 重新挂载事件处理。
    pub fn attach(&self) {
        self.attached.store(true, Ordering::Relaxed);
        log::info!("🔗 拖放/粘贴协调器已挂载");
    }

    /// 拆卸事件处理：之后的拖放/粘贴事件被整体忽略。
    pub fn detach(&self) {
        self.attached.store(false, Ordering::Relaxed);
        log::info!("🔌 拖放/粘贴协调器已拆卸");
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{EditSource, Selection};
    use crate::transfer::{CaretPoint, TransferredItem};
    use async_trait::async_trait;
    use std::cell::RefCell;

    struct NeverImageProbe;

    #[async_trait(?Send)]
    impl UrlProbe for NeverImageProbe {
        async fn url_is_image(&self, _url: &str) -> bool {
            false
        }
    }

    struct CountingHost {
        insertions: RefCell<usize>,
    }

    impl CountingHost {
        fn new() -> Self {
            Self {
                insertions: RefCell::new(0),
            }
        }
    }

    impl HostSurface for CountingHost {
        fn get_selection(&self, _focus: bool) -> Option<Selection> {
            Some(Selection { index: 0 })
        }

        fn get_length(&self) -> usize {
            0
        }

        fn set_selection(&self, _index: usize) {}

        fn insert_embed(&self, _index: usize, _kind: &str, _payload: &str, _source: EditSource) {
            *self.insertions.borrow_mut() += 1;
        }

        fn insert_text(&self, _index: usize, _text: &str, _source: EditSource) {
            *self.insertions.borrow_mut() += 1;
        }
    }

    fn module(host: Arc<CountingHost>) -> ImageDropAndPaste {
        ImageDropAndPaste::new(
            host,
            Arc::new(PlatformCapabilities::native()),
            Arc::new(NeverImageProbe),
            ModuleOptions::default(),
        )
    }

    fn png_drop_event() -> DropEvent {
        DropEvent::new(
            vec![TransferredItem::blob("image/png", vec![1_u8, 2, 3])],
            CaretPoint { x: 0.0, y: 0.0 },
        )
    }

    #[tokio::test]
    async fn module_starts_attached_and_processes_events() {
        let host = Arc::new(CountingHost::new());
        let module = module(host.clone());

        assert!(module.is_attached());

        let mut event = png_drop_event();
        module.handle_drop(&mut event).await;

        assert_eq!(*host.insertions.borrow(), 1);
    }

    #[tokio::test]
    async fn detached_coordinator_ignores_events() {
        let host = Arc::new(CountingHost::new());
        let module = module(host.clone());
        module.detach();

        let mut drop_event = png_drop_event();
        module.handle_drop(&mut drop_event).await;

        let mut paste_event =
            PasteEvent::new(vec![TransferredItem::blob("image/png", vec![1_u8])]);
        module.handle_paste(&mut paste_event).await;

        assert_eq!(*host.insertions.borrow(), 0);
        assert!(!drop_event.default_suppressed());
        assert!(!paste_event.default_suppressed());
    }

    #[tokio::test]
    async fn reattach_restores_event_processing() {
        let host = Arc::new(CountingHost::new());
        let module = module(host.clone());

        module.detach();
        module.attach();

        let mut event = png_drop_event();
        module.handle_drop(&mut event).await;

        assert_eq!(*host.insertions.borrow(), 1);
    }
}
