//! # 模块注册模块
//!
//! ## 设计思路
//!
//! 注册是显式的：宿主应用持有自己的插件注册表并主动调用
//! [`register_with`]，而不是依赖进程级全局状态。注册表缺席时
//! 什么都不会发生——协调器的构造从不依赖注册。

use std::sync::Arc;

use crate::classify::UrlProbe;
use crate::host::HostSurface;
use crate::module::{ImageDropAndPaste, ModuleOptions};
use crate::platform::PlatformCapabilities;

/// 协调器在宿主插件体系下的约定名。
pub const MODULE_NAME: &str = "imageDropAndPaste";

/// 模块工厂：由注册表在宿主编辑面就绪时调用。
pub type ModuleFactory =
    Box<dyn Fn(Arc<dyn HostSurface>, Arc<dyn UrlProbe>, ModuleOptions) -> ImageDropAndPaste>;

/// 宿主侧插件注册表契约。
pub trait PluginRegistry {
    fn register(&mut self, name: &str, factory: ModuleFactory);
}

/// 在给定注册表下注册协调器工厂（使用本地缺省平台能力）。
pub fn register_with(registry: &mut dyn PluginRegistry) {
    registry.register(
        MODULE_NAME,
        Box::new(|host, probe, options| {
            ImageDropAndPaste::new(
                host,
                Arc::new(PlatformCapabilities::native()),
                probe,
                options,
            )
        }),
    );
    log::info!("📦 已注册模块：{}", MODULE_NAME);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{EditSource, Selection};
    use async_trait::async_trait;

    struct NeverImageProbe;

    #[async_trait(?Send)]
    impl UrlProbe for NeverImageProbe {
        async fn url_is_image(&self, _url: &str) -> bool {
            false
        }
    }

    struct NullHost;

    impl HostSurface for NullHost {
        fn get_selection(&self, _focus: bool) -> Option<Selection> {
            None
        }

        fn get_length(&self) -> usize {
            0
        }

        fn set_selection(&self, _index: usize) {}

        fn insert_embed(&self, _index: usize, _kind: &str, _payload: &str, _source: EditSource) {}

        fn insert_text(&self, _index: usize, _text: &str, _source: EditSource) {}
    }

    #[derive(Default)]
    struct FakeRegistry {
        entries: Vec<(String, ModuleFactory)>,
    }

    impl PluginRegistry for FakeRegistry {
        fn register(&mut self, name: &str, factory: ModuleFactory) {
            self.entries.push((name.to_string(), factory));
        }
    }

    #[test]
    fn registers_factory_under_well_known_name() {
        let mut registry = FakeRegistry::default();

        register_with(&mut registry);

        assert_eq!(registry.entries.len(), 1);
        assert_eq!(registry.entries[0].0, MODULE_NAME);
    }

    #[test]
    fn registered_factory_builds_an_attached_module() {
        let mut registry = FakeRegistry::default();
        register_with(&mut registry);

        let factory = &registry.entries[0].1;
        let module = factory(
            Arc::new(NullHost),
            Arc::new(NeverImageProbe),
            ModuleOptions::default(),
        );

        assert!(module.is_attached());
    }
}
