//! 对象缓存层
//!
//! 通过 `declare_object_cache_plugin!` 在启动时自动注册后端，
//! 运行期根据 `cache.type` 选择 Moka 或 Redis。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明缓存插件并在程序加载时注册
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    let fut: $crate::cache::register::BoxedObjectCacheFuture =
                        Box::pin(async {
                            let cache = <$ty>::new()
                                .map_err($crate::errors::ErpError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        });
                    fut
                }),
            );
        }
    };
}
