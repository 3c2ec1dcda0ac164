//! 缓存后端注册表
//!
//! 各后端通过 `declare_object_cache_plugin!` 在程序加载时登记构造函数，
//! 启动时按 `cache.type`（不区分大小写）取出并构造。

use crate::cache::traits::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::BTreeMap,
    future::Future,
    pin::Pin,
    sync::{Arc, PoisonError, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<BTreeMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(BTreeMap::new()));

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    // 注册只写入映射，锁中毒时数据仍然完整
    OBJECT_CACHE_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into().to_lowercase(), constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&name.trim().to_lowercase())
        .cloned()
}

/// 已注册的后端名称，按字母序
pub fn registered_object_cache_plugins() -> Vec<String> {
    OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErpError;

    fn failing_constructor() -> ObjectCacheConstructor {
        Arc::new(|| {
            let fut: BoxedObjectCacheFuture =
                Box::pin(async { Err(ErpError::cache_connection("unavailable in tests")) });
            fut
        })
    }

    #[test]
    fn test_builtin_backends_registered() {
        let names = registered_object_cache_plugins();
        assert!(names.contains(&"moka".to_string()));
        assert!(names.contains(&"redis".to_string()));
    }

    #[test]
    fn test_lookup_ignores_case() {
        register_object_cache_plugin("Test-Backend", failing_constructor());
        assert!(get_object_cache_plugin("test-backend").is_some());
        assert!(get_object_cache_plugin(" TEST-BACKEND ").is_some());
        assert!(get_object_cache_plugin("memcached").is_none());
    }

    #[tokio::test]
    async fn test_constructor_errors_surface() {
        register_object_cache_plugin("broken", failing_constructor());
        let constructor = get_object_cache_plugin("broken").unwrap();
        let err = constructor().await.err().unwrap();
        assert_eq!(err.code(), "E001");
    }
}
