//! No-op cache: every read misses, every write is discarded.

use crate::cache::Cache;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Cache backend that stores nothing. Stands in wherever caching is
/// disabled but a `Cache` is expected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

impl NoOpCache {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Cache for NoOpCache {
    async fn get_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set_bytes(&self, _key: &str, _value: Vec<u8>, _ttl: Option<Duration>) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheExt;

    #[tokio::test]
    async fn test_always_misses() {
        let cache = NoOpCache::new();
        cache.set("key", &"value", None).await.unwrap();

        let value: Option<String> = cache.get("key").await.unwrap();
        assert_eq!(value, None);
    }
}
