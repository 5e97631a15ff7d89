//! Response cache used for the plan catalog.
//!
//! The trait is object-safe so the facade can hold any backend behind
//! `Arc<dyn Cache>`. Only the byte-level methods are object-safe; typed
//! access goes through the [`CacheExt`] blanket extension.

mod in_memory;
mod noop;

pub use in_memory::InMemoryCache;
pub use noop::NoOpCache;

use crate::error::{Result, SubgateError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Byte-level cache operations.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a value. `ttl` of `None` means the backend's default lifetime.
    async fn set_bytes(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Release any backend connections. Called once, from the facade's close.
    async fn close(&self) -> Result<()>;

    fn is_healthy(&self) -> bool;
}

/// Typed access over any [`Cache`], via serde_json.
#[allow(async_fn_in_trait)]
pub trait CacheExt: Cache {
    /// Get and deserialize a value. A stored value that no longer
    /// deserializes is an error; callers on best-effort paths treat it as
    /// a miss.
    async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.get_bytes(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| SubgateError::Cache(format!("failed to decode '{key}': {e}"))),
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| SubgateError::Cache(format!("failed to encode '{key}': {e}")))?;
        self.set_bytes(key, bytes, ttl).await
    }
}

// Every Cache implementation gets the typed helpers for free.
impl<C: Cache + ?Sized> CacheExt for C {}
