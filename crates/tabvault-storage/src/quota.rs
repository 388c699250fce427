//! Quota-limited store wrapper
//!
//! Models the synced storage area: the sum over all keys of
//! `key length + JSON length` must stay within the quota.

use serde_json::Value;

use crate::error::StorageError;
use crate::store::KeyValueStore;
use crate::Result;

/// Total byte quota of the synced storage area
pub const SYNC_QUOTA_BYTES: usize = 102_400;

/// Bytes a single entry counts against the quota
pub fn measure_bytes(key: &str, value: &Value) -> Result<usize> {
    Ok(key.len() + serde_json::to_string(value)?.len())
}

pub struct QuotaStore<S> {
    inner: S,
    quota: usize,
}

impl<S: KeyValueStore> QuotaStore<S> {
    pub fn new(inner: S, quota: usize) -> Self {
        Self { inner, quota }
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Bytes currently used across every key
    pub fn bytes_in_use(&self) -> Result<usize> {
        self.usage_excluding(None)
    }

    fn usage_excluding(&self, skip: Option<&str>) -> Result<usize> {
        let mut total = 0;
        for key in self.inner.keys()? {
            if Some(key.as_str()) == skip {
                continue;
            }
            if let Some(value) = self.inner.get(&key)? {
                total += measure_bytes(&key, &value)?;
            }
        }
        Ok(total)
    }
}

impl<S: KeyValueStore> KeyValueStore for QuotaStore<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let needed = self.usage_excluding(Some(key))? + measure_bytes(key, &value)?;
        if needed > self.quota {
            tracing::warn!(key = %key, needed, quota = self.quota, "Write rejected by quota");
            return Err(StorageError::QuotaExceeded {
                needed,
                quota: self.quota,
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys()
    }
}
