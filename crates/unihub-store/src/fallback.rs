//! In-memory fallback store.
//!
//! Stand-in for the browser's key-value storage: per-user namespaced keys
//! holding JSON-serialized records, read only when the gateway is
//! unreachable at load time. The context marks everything read from here
//! as stale.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use unihub_core::defaults::FALLBACK_KEY_PREFIX;
use unihub_core::{FallbackStore, RecordKind, Result};

/// Fallback store backed by a process-local map.
#[derive(Default)]
pub struct MemoryFallbackStore {
    records: Mutex<HashMap<String, JsonValue>>,
}

impl MemoryFallbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(user_id: Uuid, kind: RecordKind) -> String {
        format!("{}:{}:{}", FALLBACK_KEY_PREFIX, user_id, kind)
    }

    /// Number of cached records, across all users.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl FallbackStore for MemoryFallbackStore {
    async fn load(&self, user_id: Uuid, kind: RecordKind) -> Result<Option<JsonValue>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&Self::key(user_id, kind))
            .cloned())
    }

    async fn save(&self, user_id: Uuid, kind: RecordKind, value: &JsonValue) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(Self::key(user_id, kind), value.clone());
        Ok(())
    }

    async fn remove_user(&self, user_id: Uuid) -> Result<()> {
        let prefix = format!("{}:{}:", FALLBACK_KEY_PREFIX, user_id);
        self.records
            .lock()
            .unwrap()
            .retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }
}
