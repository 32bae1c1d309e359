// Snapshot store
// Opaque JSON auto-save slots, one per document. The payload is never interpreted.

pub mod handlers;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub key: String,
    pub payload: Value,
    pub saved_at: DateTime<Utc>,
}

/// Storage key of a document's auto-save slot.
pub fn autosave_key(document_id: Uuid) -> String {
    format!("autosave:{document_id}")
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Key-value store for auto-save payloads. Carried in `AppState` as
/// `Arc<dyn SnapshotStore>` so a persistent backend can replace the in-memory one.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Stores `payload` under `key`, replacing any previous snapshot.
    async fn put(&self, key: &str, payload: Value) -> Result<Snapshot, AppError>;

    async fn get(&self, key: &str) -> Result<Option<Snapshot>, AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// InMemorySnapshotStore
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store. Snapshots are lost on restart.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    slots: RwLock<HashMap<String, Snapshot>>,
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn put(&self, key: &str, payload: Value) -> Result<Snapshot, AppError> {
        let snapshot = Snapshot {
            key: key.to_string(),
            payload,
            saved_at: Utc::now(),
        };
        self.slots
            .write()
            .await
            .insert(key.to_string(), snapshot.clone());
        Ok(snapshot)
    }

    async fn get(&self, key: &str) -> Result<Option<Snapshot>, AppError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}
