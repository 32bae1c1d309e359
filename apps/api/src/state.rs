use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::config::Config;
use crate::editor::Editor;
use crate::errors::AppError;
use crate::storage::{InMemorySnapshotStore, SnapshotStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub editors: EditorRegistry,
    /// Pluggable auto-save backend. Default: InMemorySnapshotStore.
    pub snapshots: Arc<dyn SnapshotStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            editors: EditorRegistry::default(),
            snapshots: Arc::new(InMemorySnapshotStore::default()),
        }
    }
}

/// Live editors by document id.
///
/// The lock is held for one synchronous editor operation at a time and never
/// across an `.await`.
#[derive(Clone, Default)]
pub struct EditorRegistry {
    inner: Arc<Mutex<HashMap<Uuid, Editor>>>,
}

impl EditorRegistry {
    pub fn insert(&self, editor: Editor) -> Result<Uuid, AppError> {
        let id = editor.id();
        self.lock()?.insert(id, editor);
        Ok(id)
    }

    pub fn contains(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.lock()?.contains_key(&id))
    }

    /// Takes the editor for `id` out of the registry, if present.
    pub fn remove(&self, id: Uuid) -> Result<Option<Editor>, AppError> {
        Ok(self.lock()?.remove(&id))
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.len())
    }

    /// Runs `f` against the editor for `id`.
    pub fn with_editor<T, F>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Editor) -> Result<T, AppError>,
    {
        let mut editors = self.lock()?;
        let editor = editors
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
        f(editor)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Editor>>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("editor registry lock poisoned")))
    }
}
