//! In-memory drawing store.

use super::{
    BoxFuture, Drawing, DrawingStore, DrawingUpdate, NewDrawing, StorageError, StorageResult,
    sort_by_recency,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory store for testing and ephemeral servers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    drawings: RwLock<HashMap<String, Drawing>>,
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored drawings.
    pub fn len(&self) -> usize {
        self.drawings.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DrawingStore for MemoryStore {
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<Drawing>>> {
        Box::pin(async move {
            let drawings = self.drawings.read().map_err(lock_error)?;
            let mut all: Vec<Drawing> = drawings.values().cloned().collect();
            sort_by_recency(&mut all);
            Ok(all)
        })
    }

    fn create(&self, drawing: NewDrawing) -> BoxFuture<'_, StorageResult<Drawing>> {
        Box::pin(async move {
            let now = Utc::now();
            let record = Drawing {
                id: Uuid::new_v4().to_string(),
                name: drawing.name,
                data: drawing.data,
                created_at: now,
                updated_at: now,
            };
            let mut drawings = self.drawings.write().map_err(lock_error)?;
            drawings.insert(record.id.clone(), record.clone());
            Ok(record)
        })
    }

    fn read(&self, id: &str) -> BoxFuture<'_, StorageResult<Drawing>> {
        let id = id.to_string();
        Box::pin(async move {
            let drawings = self.drawings.read().map_err(lock_error)?;
            drawings
                .get(&id)
                .cloned()
                .ok_or(StorageError::NotFound(id))
        })
    }

    fn update(&self, update: DrawingUpdate) -> BoxFuture<'_, StorageResult<Drawing>> {
        Box::pin(async move {
            let mut drawings = self.drawings.write().map_err(lock_error)?;
            let record = drawings
                .get_mut(&update.id)
                .ok_or_else(|| StorageError::NotFound(update.id.clone()))?;
            record.name = update.name;
            record.data = update.data;
            record.updated_at = Utc::now();
            Ok(record.clone())
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut drawings = self.drawings.write().map_err(lock_error)?;
            drawings.remove(&id);
            Ok(())
        })
    }
}
