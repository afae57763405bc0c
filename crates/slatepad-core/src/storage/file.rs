//! File-based drawing store for native platforms.

use super::{
    BoxFuture, Drawing, DrawingStore, DrawingUpdate, NewDrawing, StorageError, StorageResult,
    sort_by_recency,
};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores each drawing as a JSON file in a directory.
#[derive(Debug)]
pub struct FileStore {
    /// Base directory for drawing files.
    base_path: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create a store in the default location.
    ///
    /// On Unix: `~/.local/share/slatepad/drawings/`
    /// On Windows: `%LOCALAPPDATA%\slatepad\drawings\`
    pub fn default_location() -> StorageResult<Self> {
        Self::new(Self::default_path()?)
    }

    /// The directory [`FileStore::default_location`] uses.
    pub fn default_path() -> StorageResult<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Ok(base.join("slatepad").join("drawings"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn drawing_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    fn write(path: &Path, drawing: &Drawing) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(drawing)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn load(path: &Path, id: &str) -> StorageResult<Drawing> {
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        let json = fs::read_to_string(path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl DrawingStore for FileStore {
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<Drawing>>> {
        Box::pin(async move {
            let entries = fs::read_dir(&self.base_path)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let mut drawings = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }
                match Self::load(&path, "") {
                    Ok(drawing) => drawings.push(drawing),
                    Err(e) => log::warn!("Skipping unreadable drawing file: {}", e),
                }
            }
            sort_by_recency(&mut drawings);
            Ok(drawings)
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
            Self::write(&self.drawing_path(&record.id), &record)?;
            Ok(record)
        })
    }

    fn read(&self, id: &str) -> BoxFuture<'_, StorageResult<Drawing>> {
        let path = self.drawing_path(id);
        let id = id.to_string();
        Box::pin(async move { Self::load(&path, &id) })
    }

    fn update(&self, update: DrawingUpdate) -> BoxFuture<'_, StorageResult<Drawing>> {
        let path = self.drawing_path(&update.id);
        Box::pin(async move {
            let mut record = Self::load(&path, &update.id)?;
            record.name = update.name;
            record.data = update.data;
            record.updated_at = Utc::now();
            Self::write(&path, &record)?;
            Ok(record)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.drawing_path(id);
        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }
}
