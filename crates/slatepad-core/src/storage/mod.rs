//! Storage abstraction for persisted drawings.

mod autosave;
mod memory;
mod timer;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use autosave::{
    AutoSaveManager, AutosaveStep, BoundDrawing, DEFAULT_INACTIVITY_WINDOW_SECS, DEFAULT_MAX_NAME_LEN,
    SaveKind, SaveRequest, SaveStatus, SaveTarget,
};
pub use memory::MemoryStore;
pub use timer::ActivityTimer;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Drawing not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for store operations. `Send` on native so stores can back
/// a multi-threaded server.
#[cfg(not(target_arch = "wasm32"))]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Boxed future for store operations (WASM is single-threaded).
#[cfg(target_arch = "wasm32")]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A named, persisted drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub id: String,
    pub name: String,
    /// Serialized [`WhiteboardDocument`](crate::document::WhiteboardDocument).
    pub data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a drawing. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDrawing {
    pub name: String,
    pub data: String,
}

/// Payload for replacing an existing drawing's name and data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingUpdate {
    pub id: String,
    pub name: String,
    pub data: String,
}

/// Sort newest-updated first.
pub(crate) fn sort_by_recency(drawings: &mut [Drawing]) {
    drawings.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Trait for drawing store backends.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait DrawingStore: Send + Sync {
    /// All drawings, most recently updated first.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<Drawing>>>;

    /// Create a drawing and return the stored record.
    fn create(&self, drawing: NewDrawing) -> BoxFuture<'_, StorageResult<Drawing>>;

    /// Load a drawing.
    fn read(&self, id: &str) -> BoxFuture<'_, StorageResult<Drawing>>;

    /// Replace name and data of an existing drawing. `NotFound` if the id is unknown.
    fn update(&self, update: DrawingUpdate) -> BoxFuture<'_, StorageResult<Drawing>>;

    /// Delete a drawing. Deleting an unknown id succeeds.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;
}

/// Trait for drawing store backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait DrawingStore {
    /// All drawings, most recently updated first.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<Drawing>>>;

    /// Create a drawing and return the stored record.
    fn create(&self, drawing: NewDrawing) -> BoxFuture<'_, StorageResult<Drawing>>;

    /// Load a drawing.
    fn read(&self, id: &str) -> BoxFuture<'_, StorageResult<Drawing>>;

    /// Replace name and data of an existing drawing. `NotFound` if the id is unknown.
    fn update(&self, update: DrawingUpdate) -> BoxFuture<'_, StorageResult<Drawing>>;

    /// Delete a drawing. Deleting an unknown id succeeds.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;
}

/// Minimal executor for driving store futures in tests.
#[cfg(test)]
pub(crate) fn block_on<F: std::future::Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
