//! Autosave orchestration: when to persist, where, and under which name.
//!
//! Saves are split into a synchronous `begin_*` step that snapshots the
//! document into a [`SaveRequest`] and marks a save in flight, and
//! [`AutoSaveManager::complete_save`] which applies the store's answer. Hosts
//! that want fire-and-forget behaviour run [`SaveRequest::send`] on their own
//! executor; the `async` helpers do both halves in one call.

use super::timer::ActivityTimer;
use super::{Drawing, DrawingStore, DrawingUpdate, NewDrawing, StorageResult};
use crate::canvas::Canvas;
use crate::document::WhiteboardDocument;
use crate::error::{EditorError, EditorResult, validate_name};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default inactivity window before an autosave, in seconds.
pub const DEFAULT_INACTIVITY_WINDOW_SECS: u64 = 120;

/// Maximum drawing name length, in characters.
pub const DEFAULT_MAX_NAME_LEN: usize = 255;

/// Who asked for a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// The user, through the save dialog.
    Manual,
    /// The inactivity timer or page navigation.
    Auto,
}

/// Persistence state shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Never saved; no drawing record is bound.
    UnsavedNew,
    /// Bound to a drawing record, no save in flight.
    Saved,
    /// An explicit save is in flight.
    Saving,
    /// An autosave is in flight.
    AutoSaving,
}

/// The drawing record the open document belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundDrawing {
    pub id: String,
    pub name: String,
}

/// Store operation a save maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update { id: String },
}

/// A document snapshot on its way to the store.
///
/// The manager stays busy from the `begin_*` call that produced the request
/// until the result is handed to [`AutoSaveManager::complete_save`]. A
/// request that is dropped unanswered blocks every later save.
#[must_use = "send the request and pass the result to `complete_save`"]
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub kind: SaveKind,
    pub target: SaveTarget,
    pub name: String,
    /// Serialized document.
    pub data: String,
    /// Canvas revision the snapshot was taken at.
    pub revision: u64,
    /// Binding generation at begin; stale results do not rebind.
    epoch: u64,
}

impl SaveRequest {
    /// Perform the store call.
    pub async fn send<S: DrawingStore + ?Sized>(&self, store: &S) -> StorageResult<Drawing> {
        match &self.target {
            SaveTarget::Create => {
                store
                    .create(NewDrawing {
                        name: self.name.clone(),
                        data: self.data.clone(),
                    })
                    .await
            }
            SaveTarget::Update { id } => {
                store
                    .update(DrawingUpdate {
                        id: id.clone(),
                        name: self.name.clone(),
                        data: self.data.clone(),
                    })
                    .await
            }
        }
    }
}

/// What the inactivity timer wants done.
#[derive(Debug, Clone, PartialEq)]
pub enum AutosaveStep {
    /// Send this request, then hand the result to `complete_save`.
    Save(SaveRequest),
    /// Nothing is bound yet: ask the user for a name.
    PromptForName,
}

/// Decides when and where the open document is persisted.
pub struct AutoSaveManager<S: DrawingStore> {
    /// Storage backend.
    store: Arc<S>,
    /// Record the document is bound to, if any.
    bound: Option<BoundDrawing>,
    /// Canvas revision at the last successful save or load.
    saved_revision: Option<u64>,
    /// Save currently in flight.
    in_flight: Option<SaveKind>,
    /// Bumped whenever the binding changes outside a save.
    epoch: u64,
    timer: ActivityTimer,
    max_name_len: usize,
}

impl<S: DrawingStore> AutoSaveManager<S> {
    /// Create a manager with the default inactivity window.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_window(store, Duration::from_secs(DEFAULT_INACTIVITY_WINDOW_SECS))
    }

    /// Create a manager with a custom inactivity window.
    pub fn with_window(store: Arc<S>, window: Duration) -> Self {
        Self {
            store,
            bound: None,
            saved_revision: None,
            in_flight: None,
            epoch: 0,
            timer: ActivityTimer::new(window),
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }

    pub fn set_max_name_len(&mut self, max: usize) {
        self.max_name_len = max;
    }

    pub fn max_name_len(&self) -> usize {
        self.max_name_len
    }

    /// Get a reference to the storage backend.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn bound(&self) -> Option<&BoundDrawing> {
        self.bound.as_ref()
    }

    pub fn timer(&self) -> &ActivityTimer {
        &self.timer
    }

    pub fn status(&self) -> SaveStatus {
        match (self.in_flight, &self.bound) {
            (Some(SaveKind::Manual), _) => SaveStatus::Saving,
            (Some(SaveKind::Auto), _) => SaveStatus::AutoSaving,
            (None, Some(_)) => SaveStatus::Saved,
            (None, None) => SaveStatus::UnsavedNew,
        }
    }

    /// Whether a save is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Content exists and is either unbound or edited since the last save.
    pub fn has_unsaved_changes(&self, canvas: &Canvas) -> bool {
        canvas.has_content()
            && (self.bound.is_none() || self.saved_revision != Some(canvas.revision()))
    }

    /// Rearm the inactivity timer.
    pub fn record_activity(&mut self, now: Instant) {
        self.timer.touch(now);
    }

    /// The user dismissed the name prompt; wait another full window.
    pub fn decline_name(&mut self, now: Instant) {
        log::debug!("Name prompt declined, rearming autosave timer");
        self.timer.touch(now);
    }

    /// Check the inactivity timer. At most one step per quiet period.
    pub fn poll(&mut self, now: Instant, canvas: &Canvas) -> Option<AutosaveStep> {
        if !self.timer.take_due(now) {
            return None;
        }
        if self.is_busy() {
            log::debug!("Autosave dropped: a save is already in flight");
            return None;
        }
        if !canvas.has_content() {
            return None;
        }
        if self.bound.is_none() {
            log::info!("Unsaved drawing idle, prompting for a name");
            return Some(AutosaveStep::PromptForName);
        }
        self.begin_autosave(canvas).map(AutosaveStep::Save)
    }

    /// Start an explicit save: update the bound record, or create one.
    pub fn begin_save(&mut self, name: &str, canvas: &Canvas) -> EditorResult<SaveRequest> {
        let target = match &self.bound {
            Some(bound) => SaveTarget::Update {
                id: bound.id.clone(),
            },
            None => SaveTarget::Create,
        };
        self.begin(SaveKind::Manual, target, name, canvas)
    }

    /// Start an explicit save that always creates a new record.
    pub fn begin_save_as_new(&mut self, name: &str, canvas: &Canvas) -> EditorResult<SaveRequest> {
        self.begin(SaveKind::Manual, SaveTarget::Create, name, canvas)
    }

    /// Start a background save of the bound record. `None` when nothing is
    /// bound, nothing changed, or another save is in flight.
    pub fn begin_autosave(&mut self, canvas: &Canvas) -> Option<SaveRequest> {
        let bound = self.bound.as_ref()?;
        if self.is_busy() {
            log::debug!("Autosave dropped: a save is already in flight");
            return None;
        }
        if !self.has_unsaved_changes(canvas) {
            return None;
        }
        let target = SaveTarget::Update {
            id: bound.id.clone(),
        };
        let name = bound.name.clone();
        match self.begin(SaveKind::Auto, target, &name, canvas) {
            Ok(request) => Some(request),
            Err(e) => {
                log::warn!("Autosave not started: {}", e);
                None
            }
        }
    }

    fn begin(
        &mut self,
        kind: SaveKind,
        target: SaveTarget,
        name: &str,
        canvas: &Canvas,
    ) -> EditorResult<SaveRequest> {
        let name = validate_name(name, self.max_name_len)?;
        if self.is_busy() {
            return Err(EditorError::Busy);
        }
        let data = canvas
            .document()
            .to_json()
            .map_err(|e| super::StorageError::Serialization(e.to_string()))?;

        self.in_flight = Some(kind);
        log::info!("{:?} save of \"{}\" started ({:?})", kind, name, target);
        Ok(SaveRequest {
            kind,
            target,
            name,
            data,
            revision: canvas.revision(),
            epoch: self.epoch,
        })
    }

    /// Apply the store's answer to a request from `begin_*`.
    ///
    /// On success the record is bound and the revision checkpointed. On
    /// failure in-memory state is left alone; `EditorError::NotFound` means
    /// the bound record vanished and the caller may offer "save as new".
    pub fn complete_save(
        &mut self,
        request: &SaveRequest,
        result: StorageResult<Drawing>,
    ) -> EditorResult<Drawing> {
        self.in_flight = None;

        match result {
            Ok(drawing) => {
                log::info!("Saved \"{}\" ({})", drawing.name, drawing.id);
                if request.epoch == self.epoch {
                    self.bound = Some(BoundDrawing {
                        id: drawing.id.clone(),
                        name: drawing.name.clone(),
                    });
                    self.saved_revision = Some(request.revision);
                } else {
                    log::debug!("Document switched during save; keeping current binding");
                }
                Ok(drawing)
            }
            Err(e) => {
                match request.kind {
                    SaveKind::Auto => log::warn!("Autosave failed: {}", e),
                    SaveKind::Manual => log::error!("Save failed: {}", e),
                }
                Err(e.into())
            }
        }
    }

    /// Send a begun request and apply the result.
    pub async fn execute(&mut self, request: &SaveRequest) -> EditorResult<Drawing> {
        let store = Arc::clone(&self.store);
        let result = request.send(store.as_ref()).await;
        self.complete_save(request, result)
    }

    /// Explicit save through the name dialog.
    pub async fn save(&mut self, name: &str, canvas: &Canvas) -> EditorResult<Drawing> {
        let request = self.begin_save(name, canvas)?;
        self.execute(&request).await
    }

    /// Save into a fresh record, e.g. after the bound one was deleted elsewhere.
    pub async fn save_as_new(&mut self, name: &str, canvas: &Canvas) -> EditorResult<Drawing> {
        let request = self.begin_save_as_new(name, canvas)?;
        self.execute(&request).await
    }

    /// Background save of the bound record, if one is due.
    pub async fn autosave(&mut self, canvas: &Canvas) -> EditorResult<Option<Drawing>> {
        match self.begin_autosave(canvas) {
            Some(request) => self.execute(&request).await.map(Some),
            None => Ok(None),
        }
    }

    /// Read and parse a drawing without touching the binding.
    pub async fn fetch(&self, id: &str) -> EditorResult<(Drawing, WhiteboardDocument)> {
        let drawing = self.store.read(id).await?;
        let document = WhiteboardDocument::from_json(&drawing.data).map_err(|e| {
            log::warn!("Could not load drawing {}: {}", drawing.id, e);
            e
        })?;
        Ok((drawing, document))
    }

    /// Bind to a record just loaded into the canvas at `revision`.
    pub fn bind(&mut self, drawing: &Drawing, revision: u64) {
        self.epoch += 1;
        self.bound = Some(BoundDrawing {
            id: drawing.id.clone(),
            name: drawing.name.clone(),
        });
        self.saved_revision = Some(revision);
    }

    /// Forget the bound record (new drawing, or the record was deleted).
    pub fn unbind(&mut self) {
        self.epoch += 1;
        self.bound = None;
        self.saved_revision = None;
        self.timer.disarm();
    }

    /// Drawings whose name contains `filter`, case-insensitively, newest first.
    pub async fn list(&self, filter: &str) -> EditorResult<Vec<Drawing>> {
        let mut drawings = self.store.list().await?;
        let needle = filter.trim().to_lowercase();
        if !needle.is_empty() {
            drawings.retain(|d| d.name.to_lowercase().contains(&needle));
        }
        Ok(drawings)
    }

    /// Delete a drawing. Deleting the bound record unbinds the document.
    pub async fn delete(&mut self, id: &str) -> EditorResult<()> {
        self.store.delete(id).await?;
        if self.bound.as_ref().is_some_and(|b| b.id == id) {
            log::info!("Deleted the open drawing {}; document is now unsaved", id);
            self.unbind();
        }
        Ok(())
    }
}
