//! Abstract storage traits for the source and case registries.
//!
//! These traits define the contract that registry backends must
//! implement. The core ships an in-memory reference implementation;
//! trait seams keep the door open for persistent backends without
//! touching the engine or orchestrator.

use thiserror::Error;

use crate::case::{CaseId, GossipCase};
use crate::profile::{SourceId, SourceProfile};

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Source not found.
    #[error("Source not found: {0}")]
    SourceNotFound(SourceId),

    /// Case not found.
    #[error("Case not found: {0}")]
    CaseNotFound(CaseId),

    /// Backend error.
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// Storage trait for source-reliability profiles.
///
/// The registry is the single logical owner of source-trust state:
/// scoring reads it, feedback writes it. Read-modify-write sequences
/// spanning multiple calls carry no atomicity guarantee beyond the
/// caller's execution model.
pub trait SourceStore: Send + Sync {
    /// Insert or replace a profile, keyed by its source id.
    fn upsert(&self, profile: SourceProfile) -> Result<(), StorageError>;

    /// Get a profile by id. `Ok(None)` when unregistered.
    fn get(&self, id: &SourceId) -> Result<Option<SourceProfile>, StorageError>;

    /// Returns true if the source is registered.
    fn contains(&self, id: &SourceId) -> Result<bool, StorageError>;

    /// All profiles in ascending id order.
    fn list(&self) -> Result<Vec<SourceProfile>, StorageError>;

    /// Shift a source's reliability by `delta`, clamping the result into
    /// [0.0, 1.0]. Returns the updated profile.
    ///
    /// # Errors
    ///
    /// `SourceNotFound` if the source is not registered.
    fn adjust_reliability(&self, id: &SourceId, delta: f32)
        -> Result<SourceProfile, StorageError>;

    /// Number of registered sources.
    fn len(&self) -> Result<usize, StorageError>;

    /// Returns true if no sources are registered.
    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

/// Storage trait for case records.
pub trait CaseStore: Send + Sync {
    /// Insert a case, overwriting any case stored under the same id.
    /// Returns the displaced case when an overwrite occurred.
    fn put(&self, case: GossipCase) -> Result<Option<GossipCase>, StorageError>;

    /// Get a case by id. `Ok(None)` when absent.
    fn get(&self, id: &CaseId) -> Result<Option<GossipCase>, StorageError>;

    /// Replace an existing case.
    ///
    /// # Errors
    ///
    /// `CaseNotFound` if no case is stored under the id.
    fn update(&self, case: GossipCase) -> Result<(), StorageError>;

    /// All cases in ascending id order. The ordering is deterministic so
    /// that priority sorts over it stay stable.
    fn list(&self) -> Result<Vec<GossipCase>, StorageError>;

    /// Number of stored cases.
    fn len(&self) -> Result<usize, StorageError>;

    /// Returns true if no cases are stored.
    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}
