//! In-memory registry backends.
//!
//! Thread-safe reference implementations of the storage traits, backed
//! by `RwLock<BTreeMap>`. BTreeMap keeps `list` output in ascending key
//! order, which makes queue ordering deterministic.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::case::{CaseId, GossipCase};
use crate::profile::{SourceId, SourceProfile};
use crate::storage::traits::{CaseStore, SourceStore, StorageError};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::BackendError(format!("poisoned lock: {context}"))
}

/// Thread-safe in-memory source registry.
#[derive(Debug, Default)]
pub struct InMemorySourceStore {
    profiles: RwLock<BTreeMap<SourceId, SourceProfile>>,
}

impl InMemorySourceStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given profiles.
    #[must_use]
    pub fn from_profiles(profiles: impl IntoIterator<Item = SourceProfile>) -> Self {
        let map = profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self {
            profiles: RwLock::new(map),
        }
    }
}

impl SourceStore for InMemorySourceStore {
    fn upsert(&self, profile: SourceProfile) -> Result<(), StorageError> {
        let mut guard = self.profiles.write().map_err(|_| lock_err("source.upsert"))?;
        guard.insert(profile.id.clone(), profile);
        Ok(())
    }

    fn get(&self, id: &SourceId) -> Result<Option<SourceProfile>, StorageError> {
        let guard = self.profiles.read().map_err(|_| lock_err("source.get"))?;
        Ok(guard.get(id).cloned())
    }

    fn contains(&self, id: &SourceId) -> Result<bool, StorageError> {
        let guard = self
            .profiles
            .read()
            .map_err(|_| lock_err("source.contains"))?;
        Ok(guard.contains_key(id))
    }

    fn list(&self) -> Result<Vec<SourceProfile>, StorageError> {
        let guard = self.profiles.read().map_err(|_| lock_err("source.list"))?;
        Ok(guard.values().cloned().collect())
    }

    fn adjust_reliability(
        &self,
        id: &SourceId,
        delta: f32,
    ) -> Result<SourceProfile, StorageError> {
        let mut guard = self
            .profiles
            .write()
            .map_err(|_| lock_err("source.adjust_reliability"))?;
        let profile = guard
            .get_mut(id)
            .ok_or_else(|| StorageError::SourceNotFound(id.clone()))?;
        profile.reliability = (profile.reliability + delta).clamp(0.0, 1.0);
        Ok(profile.clone())
    }

    fn len(&self) -> Result<usize, StorageError> {
        let guard = self.profiles.read().map_err(|_| lock_err("source.len"))?;
        Ok(guard.len())
    }
}

/// Thread-safe in-memory case registry.
#[derive(Debug, Default)]
pub struct InMemoryCaseStore {
    cases: RwLock<BTreeMap<CaseId, GossipCase>>,
}

impl InMemoryCaseStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CaseStore for InMemoryCaseStore {
    fn put(&self, case: GossipCase) -> Result<Option<GossipCase>, StorageError> {
        let mut guard = self.cases.write().map_err(|_| lock_err("case.put"))?;
        Ok(guard.insert(case.id.clone(), case))
    }

    fn get(&self, id: &CaseId) -> Result<Option<GossipCase>, StorageError> {
        let guard = self.cases.read().map_err(|_| lock_err("case.get"))?;
        Ok(guard.get(id).cloned())
    }

    fn update(&self, case: GossipCase) -> Result<(), StorageError> {
        let mut guard = self.cases.write().map_err(|_| lock_err("case.update"))?;
        let slot = guard
            .get_mut(&case.id)
            .ok_or_else(|| StorageError::CaseNotFound(case.id.clone()))?;
        *slot = case;
        Ok(())
    }

    fn list(&self) -> Result<Vec<GossipCase>, StorageError> {
        let guard = self.cases.read().map_err(|_| lock_err("case.list"))?;
        Ok(guard.values().cloned().collect())
    }

    fn len(&self) -> Result<usize, StorageError> {
        let guard = self.cases.read().map_err(|_| lock_err("case.len"))?;
        Ok(guard.len())
    }
}
