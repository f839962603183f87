//! Tracker use-case services.
//!
//! # Responsibility
//! - Orchestrate store reads/writes into per-tracker APIs.
//! - Keep UI shells decoupled from storage details.
//!
//! # Invariants
//! - Missing or malformed stored blobs degrade to defaults; reads from
//!   the store never take the application down.

use crate::repo::kv_repo::{KvStore, StoreError, StoreResult};
use log::warn;
use serde::de::DeserializeOwned;

pub mod journal_service;
pub mod prefs_service;
pub mod quest_service;
pub mod sleep_service;

/// Reads a JSON blob, treating missing or malformed data as the default.
///
/// Transport errors still surface; only decode failures degrade.
pub(crate) fn load_or_default<S, T>(store: &S, key: &str, module: &str) -> StoreResult<T>
where
    S: KvStore,
    T: DeserializeOwned + Default,
{
    match store.get_json(key) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Ok(T::default()),
        Err(StoreError::Serde { key, source }) => {
            warn!("event=blob_reset module={module} status=degraded key={key} error={source}");
            Ok(T::default())
        }
        Err(err) => Err(err),
    }
}
