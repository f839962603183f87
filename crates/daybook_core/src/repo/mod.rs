//! Storage adapter layer.
//!
//! # Responsibility
//! - Define the string-keyed blob store contract used by every tracker.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Values are opaque JSON text at this layer; shaping happens above.
//! - Writes are last-write-wins upserts keyed by the full string key.

pub mod kv_repo;
