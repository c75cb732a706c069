//! # Courseflow Cache
//!
//! Best-effort durable storage: the whole [`Snapshot`] serialized under a
//! single logical key with a write timestamp, plus a handful of
//! independent keys for user preferences.
//!
//! [`Snapshot`]: courseflow_protocols::Snapshot

mod prefs;
mod store;

pub use prefs::FilePrefsStore;
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
