//! # Courseflow Sync
//!
//! The single-writer snapshot service: fans out upstream fetches
//! concurrently, merges with the non-clobbering policy, persists
//! best-effort, and derives presentation digests and deadline reminders
//! from the cached data.

pub mod deadlines;
pub mod digest;
mod service;

pub use service::SyncService;
