//! Cache Module
//!
//! Provides the multi-namespace in-memory cache with per-namespace TTLs.

mod entry;
mod namespace;
mod service;
mod state;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use namespace::Namespace;
pub use service::CacheService;
pub use stats::{CacheStats, StatsCollector};

pub(crate) use state::CacheState;

// == Public Constants ==
/// Per-entry cost used for the approximate memory figure in [`CacheStats`].
pub const ESTIMATED_ENTRY_BYTES: u64 = 1024;
