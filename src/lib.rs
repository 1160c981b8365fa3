//! Namespace Cache - a multi-namespace in-memory cache
//!
//! Caches reference data, per-user records and ad-hoc values with one TTL
//! per namespace, a background sweeper and an optional startup warm-up.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod telemetry;
pub mod warmup;

pub use cache::{CacheService, CacheStats};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::SweeperState;
pub use warmup::{warm_up, DataKind, DataLoader, WarmUpReport, DEFAULT_LOCALES};
