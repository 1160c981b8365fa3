//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::warmup::DataKind;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// None of these are fatal: a `NotFound` is an ordinary miss and a `Load`
/// failure only reduces warm-up coverage.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key absent or expired in the generic store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Data loader failed during warm-up
    #[error("Failed to load {kind} for locale '{locale}': {reason}")]
    Load {
        kind: DataKind,
        locale: String,
        reason: anyhow::Error,
    },
}

impl CacheError {
    /// Returns true for a plain miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
