//! Configuration Module
//!
//! Per-namespace TTLs and the sweep interval, fixed for the lifetime of a
//! cache service.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// Reference data is mostly static and lives long; per-user data and
/// statistics go stale quickly and are kept briefly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for per-locale language lists
    pub languages_ttl: Duration,
    /// TTL for per-locale interest names
    pub interests_ttl: Duration,
    /// TTL for per-locale interest category names
    pub interest_categories_ttl: Duration,
    /// TTL for per-locale translation tables
    pub translations_ttl: Duration,
    /// TTL for user profiles
    pub user_ttl: Duration,
    /// TTL for named statistic groups
    pub stats_ttl: Duration,
    /// TTL for per-user statistics
    pub user_stats_ttl: Duration,
    /// TTL for arbitrary config values
    pub config_ttl: Duration,
    /// Interval between sweeper runs
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// All values are whole seconds.
    /// - `CACHE_LANGUAGES_TTL_SECS` (default: 3600)
    /// - `CACHE_INTERESTS_TTL_SECS` (default: 3600)
    /// - `CACHE_INTEREST_CATEGORIES_TTL_SECS` (default: 3600)
    /// - `CACHE_TRANSLATIONS_TTL_SECS` (default: 3600)
    /// - `CACHE_USER_TTL_SECS` (default: 900)
    /// - `CACHE_STATS_TTL_SECS` (default: 300)
    /// - `CACHE_USER_STATS_TTL_SECS` (default: 300)
    /// - `CACHE_CONFIG_TTL_SECS` (default: 1800)
    /// - `CACHE_CLEANUP_INTERVAL_SECS` (default: 300)
    ///
    /// Missing or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            languages_ttl: secs_from_env("CACHE_LANGUAGES_TTL_SECS", defaults.languages_ttl),
            interests_ttl: secs_from_env("CACHE_INTERESTS_TTL_SECS", defaults.interests_ttl),
            interest_categories_ttl: secs_from_env(
                "CACHE_INTEREST_CATEGORIES_TTL_SECS",
                defaults.interest_categories_ttl,
            ),
            translations_ttl: secs_from_env(
                "CACHE_TRANSLATIONS_TTL_SECS",
                defaults.translations_ttl,
            ),
            user_ttl: secs_from_env("CACHE_USER_TTL_SECS", defaults.user_ttl),
            stats_ttl: secs_from_env("CACHE_STATS_TTL_SECS", defaults.stats_ttl),
            user_stats_ttl: secs_from_env("CACHE_USER_STATS_TTL_SECS", defaults.user_stats_ttl),
            config_ttl: secs_from_env("CACHE_CONFIG_TTL_SECS", defaults.config_ttl),
            cleanup_interval: secs_from_env(
                "CACHE_CLEANUP_INTERVAL_SECS",
                defaults.cleanup_interval,
            ),
        }
    }
}

fn secs_from_env(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            languages_ttl: Duration::from_secs(60 * 60),
            interests_ttl: Duration::from_secs(60 * 60),
            interest_categories_ttl: Duration::from_secs(60 * 60),
            translations_ttl: Duration::from_secs(60 * 60),
            user_ttl: Duration::from_secs(15 * 60),
            stats_ttl: Duration::from_secs(5 * 60),
            user_stats_ttl: Duration::from_secs(5 * 60),
            config_ttl: Duration::from_secs(30 * 60),
            cleanup_interval: Duration::from_secs(5 * 60),
        }
    }
}
