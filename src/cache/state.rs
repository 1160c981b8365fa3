//! Cache State Module
//!
//! Everything guarded by the service lock: every namespace plus the stats
//! collector, so a mutation and the size recomputation it causes are atomic
//! together.

use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{Namespace, StatsCollector};
use crate::models::{Interests, Language, NamedStats, Translations, User, UserId};

// == Cache State ==
#[derive(Debug)]
pub(crate) struct CacheState {
    pub languages: Namespace<String, Vec<Language>>,
    pub interests: Namespace<String, Interests>,
    pub interest_categories: Namespace<String, Interests>,
    pub translations: Namespace<String, Translations>,
    pub users: Namespace<UserId, User>,
    pub stats: Namespace<String, NamedStats>,
    pub user_stats: Namespace<UserId, NamedStats>,
    pub config: Namespace<String, Value>,
    pub generic: Namespace<String, Value>,
    pub counters: StatsCollector,
}

impl CacheState {
    pub fn new() -> Self {
        Self {
            languages: Namespace::new("languages"),
            interests: Namespace::new("interests"),
            interest_categories: Namespace::new("interest_categories"),
            translations: Namespace::new("translations"),
            users: Namespace::new("users"),
            stats: Namespace::new("stats"),
            user_stats: Namespace::new("user_stats"),
            config: Namespace::new("config"),
            generic: Namespace::new("generic"),
            counters: StatsCollector::new(),
        }
    }

    /// Total entry count across every namespace.
    pub fn total_len(&self) -> usize {
        self.languages.len()
            + self.interests.len()
            + self.interest_categories.len()
            + self.translations.len()
            + self.users.len()
            + self.stats.len()
            + self.user_stats.len()
            + self.config.len()
            + self.generic.len()
    }

    /// Recomputes the size counter. Call after every mutation.
    pub fn refresh_size(&mut self) {
        let size = self.total_len();
        self.counters.set_size(size);
    }

    /// Removes expired entries from every namespace, records them as
    /// evictions and returns how many were removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let per_namespace = [
            (self.languages.name(), self.languages.sweep(now)),
            (self.interests.name(), self.interests.sweep(now)),
            (
                self.interest_categories.name(),
                self.interest_categories.sweep(now),
            ),
            (self.translations.name(), self.translations.sweep(now)),
            (self.users.name(), self.users.sweep(now)),
            (self.stats.name(), self.stats.sweep(now)),
            (self.user_stats.name(), self.user_stats.sweep(now)),
            (self.config.name(), self.config.sweep(now)),
            (self.generic.name(), self.generic.sweep(now)),
        ];

        let mut removed = 0;
        for (namespace, count) in per_namespace {
            if count > 0 {
                debug!(namespace, count, "Swept expired entries");
            }
            removed += count;
        }

        self.counters.record_evictions(removed);
        self.refresh_size();
        removed
    }

    /// Empties every namespace. Counters other than size are kept.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.languages.clear()
            + self.interests.clear()
            + self.interest_categories.clear()
            + self.translations.clear()
            + self.users.clear()
            + self.stats.clear()
            + self.user_stats.clear()
            + self.config.clear()
            + self.generic.clear();
        self.refresh_size();
        removed
    }
}
