//! Cache Service Module
//!
//! The facade callers interact with. Owns every namespace and the stats
//! collector behind one read/write lock, and owns the sweeper's lifecycle.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::{CacheState, CacheStats, Namespace};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{Interests, Language, NamedStats, Translations, User, UserId};
use crate::tasks::{Sweeper, SweeperState};

// == Cache Service ==
/// Multi-namespace TTL cache.
///
/// Lookups take the shared side of the lock and never mutate entries; an
/// expired entry is reported as a miss and left for the sweeper. Every
/// mutation takes the exclusive side and recomputes the size counter before
/// releasing it.
#[derive(Debug)]
pub struct CacheService {
    state: Arc<RwLock<CacheState>>,
    config: CacheConfig,
    sweeper: Sweeper,
}

impl CacheService {
    // == Constructor ==
    /// Creates the service and starts its sweeper.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(config: CacheConfig) -> Self {
        let state = Arc::new(RwLock::new(CacheState::new()));
        let sweeper = Sweeper::spawn(state.clone(), config.cleanup_interval);

        Self {
            state,
            config,
            sweeper,
        }
    }

    /// Returns the configuration the service was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Lifecycle ==
    /// Stops the sweeper and waits for it to exit.
    ///
    /// Safe to call more than once; later calls do nothing. The cache stays
    /// usable afterwards but expired entries are no longer reclaimed.
    pub async fn stop(&self) {
        self.sweeper.stop().await;
    }

    /// Current sweeper lifecycle state.
    pub fn sweeper_state(&self) -> SweeperState {
        self.sweeper.state()
    }

    /// Resolves once the sweeper task has exited.
    pub async fn sweeper_stopped(&self) {
        self.sweeper.stopped().await;
    }

    // == Languages ==
    /// Cached language list for `locale`.
    pub async fn get_languages(&self, locale: &str) -> Option<Vec<Language>> {
        self.lookup(|s| &s.languages, locale).await
    }

    pub async fn set_languages(&self, locale: impl Into<String>, languages: Vec<Language>) {
        let ttl = self.config.languages_ttl;
        self.store(|s| &mut s.languages, locale.into(), languages, ttl)
            .await;
    }

    pub async fn invalidate_languages(&self, locale: &str) -> bool {
        self.invalidate(|s| &mut s.languages, locale).await
    }

    pub async fn invalidate_all_languages(&self) {
        self.invalidate_all(|s| &mut s.languages).await;
    }

    // == Interests ==
    /// Cached interest id to name mapping for `locale`.
    pub async fn get_interests(&self, locale: &str) -> Option<Interests> {
        self.lookup(|s| &s.interests, locale).await
    }

    pub async fn set_interests(&self, locale: impl Into<String>, interests: Interests) {
        let ttl = self.config.interests_ttl;
        self.store(|s| &mut s.interests, locale.into(), interests, ttl)
            .await;
    }

    pub async fn invalidate_interests(&self, locale: &str) -> bool {
        self.invalidate(|s| &mut s.interests, locale).await
    }

    pub async fn invalidate_all_interests(&self) {
        self.invalidate_all(|s| &mut s.interests).await;
    }

    // == Interest Categories ==
    /// Cached interest category id to name mapping for `locale`.
    pub async fn get_interest_categories(&self, locale: &str) -> Option<Interests> {
        self.lookup(|s| &s.interest_categories, locale).await
    }

    pub async fn set_interest_categories(
        &self,
        locale: impl Into<String>,
        categories: Interests,
    ) {
        let ttl = self.config.interest_categories_ttl;
        self.store(|s| &mut s.interest_categories, locale.into(), categories, ttl)
            .await;
    }

    pub async fn invalidate_interest_categories(&self, locale: &str) -> bool {
        self.invalidate(|s| &mut s.interest_categories, locale)
            .await
    }

    pub async fn invalidate_all_interest_categories(&self) {
        self.invalidate_all(|s| &mut s.interest_categories).await;
    }

    // == Translations ==
    /// Cached translation table for `locale`.
    pub async fn get_translations(&self, locale: &str) -> Option<Translations> {
        self.lookup(|s| &s.translations, locale).await
    }

    pub async fn set_translations(&self, locale: impl Into<String>, translations: Translations) {
        let ttl = self.config.translations_ttl;
        self.store(|s| &mut s.translations, locale.into(), translations, ttl)
            .await;
    }

    pub async fn invalidate_translations(&self, locale: &str) -> bool {
        self.invalidate(|s| &mut s.translations, locale).await
    }

    pub async fn invalidate_all_translations(&self) {
        self.invalidate_all(|s| &mut s.translations).await;
    }

    // == Users ==
    /// Cached profile for `user_id`.
    pub async fn get_user(&self, user_id: UserId) -> Option<User> {
        self.lookup(|s| &s.users, &user_id).await
    }

    /// Caches `user` under its own id.
    pub async fn set_user(&self, user: User) {
        let ttl = self.config.user_ttl;
        self.store(|s| &mut s.users, user.id, user, ttl).await;
    }

    pub async fn invalidate_user(&self, user_id: UserId) -> bool {
        self.invalidate(|s| &mut s.users, &user_id).await
    }

    pub async fn invalidate_all_users(&self) {
        self.invalidate_all(|s| &mut s.users).await;
    }

    // == Stats ==
    /// Cached statistic group, e.g. `"global"` or `"daily"`.
    pub async fn get_stats(&self, group: &str) -> Option<NamedStats> {
        self.lookup(|s| &s.stats, group).await
    }

    pub async fn set_stats(&self, group: impl Into<String>, stats: NamedStats) {
        let ttl = self.config.stats_ttl;
        self.store(|s| &mut s.stats, group.into(), stats, ttl).await;
    }

    pub async fn invalidate_stats(&self, group: &str) -> bool {
        self.invalidate(|s| &mut s.stats, group).await
    }

    pub async fn invalidate_all_stats(&self) {
        self.invalidate_all(|s| &mut s.stats).await;
    }

    // == User Stats ==
    /// Cached statistics derived for one user.
    pub async fn get_user_stats(&self, user_id: UserId) -> Option<NamedStats> {
        self.lookup(|s| &s.user_stats, &user_id).await
    }

    pub async fn set_user_stats(&self, user_id: UserId, stats: NamedStats) {
        let ttl = self.config.user_stats_ttl;
        self.store(|s| &mut s.user_stats, user_id, stats, ttl).await;
    }

    pub async fn invalidate_user_stats(&self, user_id: UserId) -> bool {
        self.invalidate(|s| &mut s.user_stats, &user_id).await
    }

    pub async fn invalidate_all_user_stats(&self) {
        self.invalidate_all(|s| &mut s.user_stats).await;
    }

    // == Config ==
    /// Cached config value for `key`.
    pub async fn get_config(&self, key: &str) -> Option<Value> {
        self.lookup(|s| &s.config, key).await
    }

    pub async fn set_config(&self, key: impl Into<String>, value: Value) {
        let ttl = self.config.config_ttl;
        self.store(|s| &mut s.config, key.into(), value, ttl).await;
    }

    pub async fn invalidate_config(&self, key: &str) -> bool {
        self.invalidate(|s| &mut s.config, key).await
    }

    pub async fn invalidate_all_config(&self) {
        self.invalidate_all(|s| &mut s.config).await;
    }

    // == Generic Store ==
    /// Stores `value` under `key` for exactly `ttl`.
    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Duration) {
        self.store(|s| &mut s.generic, key.into(), value, ttl).await;
    }

    /// Retrieves a value from the generic store.
    ///
    /// Absent and expired keys both count as a miss and return
    /// [`CacheError::NotFound`].
    pub async fn get(&self, key: &str) -> Result<Value> {
        self.lookup(|s| &s.generic, key)
            .await
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    /// Removes `key` from the generic store. Returns true if it was present.
    pub async fn delete(&self, key: &str) -> bool {
        self.invalidate(|s| &mut s.generic, key).await
    }

    /// Remaining lifetime of a live generic entry. Does not touch hit/miss
    /// counters.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let state = self.state.read().await;
        state
            .generic
            .entry(key, Instant::now())
            .map(|entry| entry.ttl_remaining())
    }

    // == Whole-cache operations ==
    /// Empties every namespace. Hit, miss and eviction counters are kept.
    pub async fn clear_all(&self) {
        let removed = self.state.write().await.clear_all();
        info!("Cleared all cache namespaces ({} entries)", removed);
    }

    /// Runs one sweep pass now, on the caller's task.
    ///
    /// Removals count as evictions exactly like the background sweeper's.
    pub async fn purge_expired(&self) -> usize {
        let removed = self.state.write().await.sweep_expired(Instant::now());
        debug!("Manual sweep removed {} expired entries", removed);
        removed
    }

    /// Point-in-time statistics snapshot.
    pub async fn stats(&self) -> CacheStats {
        self.state.read().await.counters.snapshot()
    }

    /// One-line human-readable summary for logs.
    pub async fn summary(&self) -> String {
        format!("Cache stats: {}", self.stats().await)
    }

    // == Internal helpers ==
    async fn lookup<K, Q, V>(
        &self,
        select: impl FnOnce(&CacheState) -> &Namespace<K, V>,
        key: &Q,
    ) -> Option<V>
    where
        K: Eq + Hash + Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        let state = self.state.read().await;
        let found = select(&*state).get(key, Instant::now()).cloned();

        if found.is_some() {
            state.counters.record_hit();
        } else {
            state.counters.record_miss();
        }
        found
    }

    async fn store<K, V>(
        &self,
        select: impl FnOnce(&mut CacheState) -> &mut Namespace<K, V>,
        key: K,
        value: V,
        ttl: Duration,
    ) where
        K: Eq + Hash,
    {
        let mut state = self.state.write().await;
        select(&mut *state).insert(key, value, Instant::now(), ttl);
        state.refresh_size();
    }

    async fn invalidate<K, Q, V>(
        &self,
        select: impl FnOnce(&mut CacheState) -> &mut Namespace<K, V>,
        key: &Q,
    ) -> bool
    where
        K: Eq + Hash + Borrow<Q>,
        Q: Eq + Hash + Debug + ?Sized,
    {
        let mut state = self.state.write().await;
        let namespace = select(&mut *state);
        let name = namespace.name();
        let removed = namespace.remove(key);
        state.refresh_size();

        info!(namespace = name, key = ?key, removed, "Invalidated cache entry");
        removed
    }

    async fn invalidate_all<K, V>(
        &self,
        select: impl FnOnce(&mut CacheState) -> &mut Namespace<K, V>,
    ) where
        K: Eq + Hash,
    {
        let mut state = self.state.write().await;
        let namespace = select(&mut *state);
        let name = namespace.name();
        let removed = namespace.clear();
        state.refresh_size();

        info!(namespace = name, removed, "Invalidated cache namespace");
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn test_config() -> CacheConfig {
        CacheConfig {
            cleanup_interval: Duration::from_secs(3600),
            ..CacheConfig::default()
        }
    }

    fn interests(pairs: &[(i64, &str)]) -> Interests {
        pairs.iter().map(|(id, name)| (*id, name.to_string())).collect()
    }

    #[tokio::test]
    async fn test_service_new_is_empty() {
        let cache = CacheService::new(test_config());

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.size, 0);
        assert_eq!(cache.sweeper_state(), SweeperState::Running);

        cache.stop().await;
    }

    #[tokio::test]
    async fn test_languages_set_get_invalidate() {
        let cache = CacheService::new(test_config());
        let langs = vec![Language::new("en", "English", "English")];

        cache.set_languages("en", langs.clone()).await;
        assert_eq!(cache.get_languages("en").await, Some(langs));
        assert_eq!(cache.get_languages("ru").await, None);

        assert!(cache.invalidate_languages("en").await);
        assert!(!cache.invalidate_languages("en").await);
        assert_eq!(cache.get_languages("en").await, None);
        assert_eq!(cache.stats().await.size, 0);
    }

    #[tokio::test]
    async fn test_interests_and_categories_are_separate_namespaces() {
        let cache = CacheService::new(test_config());

        cache.set_interests("en", interests(&[(1, "Music")])).await;
        cache
            .set_interest_categories("en", interests(&[(1, "Arts")]))
            .await;

        assert_eq!(cache.get_interests("en").await.unwrap()[&1_i64], "Music");
        assert_eq!(cache.get_interest_categories("en").await.unwrap()[&1_i64], "Arts");

        cache.invalidate_all_interest_categories().await;
        assert!(cache.get_interests("en").await.is_some());
        assert!(cache.get_interest_categories("en").await.is_none());
    }

    #[tokio::test]
    async fn test_translations_roundtrip() {
        let cache = CacheService::new(test_config());
        let mut table = HashMap::new();
        table.insert("menu.start".to_string(), "Start".to_string());

        cache.set_translations("en", table.clone()).await;
        assert_eq!(cache.get_translations("en").await, Some(table));

        cache.invalidate_all_translations().await;
        assert_eq!(cache.get_translations("en").await, None);
    }

    #[tokio::test]
    async fn test_user_keyed_by_id() {
        let cache = CacheService::new(test_config());

        cache.set_user(User::new(10, "Alice", "en")).await;

        assert_eq!(cache.get_user(10).await.unwrap().first_name, "Alice");
        assert!(cache.get_user(11).await.is_none());
        assert!(cache.invalidate_user(10).await);
        assert!(cache.get_user(10).await.is_none());
    }

    #[tokio::test]
    async fn test_stats_and_user_stats_namespaces() {
        let cache = CacheService::new(test_config());
        let mut named = NamedStats::new();
        named.insert("active_users".to_string(), 12);

        cache.set_stats("global", named.clone()).await;
        cache.set_user_stats(5, named.clone()).await;

        assert_eq!(cache.get_stats("global").await, Some(named.clone()));
        assert_eq!(cache.get_user_stats(5).await, Some(named));

        assert!(cache.invalidate_stats("global").await);
        assert!(cache.get_user_stats(5).await.is_some());

        cache.invalidate_all_user_stats().await;
        assert_eq!(cache.stats().await.size, 0);
    }

    #[tokio::test]
    async fn test_config_namespace() {
        let cache = CacheService::new(test_config());

        cache.set_config("maintenance", json!(false)).await;
        assert_eq!(cache.get_config("maintenance").await, Some(json!(false)));

        cache.invalidate_config("maintenance").await;
        assert_eq!(cache.get_config("maintenance").await, None);
    }

    #[tokio::test]
    async fn test_generic_get_missing_key() {
        let cache = CacheService::new(test_config());

        let result = cache.get("nope").await;
        assert!(matches!(result, Err(CacheError::NotFound(ref k)) if k == "nope"));
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_generic_set_get_delete() {
        let cache = CacheService::new(test_config());

        cache
            .set("session:1", json!({"step": 2}), Duration::from_secs(30))
            .await;
        assert_eq!(cache.get("session:1").await.unwrap()["step"], 2);

        assert!(cache.delete("session:1").await);
        assert!(!cache.delete("session:1").await);
        assert!(cache.get("session:1").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_generic_expired_counts_as_miss_not_eviction() {
        let cache = CacheService::new(test_config());

        cache.set("k", json!(1), Duration::from_millis(50)).await;
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(cache.get("k").await.unwrap_err().is_not_found());
        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 0);
        // still present until swept
        assert_eq!(stats.size, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generic_ttl_remaining() {
        let cache = CacheService::new(test_config());

        cache.set("k", json!(1), Duration::from_secs(10)).await;
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(cache.ttl("k").await, Some(Duration::from_secs(7)));
        assert_eq!(cache.ttl("missing").await, None);
        assert_eq!(cache.stats().await.misses, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_namespace_ttl_comes_from_config() {
        let config = CacheConfig {
            user_ttl: Duration::from_millis(100),
            languages_ttl: Duration::from_secs(10),
            ..test_config()
        };
        let cache = CacheService::new(config);

        cache.set_user(User::new(1, "a", "en")).await;
        cache.set_languages("en", vec![]).await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(cache.get_user(1).await.is_none());
        assert!(cache.get_languages("en").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_counts_evictions() {
        let cache = CacheService::new(test_config());

        cache.set("a", json!(1), Duration::from_millis(10)).await;
        cache.set("b", json!(2), Duration::from_millis(10)).await;
        cache.set("c", json!(3), Duration::from_secs(60)).await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(cache.purge_expired().await, 2);
        let stats = cache.stats().await;
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_clear_all_keeps_counters() {
        let cache = CacheService::new(test_config());

        cache.set_languages("en", vec![]).await;
        cache.set_user(User::new(1, "a", "en")).await;
        let _ = cache.get_user(1).await;

        cache.clear_all().await;

        let stats = cache.stats().await;
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hits, 1);
        assert!(cache.get_languages("en").await.is_none());
    }

    #[tokio::test]
    async fn test_summary_line() {
        let cache = CacheService::new(test_config());
        cache.set_config("k", json!(1)).await;
        let _ = cache.get_config("k").await;
        let _ = cache.get_config("x").await;

        let summary = cache.summary().await;
        assert!(summary.contains("hits=1"));
        assert!(summary.contains("misses=1"));
        assert!(summary.contains("hit_rate=50.00%"));
        assert!(summary.contains("size=1"));
    }

    #[tokio::test]
    async fn test_usable_after_stop() {
        let cache = CacheService::new(test_config());
        cache.stop().await;

        cache.set_user(User::new(1, "a", "en")).await;
        assert!(cache.get_user(1).await.is_some());
    }
}
