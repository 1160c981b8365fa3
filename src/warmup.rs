//! Warm-Up Pipeline
//!
//! Pre-populates the reference data namespaces from an external data source
//! before the process starts serving traffic. A failing locale or data kind
//! reduces coverage but never aborts the run.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::cache::CacheService;
use crate::error::CacheError;
use crate::models::{Interests, Language, Translations};

/// Locales warmed by [`CacheService::warm_up_defaults`].
pub const DEFAULT_LOCALES: &[&str] = &["en", "ru", "es", "fr", "de", "zh"];

// == Data Loader ==
/// Source of reference data, implemented by the persistence and localization
/// layers.
#[async_trait]
pub trait DataLoader: Send + Sync {
    async fn load_languages(&self, locale: &str) -> anyhow::Result<Vec<Language>>;

    async fn load_interests(&self, locale: &str) -> anyhow::Result<Interests>;

    async fn load_interest_categories(&self, locale: &str) -> anyhow::Result<Interests>;

    async fn load_translations(&self, locale: &str) -> anyhow::Result<Translations>;
}

// == Data Kind ==
/// The kinds of reference data warmed, in warm-up order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Languages,
    Interests,
    InterestCategories,
    Translations,
}

impl DataKind {
    /// All kinds in the order the pipeline attempts them.
    pub const ALL: [DataKind; 4] = [
        DataKind::Languages,
        DataKind::Interests,
        DataKind::InterestCategories,
        DataKind::Translations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Languages => "languages",
            DataKind::Interests => "interests",
            DataKind::InterestCategories => "interest_categories",
            DataKind::Translations => "translations",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Warm-Up Report ==
/// Outcome of one warm-up run.
#[derive(Debug, Default)]
pub struct WarmUpReport {
    /// Locale/kind combinations tried
    pub attempted: usize,
    /// Combinations loaded and cached
    pub loaded: usize,
    /// Combinations whose loader failed, in attempt order
    pub failures: Vec<CacheError>,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl WarmUpReport {
    /// True when every combination loaded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// == Warm Up ==
/// Loads every data kind for every locale into `cache`.
///
/// Kinds are attempted in [`DataKind::ALL`] order; within a kind, locales are
/// attempted in the order given. Loader errors are logged and collected in
/// the report, never returned.
pub async fn warm_up<L, S>(cache: &CacheService, loader: &L, locales: &[S]) -> WarmUpReport
where
    L: DataLoader + ?Sized,
    S: AsRef<str>,
{
    let started = Instant::now();
    let mut report = WarmUpReport::default();

    info!("Starting cache warm-up for {} locales", locales.len());

    for kind in DataKind::ALL {
        for locale in locales {
            let locale = locale.as_ref();
            report.attempted += 1;

            match load_one(cache, loader, kind, locale).await {
                Ok(()) => {
                    debug!(locale, kind = %kind, "Warmed cache entry");
                    report.loaded += 1;
                }
                Err(reason) => {
                    warn!(locale, kind = %kind, error = %reason, "Cache warm-up load failed");
                    report.failures.push(CacheError::Load {
                        kind,
                        locale: locale.to_string(),
                        reason,
                    });
                }
            }
        }
    }

    report.elapsed = started.elapsed();
    info!(
        "Cache warm-up finished in {:?}: {}/{} loaded, {} failed",
        report.elapsed,
        report.loaded,
        report.attempted,
        report.failures.len()
    );
    report
}

async fn load_one<L>(
    cache: &CacheService,
    loader: &L,
    kind: DataKind,
    locale: &str,
) -> anyhow::Result<()>
where
    L: DataLoader + ?Sized,
{
    match kind {
        DataKind::Languages => {
            let languages = loader.load_languages(locale).await?;
            cache.set_languages(locale, languages).await;
        }
        DataKind::Interests => {
            let interests = loader.load_interests(locale).await?;
            cache.set_interests(locale, interests).await;
        }
        DataKind::InterestCategories => {
            let categories = loader.load_interest_categories(locale).await?;
            cache.set_interest_categories(locale, categories).await;
        }
        DataKind::Translations => {
            let translations = loader.load_translations(locale).await?;
            cache.set_translations(locale, translations).await;
        }
    }
    Ok(())
}

impl CacheService {
    /// Warms the cache for `locales`. See [`warm_up`].
    pub async fn warm_up<L, S>(&self, loader: &L, locales: &[S]) -> WarmUpReport
    where
        L: DataLoader + ?Sized,
        S: AsRef<str>,
    {
        warm_up(self, loader, locales).await
    }

    /// Warms the cache for [`DEFAULT_LOCALES`].
    pub async fn warm_up_defaults<L>(&self, loader: &L) -> WarmUpReport
    where
        L: DataLoader + ?Sized,
    {
        warm_up(self, loader, DEFAULT_LOCALES).await
    }
}
