//! Per-session price cache.

use std::collections::HashMap;

use log::debug;
use rotor_traits::{Date, PriceSeries};
use tokio::sync::Mutex;

use crate::{Result, loader::PriceLoader};

type Key = (String, Date);

/// Memoizes successful fetches of a wrapped loader by `(symbol, start)`.
///
/// Failures are not cached, so an unavailable symbol is retried on the next
/// request. The cache lives as long as the value; there is no expiry.
#[derive(Debug)]
pub struct PriceCache<L> {
    inner: L,
    entries: Mutex<HashMap<Key, PriceSeries>>,
}

impl<L: PriceLoader> PriceCache<L> {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The wrapped loader.
    pub const fn inner(&self) -> &L {
        &self.inner
    }

    fn key(symbol: &str, start: Date) -> Key {
        (symbol.trim().to_uppercase(), start)
    }

    /// Return the cached series or fetch and remember it.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped loader's error on a miss.
    pub async fn get_or_fetch(&self, symbol: &str, start: Date) -> Result<PriceSeries> {
        let key = Self::key(symbol, start);
        if let Some(series) = self.entries.lock().await.get(&key) {
            debug!("cache hit for {} from {start}", key.0);
            return Ok(series.clone());
        }

        let series = self.inner.fetch(symbol, start).await?;
        self.entries.lock().await.insert(key, series.clone());
        Ok(series)
    }

    /// Drop one entry; returns whether it was present.
    pub async fn invalidate(&self, symbol: &str, start: Date) -> bool {
        self.entries.lock().await.remove(&Self::key(symbol, start)).is_some()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Number of cached series.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl<L: PriceLoader> PriceLoader for PriceCache<L> {
    async fn fetch(&self, symbol: &str, start: Date) -> Result<PriceSeries> {
        self.get_or_fetch(symbol, start).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::mock::MockLoader;
    use crate::load_universe;
    use rotor_traits::Sector;

    fn start() -> Date {
        Date::from_ymd_opt(2020, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_second_fetch_hits_cache() {
        let cache = PriceCache::new(MockLoader::default().with("SOXX", 10));

        let first = cache.get_or_fetch("SOXX", start()).await.unwrap();
        let second = cache.get_or_fetch("soxx", start()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.inner().calls(), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_start_date_is_part_of_key() {
        let cache = PriceCache::new(MockLoader::default().with("SOXX", 10));
        let later = Date::from_ymd_opt(2020, 1, 5).unwrap();

        assert_eq!(cache.get_or_fetch("SOXX", start()).await.unwrap().len(), 10);
        assert_eq!(cache.get_or_fetch("SOXX", later).await.unwrap().len(), 6);
        assert_eq!(cache.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = PriceCache::new(MockLoader::default());
        assert!(cache.get_or_fetch("NOPE", start()).await.is_err());
        assert!(cache.get_or_fetch("NOPE", start()).await.is_err());
        assert_eq!(cache.inner().calls(), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let cache = PriceCache::new(MockLoader::default().with("SOXX", 3).with("XLE", 3));
        let sectors = [Sector::new("Semis", "SOXX"), Sector::new("Energy", "XLE")];

        load_universe(&cache, &sectors, start()).await;
        load_universe(&cache, &sectors, start()).await;
        assert_eq!(cache.inner().calls(), 2);

        assert!(cache.invalidate("SOXX", start()).await);
        assert!(!cache.invalidate("SOXX", start()).await);
        cache.get_or_fetch("SOXX", start()).await.unwrap();
        assert_eq!(cache.inner().calls(), 3);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
