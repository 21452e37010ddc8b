use ahash::{HashMap, HashMapExt};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

/// Values keyed by name that go stale once they are `ttl` old.
///
/// Owned by whoever fetches, timestamps are passed in so callers decide what "now" is.
#[derive(Debug, Clone)]
pub struct PriceCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl: Duration,
}

impl<T> PriceCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { entries: HashMap::new(), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_fresh(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.entries.get(key).is_some_and(|e| now - e.fetched_at < self.ttl)
    }

    /// The cached value if it is still fresh.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<&T> {
        self.entries
            .get(key)
            .filter(|e| now - e.fetched_at < self.ttl)
            .map(|e| &e.value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: T, now: DateTime<Utc>) {
        self.entries.insert(key.into(), CacheEntry { value, fetched_at: now });
    }

    /// Drops every stale entry, returns how many went.
    pub fn evict_stale(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, e| now - e.fetched_at < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn entries_expire_after_ttl() {
        let mut cache = PriceCache::new(Duration::seconds(60));
        cache.insert("steam", 1.5_f64, t(0));

        assert_eq!(cache.get("steam", t(59)), Some(&1.5));
        assert!(cache.is_fresh("steam", t(59)));
        assert_eq!(cache.get("steam", t(60)), None);
        assert!(!cache.is_fresh("steam", t(60)));
        assert_eq!(cache.get("buff163", t(0)), None);
    }

    #[test]
    fn reinsert_refreshes_timestamp() {
        let mut cache = PriceCache::new(Duration::seconds(10));
        cache.insert("youpin", 1, t(0));
        cache.insert("youpin", 2, t(20));
        assert_eq!(cache.get("youpin", t(25)), Some(&2));
    }

    #[test]
    fn evict_stale_keeps_fresh_entries() {
        let mut cache = PriceCache::new(Duration::seconds(10));
        cache.insert("old", (), t(0));
        cache.insert("new", (), t(8));

        assert_eq!(cache.evict_stale(t(12)), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.is_fresh("new", t(12)));
    }
}
