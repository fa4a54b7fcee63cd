use std::future::Future;

use tokio::sync::OnceCell;

use crate::models::{CatalogOrigin, Movie};

/// A populated catalog and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCatalog {
    pub movies: Vec<Movie>,
    pub origin: CatalogOrigin,
}

/// Process-lifetime cache of the unpaged catalog.
///
/// Populated at most once; concurrent first callers wait on the same
/// population instead of each fetching. Once set, the value never changes and
/// there is no expiry. Each adapter owns its own instance.
#[derive(Debug, Default)]
pub struct CatalogCache {
    cell: OnceCell<CachedCatalog>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-populated with a known catalog
    pub fn with_catalog(catalog: CachedCatalog) -> Self {
        Self {
            cell: OnceCell::new_with(Some(catalog)),
        }
    }

    /// The cached catalog, if populated
    pub fn get(&self) -> Option<&CachedCatalog> {
        self.cell.get()
    }

    /// Returns the cached catalog, running `populate` first if the cache is
    /// still empty
    pub async fn get_or_populate<F, Fut>(&self, populate: F) -> &CachedCatalog
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CachedCatalog>,
    {
        self.cell.get_or_init(populate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn catalog(origin: CatalogOrigin) -> CachedCatalog {
        CachedCatalog {
            movies: Vec::new(),
            origin,
        }
    }

    #[tokio::test]
    async fn test_populates_once() {
        let cache = CatalogCache::new();
        assert!(cache.get().is_none());

        let first = cache
            .get_or_populate(|| async { catalog(CatalogOrigin::Fallback) })
            .await
            .clone();
        let second = cache
            .get_or_populate(|| async { catalog(CatalogOrigin::Live) })
            .await;

        assert_eq!(first.origin, CatalogOrigin::Fallback);
        assert_eq!(second.origin, CatalogOrigin::Fallback);
        assert!(cache.get().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_first_callers_populate_once() {
        let cache = Arc::new(CatalogCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            tasks.push(tokio::spawn(async move {
                cache
                    .get_or_populate(|| async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        catalog(CatalogOrigin::Live)
                    })
                    .await
                    .origin
            }));
        }

        for task in tasks {
            assert_eq!(task.await.unwrap(), CatalogOrigin::Live);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_catalog_is_populated() {
        let cache = CatalogCache::with_catalog(catalog(CatalogOrigin::Live));
        assert_eq!(cache.get().map(|c| c.origin), Some(CatalogOrigin::Live));
    }
}
