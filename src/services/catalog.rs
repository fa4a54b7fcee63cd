use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{CatalogOrigin, Movie},
    services::{fallback, providers::CatalogSource},
    store::{CachedCatalog, CatalogCache},
};

/// Boundary to the external catalog.
///
/// Owns a catalog source and the unpaged catalog cache. The cache is filled on
/// the first `load_catalog` call and then served as-is for the lifetime of the
/// adapter, including when the first fetch failed and the built-in sample
/// shows were cached instead.
pub struct CatalogAdapter {
    source: Arc<dyn CatalogSource>,
    cache: CatalogCache,
    catalog_limit: usize,
}

impl CatalogAdapter {
    pub fn new(source: Arc<dyn CatalogSource>, catalog_limit: usize) -> Self {
        Self::with_cache(source, CatalogCache::new(), catalog_limit)
    }

    pub fn with_cache(
        source: Arc<dyn CatalogSource>,
        cache: CatalogCache,
        catalog_limit: usize,
    ) -> Self {
        Self {
            source,
            cache,
            catalog_limit,
        }
    }

    /// The live source behind this adapter
    pub fn source(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }

    /// Live fetch of the capped listing, bypassing the cache
    pub async fn fetch_catalog(&self) -> AppResult<Vec<Movie>> {
        let mut movies = self.source.fetch_shows().await?;
        movies.truncate(self.catalog_limit);
        Ok(movies)
    }

    /// The cached catalog, fetching it on first use.
    ///
    /// Never fails: a failed first fetch caches the sample shows.
    pub async fn load_catalog(&self) -> &[Movie] {
        let catalog = self
            .cache
            .get_or_populate(|| async {
                match self.fetch_catalog().await {
                    Ok(movies) => {
                        tracing::info!(
                            shows = movies.len(),
                            provider = self.source.name(),
                            "Catalog cached"
                        );
                        CachedCatalog {
                            movies,
                            origin: CatalogOrigin::Live,
                        }
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            provider = self.source.name(),
                            "Error fetching catalog, using sample shows"
                        );
                        CachedCatalog {
                            movies: fallback::sample_movies(),
                            origin: CatalogOrigin::Fallback,
                        }
                    }
                }
            })
            .await;

        &catalog.movies
    }

    /// Where the cached catalog came from, or `None` before the first load
    pub fn catalog_origin(&self) -> Option<CatalogOrigin> {
        self.cache.get().map(|c| c.origin)
    }
}
