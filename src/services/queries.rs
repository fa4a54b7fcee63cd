use std::num::NonZeroUsize;

use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::{CastMember, Genre, Movie, MovieDetailPage, Page, Person, Video},
    services::{catalog::CatalogAdapter, fallback},
};

/// Maximum number of similar shows returned for one show
pub const MAX_SIMILAR: usize = 6;
/// Maximum number of cast members returned for one show
pub const MAX_CAST: usize = 10;
/// Maximum number of credits kept in a person's `known_for`
pub const MAX_KNOWN_FOR: usize = 5;

/// Slices `items` into the 1-based `page` of `page_size` entries.
///
/// Pages past the end, and page 0, are empty rather than an error.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: NonZeroUsize) -> Page<T> {
    let page_size = page_size.get();
    let total_pages = items.len().div_ceil(page_size);

    let results = match page.checked_sub(1) {
        Some(index) => items
            .iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    Page {
        results,
        total_pages,
        page,
    }
}

/// Search-style embed URL for a show's trailer on the video platform
pub fn trailer_embed_url(title: &str) -> String {
    format!(
        "https://www.youtube.com/embed?listType=search&list={}",
        urlencoding::encode(&format!("{} trailer", title))
    )
}

/// Browsing operations over the catalog.
///
/// Operations that call the network have a `*_live` form returning the raw
/// outcome and a plain form that logs failures and answers from the cached
/// catalog instead.
pub struct CatalogService {
    adapter: CatalogAdapter,
    page_size: NonZeroUsize,
}

impl CatalogService {
    /// Fails with `InvalidInput` when `page_size` is zero
    pub fn new(adapter: CatalogAdapter, page_size: usize) -> AppResult<Self> {
        let page_size = NonZeroUsize::new(page_size).ok_or_else(|| {
            AppError::InvalidInput("page size must be greater than zero".to_string())
        })?;
        Ok(Self { adapter, page_size })
    }

    pub fn adapter(&self) -> &CatalogAdapter {
        &self.adapter
    }

    async fn find_cached(&self, id: u64) -> Option<&Movie> {
        self.adapter.load_catalog().await.iter().find(|m| m.id == id)
    }

    /// Cached catalog in pages of `page_size`
    pub async fn list_trending(&self, page: usize) -> Page<Movie> {
        let catalog = self.adapter.load_catalog().await;
        paginate(catalog, page, self.page_size)
    }

    pub async fn search_live(&self, query: &str) -> AppResult<Vec<Movie>> {
        self.adapter.source().search_shows(query).await
    }

    /// Live search, falling back to filtering the cached catalog by title or
    /// overview. Always reported as one page; `page` is echoed back.
    pub async fn search(&self, query: &str, page: usize) -> Page<Movie> {
        match self.search_live(query).await {
            Ok(movies) => Page::single(movies, page),
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "Search failed, filtering cached catalog");
                let matches = self
                    .adapter
                    .load_catalog()
                    .await
                    .iter()
                    .filter(|m| m.matches_text(query))
                    .cloned()
                    .collect();
                Page::single(matches, page)
            }
        }
    }

    /// Trending for a blank query, search otherwise
    pub async fn browse(&self, query: &str) -> Page<Movie> {
        if query.trim().is_empty() {
            self.list_trending(1).await
        } else {
            self.search(query, 1).await
        }
    }

    pub async fn fetch_movie_details_live(&self, id: u64) -> AppResult<Movie> {
        self.adapter.source().fetch_show(id).await
    }

    /// Live details, falling back to the cached record.
    ///
    /// Fails with `NotFound` only when neither has the show.
    pub async fn fetch_movie_details(&self, id: u64) -> AppResult<Movie> {
        match self.fetch_movie_details_live(id).await {
            Ok(movie) => Ok(movie),
            Err(e) => {
                tracing::warn!(error = %e, movie_id = id, "Show details fetch failed, using cached catalog");
                self.find_cached(id)
                    .await
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("show {}", id)))
            }
        }
    }

    /// Whole cached catalog, best rated first. Ties keep catalog order.
    pub async fn list_top_rated(&self, page: usize) -> Page<Movie> {
        let mut movies = self.adapter.load_catalog().await.to_vec();
        movies.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
        Page::single(movies, page)
    }

    /// Cached shows having a genre with this name, ignoring case
    pub async fn list_by_genre(&self, genre_name: &str, page: usize) -> Page<Movie> {
        let movies = self
            .adapter
            .load_catalog()
            .await
            .iter()
            .filter(|m| m.has_genre(genre_name))
            .cloned()
            .collect();
        Page::single(movies, page)
    }

    /// Up to six other cached shows sharing a genre name with the given one
    pub async fn fetch_similar(&self, id: u64) -> Vec<Movie> {
        let catalog = self.adapter.load_catalog().await;

        let Some(target) = catalog.iter().find(|m| m.id == id) else {
            return Vec::new();
        };

        catalog
            .iter()
            .filter(|m| m.id != id && m.shares_genre_with(target))
            .take(MAX_SIMILAR)
            .cloned()
            .collect()
    }

    /// A uniformly chosen cached show
    pub async fn random_pick(&self) -> AppResult<Movie> {
        let catalog = self.adapter.load_catalog().await;
        if catalog.is_empty() {
            return Err(AppError::NotFound("catalog is empty".to_string()));
        }
        let index = rand::thread_rng().gen_range(0..catalog.len());
        Ok(catalog[index].clone())
    }

    /// Synthetic trailer link for a cached show, empty if not cached
    pub async fn fetch_videos(&self, id: u64) -> Vec<Video> {
        match self.find_cached(id).await {
            Some(movie) => vec![Video::trailer_search(&movie.title)],
            None => Vec::new(),
        }
    }

    pub async fn fetch_cast_live(&self, id: u64) -> AppResult<Vec<CastMember>> {
        let mut cast = self.adapter.source().fetch_cast(id).await?;
        cast.truncate(MAX_CAST);
        Ok(cast)
    }

    /// First ten cast members, or none if the fetch fails
    pub async fn fetch_cast(&self, id: u64) -> Vec<CastMember> {
        self.fetch_cast_live(id).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, movie_id = id, "Cast fetch failed");
            Vec::new()
        })
    }

    /// Person profile with up to five credits.
    ///
    /// A failed credits call leaves `known_for` empty; a failed profile call
    /// propagates.
    pub async fn fetch_person_details_live(&self, person_id: u64) -> AppResult<Person> {
        let source = self.adapter.source();
        let mut person = source.fetch_person(person_id).await?;

        person.known_for = match source.fetch_person_credits(person_id).await {
            Ok(mut credits) => {
                credits.truncate(MAX_KNOWN_FOR);
                credits
            }
            Err(e) => {
                tracing::warn!(error = %e, person_id, "Person credits fetch failed");
                Vec::new()
            }
        };

        Ok(person)
    }

    /// Person profile, or an "Unknown" placeholder if it cannot be fetched
    pub async fn fetch_person_details(&self, person_id: u64) -> Person {
        self.fetch_person_details_live(person_id)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, person_id, "Error fetching person details");
                Person::unknown(person_id)
            })
    }

    pub fn fetch_genres(&self) -> Vec<Genre> {
        fallback::genre_vocabulary()
    }

    /// Loads details, similar shows, videos and cast concurrently.
    ///
    /// Waits for all four; any failure fails the whole page.
    pub async fn load_detail_page(&self, id: u64) -> AppResult<MovieDetailPage> {
        let (movie, similar, videos, cast) = tokio::try_join!(
            self.fetch_movie_details(id),
            async { Ok::<_, AppError>(self.fetch_similar(id).await) },
            async { Ok::<_, AppError>(self.fetch_videos(id).await) },
            async { Ok::<_, AppError>(self.fetch_cast(id).await) },
        )
        .map_err(|e| {
            tracing::error!(error = %e, movie_id = id, "Detail page load failed");
            e
        })?;

        Ok(MovieDetailPage {
            movie,
            similar,
            videos,
            cast,
        })
    }
}
