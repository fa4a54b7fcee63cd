/// Show catalog source abstraction
///
/// This module is the only place that talks to the external catalog. A source
/// returns records already normalized into the internal shapes; deciding what
/// to do when a call fails is left to the caller.
use crate::{
    error::AppResult,
    models::{CastMember, Movie, Person},
};

pub mod tvmaze;

pub use tvmaze::TvMazeProvider;

/// Trait for show catalog sources
///
/// Every method performs one live request. Transport failures and non-2xx
/// statuses come back as errors; nothing is cached at this level.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the first page of the bulk show listing, unbounded
    async fn fetch_shows(&self) -> AppResult<Vec<Movie>>;

    /// Fetch a single show by id
    async fn fetch_show(&self, id: u64) -> AppResult<Movie>;

    /// Free-text show search
    async fn search_shows(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Fetch the full cast of a show
    async fn fetch_cast(&self, show_id: u64) -> AppResult<Vec<CastMember>>;

    /// Fetch a person's profile. `known_for` is left empty.
    async fn fetch_person(&self, person_id: u64) -> AppResult<Person>;

    /// Fetch the shows a person appeared in, in source order
    async fn fetch_person_credits(&self, person_id: u64) -> AppResult<Vec<Movie>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
