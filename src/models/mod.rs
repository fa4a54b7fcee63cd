use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod tvmaze;
pub mod user_preferences;

pub use user_preferences::{UserPreferences, UserRating};

/// Poster/backdrop used when the catalog has no image for a show
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-movie.svg";

/// Overview used when the catalog has no summary for a show
pub const NO_DESCRIPTION: &str = "No description available.";

/// Rating assumed when the catalog has no rating for a show
pub const DEFAULT_VOTE_AVERAGE: f64 = 7.0;

/// A named genre. Ids attached to catalog shows are 1-based positions within
/// that show's genre list and carry no meaning across shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl Genre {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Canonical show record handed to consumers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub poster_path: String,
    pub backdrop_path: String,
    pub overview: String,
    pub vote_average: f64,
    /// ISO date (`YYYY-MM-DD`), empty when unknown
    pub release_date: String,
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Movie {
    /// True if any of this show's genres has the given name, ignoring case
    pub fn has_genre(&self, name: &str) -> bool {
        self.genres
            .iter()
            .any(|g| g.name.to_lowercase() == name.to_lowercase())
    }

    /// True if both shows have at least one genre name in common
    pub fn shares_genre_with(&self, other: &Movie) -> bool {
        self.genres
            .iter()
            .any(|g| other.genres.iter().any(|og| og.name == g.name))
    }

    /// Case-insensitive substring match on title or overview
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.overview.to_lowercase().contains(&query)
    }

    /// Year of first release, if the release date parses
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;

        chrono::NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

/// One window of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total_pages: usize,
    pub page: usize,
}

impl<T> Page<T> {
    /// A listing reported as a single page regardless of its length
    pub fn single(results: Vec<T>, page: usize) -> Self {
        Self {
            results,
            total_pages: 1,
            page,
        }
    }
}

/// Where the cached catalog came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    /// Fetched from the catalog API
    Live,
    /// Built-in sample shows used because the fetch failed
    Fallback,
}

impl Display for CatalogOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogOrigin::Live => write!(f, "live"),
            CatalogOrigin::Fallback => write!(f, "fallback"),
        }
    }
}

/// A cast entry of a show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub image: Option<String>,
}

/// A person with up to five shows they are known for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub image: Option<String>,
    pub biography: String,
    pub known_for: Vec<Movie>,
}

impl Person {
    /// Stand-in returned when a person cannot be fetched
    pub fn unknown(id: u64) -> Self {
        Self {
            id,
            name: "Unknown".to_string(),
            image: None,
            biography: "No information available.".to_string(),
            known_for: Vec::new(),
        }
    }
}

/// Trailer link for a show.
///
/// The catalog has no video data, so `key` is a search query for the video
/// platform rather than a real video identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

impl Video {
    pub fn trailer_search(title: &str) -> Self {
        Self {
            key: format!("search?q={}", urlencoding::encode(&format!("{} trailer", title))),
            name: format!("{} Trailer", title),
            site: "YouTube".to_string(),
            video_type: "Trailer".to_string(),
        }
    }
}

/// Everything the detail page shows for one item
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieDetailPage {
    pub movie: Movie,
    pub similar: Vec<Movie>,
    pub videos: Vec<Video>,
    pub cast: Vec<CastMember>,
}
