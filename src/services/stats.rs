use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{Movie, UserPreferences, UserRating};

/// Number of genres listed in `top_genres`
const TOP_GENRES: usize = 5;

/// Summary of the local user's favorites and ratings
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceStats {
    pub total_favorites: usize,
    /// Mean personal rating rounded to one decimal, 0.0 without ratings
    pub average_rating: f64,
    /// Genre name to number of favorites carrying it
    pub genre_distribution: BTreeMap<String, usize>,
    /// Most frequent favorite genres, most frequent first
    #[serde(skip)]
    pub top_genres: Vec<(String, usize)>,
}

impl PreferenceStats {
    pub fn compute(favorites: &[Movie], ratings: &[UserRating]) -> Self {
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            let sum: u32 = ratings.iter().map(|r| u32::from(r.rating)).sum();
            let mean = f64::from(sum) / ratings.len() as f64;
            (mean * 10.0).round() / 10.0
        };

        let mut genre_distribution: BTreeMap<String, usize> = BTreeMap::new();
        for movie in favorites {
            for genre in &movie.genres {
                *genre_distribution.entry(genre.name.clone()).or_insert(0) += 1;
            }
        }

        // BTreeMap order makes name the tie-break
        let mut top_genres: Vec<(String, usize)> = genre_distribution
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        top_genres.sort_by(|a, b| b.1.cmp(&a.1));
        top_genres.truncate(TOP_GENRES);

        Self {
            total_favorites: favorites.len(),
            average_rating,
            genre_distribution,
            top_genres,
        }
    }

    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        Self::compute(&prefs.favorites, &prefs.ratings)
    }
}

/// One favorite in the export document
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFavorite {
    pub id: u64,
    pub title: String,
    pub rating: Option<u8>,
    pub genres: Vec<String>,
    pub year: Option<i32>,
    pub tmdb_rating: f64,
}

/// Downloadable snapshot of favorites, ratings and stats
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub favorites: Vec<ExportedFavorite>,
    pub ratings: Vec<UserRating>,
    pub stats: PreferenceStats,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    pub fn build(prefs: &UserPreferences, exported_at: DateTime<Utc>) -> Self {
        let favorites = prefs
            .favorites
            .iter()
            .map(|f| ExportedFavorite {
                id: f.id,
                title: f.title.clone(),
                rating: prefs.rating_for(f.id),
                genres: f.genres.iter().map(|g| g.name.clone()).collect(),
                year: f.release_year(),
                tmdb_rating: f.vote_average,
            })
            .collect();

        Self {
            favorites,
            ratings: prefs.ratings.clone(),
            stats: PreferenceStats::from_preferences(prefs),
            export_date: exported_at,
        }
    }
}

/// File name offered for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("cinescope-data-{}.json", date.format("%Y-%m-%d"))
}
