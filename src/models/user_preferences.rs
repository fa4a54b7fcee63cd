use serde::{Deserialize, Serialize};

use super::Movie;

/// Lowest personal rating a user can give
pub const MIN_RATING: u8 = 1;
/// Highest personal rating a user can give
pub const MAX_RATING: u8 = 10;

/// A personal rating for one show
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRating {
    /// The ID of the rated show
    pub movie_id: u64,
    /// Rating from 1 to 10
    pub rating: u8,
}

/// Favorites and personal ratings of the local user.
///
/// The two collections are independent: a show can be rated without being a
/// favorite and the other way round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserPreferences {
    /// Favorite shows, in the order they were added
    pub favorites: Vec<Movie>,
    /// Personal ratings, in the order they were first set
    pub ratings: Vec<UserRating>,
}

impl UserPreferences {
    /// Creates empty user preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a favorite. Returns false if a show with that id is already present.
    pub fn add_favorite(&mut self, movie: Movie) -> bool {
        if self.is_favorite(movie.id) {
            return false;
        }
        self.favorites.push(movie);
        true
    }

    /// Removes a favorite by id. Returns false if it was not present.
    pub fn remove_favorite(&mut self, movie_id: u64) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != movie_id);
        self.favorites.len() != before
    }

    pub fn is_favorite(&self, movie_id: u64) -> bool {
        self.favorites.iter().any(|f| f.id == movie_id)
    }

    /// Sets a rating, replacing any previous rating for the same show
    pub fn set_rating(&mut self, movie_id: u64, rating: u8) {
        if let Some(existing) = self.ratings.iter_mut().find(|r| r.movie_id == movie_id) {
            existing.rating = rating;
        } else {
            self.ratings.push(UserRating { movie_id, rating });
        }
    }

    pub fn rating_for(&self, movie_id: u64) -> Option<u8> {
        self.ratings
            .iter()
            .find(|r| r.movie_id == movie_id)
            .map(|r| r.rating)
    }
}
