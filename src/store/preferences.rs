use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{
        user_preferences::{MAX_RATING, MIN_RATING},
        Movie, UserPreferences, UserRating,
    },
    store::storage::{KeyValueStorage, StorageKey},
};

/// Favorites and personal ratings persisted in a key-value storage.
///
/// Every read goes back to the storage, so two stores over the same backing
/// file see each other's writes after reopening. Access is single-threaded;
/// writes take `&mut self`.
#[derive(Debug)]
pub struct PreferenceStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Reads a JSON list under `key`. Unreadable data is logged and treated as
    /// an empty list.
    fn read_list<T: DeserializeOwned>(&self, key: StorageKey) -> Vec<T> {
        let stored = match self.storage.get_item(key) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(error = %e, key = %key, "Failed to read preference storage");
                return Vec::new();
            }
        };

        match stored {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, key = %key, "Discarding unreadable preference data");
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    fn write_list<T: Serialize>(&mut self, key: StorageKey, items: &[T]) -> AppResult<()> {
        let json = serde_json::to_string(items)?;
        self.storage.set_item(key, json)
    }

    /// Snapshot of both collections
    pub fn load(&self) -> UserPreferences {
        UserPreferences {
            favorites: self.get_favorites(),
            ratings: self.get_user_ratings(),
        }
    }

    pub fn get_favorites(&self) -> Vec<Movie> {
        self.read_list(StorageKey::Favorites)
    }

    /// Adds a favorite; adding a show already present is a no-op
    pub fn add_to_favorites(&mut self, movie: &Movie) -> AppResult<()> {
        let mut prefs = UserPreferences {
            favorites: self.get_favorites(),
            ratings: Vec::new(),
        };

        if prefs.add_favorite(movie.clone()) {
            self.write_list(StorageKey::Favorites, &prefs.favorites)?;
            tracing::info!(movie_id = movie.id, title = %movie.title, "Added favorite");
        } else {
            tracing::debug!(movie_id = movie.id, "Show already a favorite");
        }
        Ok(())
    }

    pub fn remove_from_favorites(&mut self, movie_id: u64) -> AppResult<()> {
        let mut prefs = UserPreferences {
            favorites: self.get_favorites(),
            ratings: Vec::new(),
        };

        prefs.remove_favorite(movie_id);
        self.write_list(StorageKey::Favorites, &prefs.favorites)?;
        tracing::info!(movie_id, "Removed favorite");
        Ok(())
    }

    pub fn is_favorite(&self, movie_id: u64) -> bool {
        self.get_favorites().iter().any(|f| f.id == movie_id)
    }

    pub fn get_user_ratings(&self) -> Vec<UserRating> {
        self.read_list(StorageKey::UserRatings)
    }

    /// Sets the personal rating of a show, replacing any previous one
    pub fn set_user_rating(&mut self, movie_id: u64, rating: u8) -> AppResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::InvalidInput(format!(
                "rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            )));
        }

        let mut prefs = UserPreferences {
            favorites: Vec::new(),
            ratings: self.get_user_ratings(),
        };
        prefs.set_rating(movie_id, rating);
        self.write_list(StorageKey::UserRatings, &prefs.ratings)?;

        tracing::info!(movie_id, rating, "Saved personal rating");
        Ok(())
    }

    pub fn get_user_rating(&self, movie_id: u64) -> Option<u8> {
        self.get_user_ratings()
            .iter()
            .find(|r| r.movie_id == movie_id)
            .map(|r| r.rating)
    }

    /// Removes both favorites and ratings
    pub fn clear(&mut self) -> AppResult<()> {
        self.storage.remove_item(StorageKey::Favorites)?;
        self.storage.remove_item(StorageKey::UserRatings)?;
        Ok(())
    }
}
