//! Show catalog browsing: trending and top lists, search, genre filtering,
//! similar shows, cast and people, plus locally stored favorites and ratings.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
