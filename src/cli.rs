use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cinescope", about = "Browse the show catalog from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Trending shows, one page at a time
    Trending {
        #[arg(default_value_t = 1)]
        page: usize,
    },
    /// Cached catalog by rating
    Top {
        #[arg(default_value_t = 1)]
        page: usize,
    },
    /// Search the catalog (a blank query lists trending shows)
    Search {
        #[arg(num_args = 0.., trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// Cached shows of a genre
    Genre {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Genre vocabulary
    Genres,
    /// Detail page: show, similar shows, trailer and cast
    Movie { id: u64 },
    /// Shows sharing a genre
    Similar { id: u64 },
    /// A random cached show
    Random,
    /// First ten cast members
    Cast { id: u64 },
    /// Person profile and known-for shows
    Person { id: u64 },
    /// Add a show to favorites
    Favorite { id: u64 },
    /// Remove a show from favorites
    Unfavorite { id: u64 },
    /// Set a personal rating
    Rate {
        id: u64,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// List favorites
    Favorites,
    /// Favorites and ratings summary
    Stats,
    /// Export favorites, ratings and stats to a JSON file
    Export,
}
