//! Built-in data that does not depend on the catalog API.

use crate::models::{Genre, Movie};

fn sample(
    id: u64,
    title: &str,
    image_path: &str,
    overview: &str,
    vote_average: f64,
    release_date: &str,
    genres: &[(u32, &str)],
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: format!(
            "https://static.tvmaze.com/uploads/images/medium_portrait/{}",
            image_path
        ),
        backdrop_path: format!(
            "https://static.tvmaze.com/uploads/images/original_untouched/{}",
            image_path
        ),
        overview: overview.to_string(),
        vote_average,
        release_date: release_date.to_string(),
        genre_ids: genres.iter().map(|(id, _)| *id).collect(),
        genres: genres.iter().map(|(id, name)| Genre::new(*id, *name)).collect(),
    }
}

/// Well-known shows served when the catalog listing cannot be fetched
pub fn sample_movies() -> Vec<Movie> {
    vec![
        sample(
            1,
            "Breaking Bad",
            "0/2400.jpg",
            "A high school chemistry teacher diagnosed with inoperable lung cancer turns to manufacturing and selling methamphetamine to secure his family's future.",
            9.5,
            "2008-01-20",
            &[(18, "Drama"), (80, "Crime")],
        ),
        sample(
            2,
            "Game of Thrones",
            "190/476117.jpg",
            "Seven noble families fight for control of the mythical land of Westeros.",
            9.3,
            "2011-04-17",
            &[(10765, "Sci-Fi & Fantasy"), (18, "Drama")],
        ),
        sample(
            3,
            "The Sopranos",
            "4/11341.jpg",
            "New Jersey mob boss Tony Soprano deals with personal and professional issues in his home and business life.",
            9.2,
            "1999-01-10",
            &[(18, "Drama"), (80, "Crime")],
        ),
    ]
}

/// Fixed genre vocabulary offered for browsing
pub fn genre_vocabulary() -> Vec<Genre> {
    [
        (28, "Action"),
        (12, "Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (99, "Documentary"),
        (18, "Drama"),
        (10751, "Family"),
        (14, "Fantasy"),
        (36, "History"),
        (27, "Horror"),
        (10402, "Music"),
        (9648, "Mystery"),
        (10749, "Romance"),
        (878, "Science Fiction"),
        (10770, "TV Movie"),
        (53, "Thriller"),
        (10752, "War"),
        (37, "Western"),
    ]
    .into_iter()
    .map(|(id, name)| Genre::new(id, name))
    .collect()
}
