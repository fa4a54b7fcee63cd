// ============================================================================
// TVMaze API Types
// ============================================================================

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use super::{
    CastMember, Genre, Movie, Person, DEFAULT_VOTE_AVERAGE, NO_DESCRIPTION, PLACEHOLDER_IMAGE,
};

/// Biography used when the catalog has none for a person
pub const NO_BIOGRAPHY: &str = "No biography available.";

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeImage {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeRating {
    #[serde(default)]
    pub average: Option<f64>,
}

/// Raw show record from `/shows`, `/shows/{id}` and embedded credits
#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeShow {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: Option<TvMazeImage>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub rating: Option<TvMazeRating>,
    #[serde(default)]
    pub premiered: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// One hit from `/search/shows`
#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeSearchHit {
    pub show: TvMazeShow,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazePerson {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: Option<TvMazeImage>,
    #[serde(default)]
    pub biography: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeCharacter {
    pub name: String,
}

/// One entry from `/shows/{id}/cast`
#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeCastEntry {
    pub person: TvMazePerson,
    pub character: TvMazeCharacter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeEmbeddedShow {
    pub show: TvMazeShow,
}

/// One entry from `/people/{id}/castcredits?embed=show`
#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeCastCredit {
    #[serde(rename = "_embedded")]
    pub embedded: TvMazeEmbeddedShow,
}

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"))
}

/// Removes every `<...>` tag from catalog HTML
pub fn strip_markup(html: &str) -> String {
    markup_pattern().replace_all(html, "").into_owned()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TvMazeShow> for Movie {
    fn from(show: TvMazeShow) -> Self {
        let (medium, original) = match show.image {
            Some(image) => (non_empty(image.medium), non_empty(image.original)),
            None => (None, None),
        };

        let overview = non_empty(show.summary)
            .map(|summary| strip_markup(&summary))
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        // Zero counts as unrated, same as a missing rating
        let vote_average = show
            .rating
            .and_then(|r| r.average)
            .filter(|avg| *avg != 0.0)
            .unwrap_or(DEFAULT_VOTE_AVERAGE);

        Movie {
            id: show.id,
            title: show.name,
            poster_path: medium.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            backdrop_path: original.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            overview,
            vote_average,
            release_date: show.premiered.unwrap_or_default(),
            genre_ids: Vec::new(),
            genres: show
                .genres
                .into_iter()
                .enumerate()
                .map(|(index, name)| Genre::new(index as u32 + 1, name))
                .collect(),
        }
    }
}

impl From<TvMazeCastEntry> for CastMember {
    fn from(entry: TvMazeCastEntry) -> Self {
        CastMember {
            id: entry.person.id,
            name: entry.person.name,
            character: entry.character.name,
            image: entry.person.image.and_then(|i| non_empty(i.medium)),
        }
    }
}

impl From<TvMazePerson> for Person {
    fn from(person: TvMazePerson) -> Self {
        Person {
            id: person.id,
            name: person.name,
            image: person.image.and_then(|i| non_empty(i.medium)),
            biography: non_empty(person.biography).unwrap_or_else(|| NO_BIOGRAPHY.to_string()),
            known_for: Vec::new(),
        }
    }
}

impl From<TvMazeCastCredit> for Movie {
    fn from(credit: TvMazeCastCredit) -> Self {
        Movie::from(credit.embedded.show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_deserialization_and_mapping() {
        let json = r#"{
            "id": 1,
            "name": "Under the Dome",
            "genres": ["Drama", "Science-Fiction", "Thriller"],
            "premiered": "2013-06-24",
            "rating": {"average": 6.5},
            "image": {
                "medium": "https://static.tvmaze.com/uploads/images/medium_portrait/81/202627.jpg",
                "original": "https://static.tvmaze.com/uploads/images/original_untouched/81/202627.jpg"
            },
            "summary": "<p><b>Under the Dome</b> is the story of a small town.</p>"
        }"#;

        let show: TvMazeShow = serde_json::from_str(json).unwrap();
        let movie = Movie::from(show);

        assert_eq!(movie.id, 1);
        assert_eq!(movie.title, "Under the Dome");
        assert_eq!(movie.overview, "Under the Dome is the story of a small town.");
        assert_eq!(movie.vote_average, 6.5);
        assert_eq!(movie.release_date, "2013-06-24");
        assert!(movie.poster_path.contains("medium_portrait"));
        assert!(movie.backdrop_path.contains("original_untouched"));
        assert!(movie.genre_ids.is_empty());

        let names: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Drama", "Science-Fiction", "Thriller"]);
    }

    #[test]
    fn test_show_with_missing_fields_gets_defaults() {
        let json = r#"{
            "id": 7,
            "name": "Obscure Show",
            "genres": [],
            "premiered": null,
            "rating": {"average": null},
            "image": null,
            "summary": null
        }"#;

        let show: TvMazeShow = serde_json::from_str(json).unwrap();
        let movie = Movie::from(show);

        assert_eq!(movie.poster_path, PLACEHOLDER_IMAGE);
        assert_eq!(movie.backdrop_path, PLACEHOLDER_IMAGE);
        assert_eq!(movie.overview, NO_DESCRIPTION);
        assert_eq!(movie.vote_average, DEFAULT_VOTE_AVERAGE);
        assert_eq!(movie.release_date, "");
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn test_zero_rating_treated_as_missing() {
        let json = r#"{"id": 3, "name": "Zero", "rating": {"average": 0}}"#;
        let movie = Movie::from(serde_json::from_str::<TvMazeShow>(json).unwrap());
        assert_eq!(movie.vote_average, DEFAULT_VOTE_AVERAGE);
    }

    #[test]
    fn test_markup_only_summary_falls_back() {
        let json = r#"{"id": 4, "name": "Tags", "summary": "<p></p>"}"#;
        let movie = Movie::from(serde_json::from_str::<TvMazeShow>(json).unwrap());
        assert_eq!(movie.overview, NO_DESCRIPTION);
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<p>One <i>two</i><br/> three</p>"),
            "One two three"
        );
        assert_eq!(strip_markup("plain"), "plain");
    }

    #[test]
    fn test_cast_entry_mapping() {
        let json = r#"{
            "person": {"id": 9, "name": "Mike Vogel", "image": {"medium": "https://img/9.jpg"}},
            "character": {"id": 1, "name": "Dale \"Barbie\" Barbara"}
        }"#;

        let member = CastMember::from(serde_json::from_str::<TvMazeCastEntry>(json).unwrap());
        assert_eq!(member.id, 9);
        assert_eq!(member.name, "Mike Vogel");
        assert_eq!(member.character, "Dale \"Barbie\" Barbara");
        assert_eq!(member.image.as_deref(), Some("https://img/9.jpg"));
    }

    #[test]
    fn test_person_without_biography() {
        let json = r#"{"id": 9, "name": "Mike Vogel", "image": null}"#;
        let person = Person::from(serde_json::from_str::<TvMazePerson>(json).unwrap());
        assert_eq!(person.biography, NO_BIOGRAPHY);
        assert!(person.image.is_none());
        assert!(person.known_for.is_empty());
    }

    #[test]
    fn test_cast_credit_uses_show_normalization() {
        let json = r#"{
            "_links": {"show": {"href": "https://api.tvmaze.com/shows/1"}},
            "_embedded": {"show": {"id": 1, "name": "Under the Dome", "genres": ["Drama"], "summary": null}}
        }"#;

        let movie = Movie::from(serde_json::from_str::<TvMazeCastCredit>(json).unwrap());
        assert_eq!(movie.id, 1);
        assert_eq!(movie.overview, NO_DESCRIPTION);
        assert_eq!(movie.genres[0].name, "Drama");
    }
}
