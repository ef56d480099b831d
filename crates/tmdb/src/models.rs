//! TMDB v3 wire types and their conversion into domain records.

use jafflix_core::movie::{CastMember, CrewMember, Genre, MovieDetail, MovieSummary};
use jafflix_core::suggestion::Suggestion;
use serde::Deserialize;

/// Envelope shared by every paged listing endpoint.
#[derive(Debug, Deserialize)]
pub struct Paged<T> {
    #[serde(default)]
    pub page: i64,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}

#[derive(Debug, Deserialize)]
pub struct MovieResult {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
}

impl From<MovieResult> for MovieSummary {
    fn from(r: MovieResult) -> Self {
        MovieSummary {
            id: r.id,
            title: r.title,
            poster_path: r.poster_path,
            overview: r.overview,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenreResult {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CastResult {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CrewResult {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastResult>,
    #[serde(default)]
    pub crew: Vec<CrewResult>,
}

/// `GET /movie/{id}?append_to_response=credits`.
#[derive(Debug, Deserialize)]
pub struct MovieDetailResult {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: Vec<GenreResult>,
    #[serde(default)]
    pub vote_average: f64,
    /// TMDB sends `""` or omits the field for unreleased titles.
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub credits: Credits,
}

impl From<MovieDetailResult> for MovieDetail {
    fn from(r: MovieDetailResult) -> Self {
        MovieDetail {
            id: r.id,
            title: r.title,
            poster_path: r.poster_path,
            overview: r.overview,
            genres: r
                .genres
                .into_iter()
                .map(|g| Genre { id: g.id, name: g.name })
                .collect(),
            rating: r.vote_average,
            release_date: r.release_date.unwrap_or_default(),
            cast: r
                .credits
                .cast
                .into_iter()
                .map(|c| CastMember {
                    id: c.id,
                    name: c.name,
                    character: c.character,
                    profile_path: c.profile_path,
                })
                .collect(),
            crew: r
                .credits
                .crew
                .into_iter()
                .map(|c| CrewMember {
                    id: c.id,
                    name: c.name,
                    job: c.job,
                })
                .collect(),
        }
    }
}

/// One hit of `GET /search/multi`. TV results are parsed and then dropped.
#[derive(Debug, Deserialize)]
#[serde(tag = "media_type", rename_all = "snake_case")]
pub enum MultiResult {
    Movie {
        id: i64,
        #[serde(default)]
        title: String,
        release_date: Option<String>,
        poster_path: Option<String>,
    },
    Person {
        id: i64,
        #[serde(default)]
        name: String,
        known_for_department: Option<String>,
        profile_path: Option<String>,
    },
    #[serde(other)]
    Other,
}

impl MultiResult {
    pub fn into_suggestion(self) -> Option<Suggestion> {
        match self {
            MultiResult::Movie {
                id,
                title,
                release_date,
                poster_path,
            } => Some(Suggestion::Movie {
                id,
                title,
                release_date,
                poster_path,
            }),
            MultiResult::Person {
                id,
                name,
                known_for_department,
                profile_path,
            } => Some(Suggestion::Person {
                id,
                name,
                known_for_department,
                profile_path,
            }),
            MultiResult::Other => None,
        }
    }
}

/// Error body TMDB returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status_message: Option<String>,
    pub status_code: Option<i64>,
}
