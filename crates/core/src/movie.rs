//! Movie records as the rest of the application sees them.
//!
//! These are transient: created from a catalog response and discarded on the
//! next fetch. Wire formats live in the metadata client crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a movie as it arrives from a route parameter or a listing.
///
/// Route parameters are strings and listings carry integers, so both convert
/// into this type. An empty identifier is legal to hold but never fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for the empty string or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MovieId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for MovieId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Lightweight listing record used in grid views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub job: String,
}

/// Full record including genres, rating, release date, cast and crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
    pub genres: Vec<Genre>,
    /// Average vote on a 0-10 scale.
    pub rating: f64,
    /// ISO date (`YYYY-MM-DD`); empty when the upstream has none.
    pub release_date: String,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}
