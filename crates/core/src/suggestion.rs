//! Typeahead hits for the search input.
//!
//! A multi-kind search returns movies and people in one list. Each hit is a
//! variant of [`Suggestion`] tagged by `kind`, so rendering is a match rather
//! than probing optional fields.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    Movie {
        id: i64,
        title: String,
        release_date: Option<String>,
        poster_path: Option<String>,
    },
    Person {
        id: i64,
        name: String,
        known_for_department: Option<String>,
        profile_path: Option<String>,
    },
}

impl Suggestion {
    /// One-line text shown in the dropdown.
    pub fn label(&self) -> String {
        match self {
            Suggestion::Movie {
                title, release_date, ..
            } => match release_date.as_deref().and_then(|d| d.get(..4)) {
                Some(year) if !year.is_empty() => format!("{title} ({year})"),
                _ => title.clone(),
            },
            Suggestion::Person {
                name,
                known_for_department,
                ..
            } => match known_for_department.as_deref() {
                Some(dept) if !dept.is_empty() => format!("{name} · {dept}"),
                _ => name.clone(),
            },
        }
    }

    /// Where selecting the hit navigates. People have no page of their own,
    /// so selecting one searches for their name.
    pub fn href(&self) -> String {
        match self {
            Suggestion::Movie { id, .. } => format!("/movie/{id}"),
            Suggestion::Person { name, .. } => {
                format!("/?query={}", utf8_percent_encode(name, QUERY_VALUE))
            }
        }
    }
}

/// Bytes escaped in a query-string value: everything except the RFC 3986
/// unreserved set.
pub const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');
