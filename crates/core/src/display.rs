//! Display transforms for the presentation components.
//!
//! Pure functions from catalog records to what a card or detail panel shows.
//! Rendering to markup happens in the server crate; everything here is
//! formatting and truncation only.

use chrono::{Datelike, NaiveDate};
use percent_encoding::utf8_percent_encode;
use serde::Serialize;

use crate::movie::{CastMember, CrewMember, MovieDetail, MovieSummary};

use crate::suggestion::QUERY_VALUE;

/// Cast members shown before the "show all" affordance.
pub const CAST_PREVIEW: usize = 6;
/// Crew members shown before the "show all" affordance.
pub const CREW_PREVIEW: usize = 5;

/// Image shown on a card when the movie has no poster.
pub const PLACEHOLDER_POSTER: &str = "/placeholder.png";

/// Builds absolute image URLs from catalog-relative paths.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base: String,
}

impl ImageUrls {
    /// `base` is the image host prefix, e.g. `https://image.tmdb.org/t/p`.
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn poster(&self, path: &str) -> String {
        format!("{}/w500{}", self.base, path)
    }

    pub fn profile(&self, path: &str) -> String {
        format!("{}/w92{}", self.base, path)
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Year of an ISO release date, if it parses.
pub fn release_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// Year-only label used in headers and cards.
pub fn year_label(date: &str) -> String {
    release_year(date)
        .map(|y| y.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn release_label(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        "Release Date: Unknown".to_string()
    } else {
        format!("Release Date: {date}")
    }
}

/// Rating to one decimal out of ten. Unrated (zero or non-finite) yields `None`.
pub fn rating_label(rating: f64) -> Option<String> {
    if !rating.is_finite() || rating <= 0.0 {
        return None;
    }
    Some(format!("{rating:.1}/10"))
}

// ---------------------------------------------------------------------------
// Truncation
// ---------------------------------------------------------------------------

/// A list cut to a preview length, with the count of what was cut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Truncated<T> {
    pub visible: Vec<T>,
    pub hidden: usize,
    pub expanded: bool,
}

impl<T> Truncated<T> {
    pub fn new(items: Vec<T>, limit: usize, expanded: bool) -> Self {
        let total = items.len();
        let mut visible = items;
        if !expanded {
            visible.truncate(limit);
        }
        Self {
            hidden: total - visible.len(),
            visible,
            expanded,
        }
    }

    pub fn total(&self) -> usize {
        self.visible.len() + self.hidden
    }

    /// Whether a toggle should be offered at all.
    pub fn is_toggleable(&self, limit: usize) -> bool {
        self.total() > limit
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCardView {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
    pub overview: String,
    pub href: String,
}

impl MovieCardView {
    pub fn new(movie: &MovieSummary, images: &ImageUrls) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|p| images.poster(p))
                .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
            overview: movie.overview.clone(),
            href: format!("/movie/{}", movie.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastEntry {
    pub name: String,
    /// `"{name} as {character}"`.
    pub label: String,
    /// `None` renders a skeleton avatar.
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrewEntry {
    /// `"{name} ({job})"`.
    pub label: String,
}

/// Which credit lists are shown in full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreditsToggle {
    pub all_cast: bool,
    pub all_crew: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetailView {
    pub id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub overview: String,
    pub genres: Vec<String>,
    pub year: String,
    pub release: String,
    pub rating: Option<String>,
    pub cast: Truncated<CastEntry>,
    pub crew: Truncated<CrewEntry>,
}

impl MovieDetailView {
    pub fn new(movie: &MovieDetail, images: &ImageUrls, toggle: CreditsToggle) -> Self {
        let cast = movie.cast.iter().map(|c| cast_entry(c, images)).collect();
        let crew = movie.crew.iter().map(crew_entry).collect();

        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_path.as_deref().map(|p| images.poster(p)),
            overview: movie.overview.clone(),
            genres: movie.genres.iter().map(|g| g.name.clone()).collect(),
            year: year_label(&movie.release_date),
            release: release_label(&movie.release_date),
            rating: rating_label(movie.rating),
            cast: Truncated::new(cast, CAST_PREVIEW, toggle.all_cast),
            crew: Truncated::new(crew, CREW_PREVIEW, toggle.all_crew),
        }
    }
}

fn cast_entry(member: &CastMember, images: &ImageUrls) -> CastEntry {
    CastEntry {
        name: member.name.clone(),
        label: format!("{} as {}", member.name, member.character),
        profile_url: member.profile_path.as_deref().map(|p| images.profile(p)),
    }
}

fn crew_entry(member: &CrewMember) -> CrewEntry {
    CrewEntry {
        label: format!("{} ({})", member.name, member.job),
    }
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareLinks {
    /// Canonical page URL, also what "copy link" copies.
    pub url: String,
    pub whatsapp: String,
    pub facebook: String,
}

impl ShareLinks {
    pub fn new(app_url: &str, movie_id: i64, title: &str) -> Self {
        let url = format!("{}/movie/{movie_id}", app_url.trim_end_matches('/'));
        let text = format!("{title} - {url}");
        Self {
            whatsapp: format!(
                "https://api.whatsapp.com/send?text={}",
                utf8_percent_encode(&text, QUERY_VALUE)
            ),
            facebook: format!(
                "https://www.facebook.com/sharer/sharer.php?u={}",
                utf8_percent_encode(&url, QUERY_VALUE)
            ),
            url,
        }
    }
}
