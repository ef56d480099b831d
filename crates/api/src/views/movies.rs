//! Listing fragments: search bar, movie grid, pagination and their
//! loading / empty / error states.

use jafflix_core::display::{ImageUrls, MovieCardView};
use jafflix_core::movie::MovieSummary;
use jafflix_core::suggestion::QUERY_VALUE;
use percent_encoding::utf8_percent_encode;

use super::escape;

/// Cards shown by the loading skeleton.
pub const SKELETON_CARDS: usize = 8;

pub const EMPTY_LISTING: &str = "No movies found";

/// Search form. Submits `?query=` to the landing page; the input also feeds
/// the suggestions endpoint.
pub fn search_bar(query: &str) -> String {
    format!(
        r#"<form class="search-bar" role="search" method="get" action="/">
<input type="search" name="query" value="{}" placeholder="Search movies..." autocomplete="off" data-suggest="/api/v1/suggestions" data-live="/api/v1/ws/search">
<button type="submit">Search</button>
</form>"#,
        escape(query)
    )
}

pub fn movie_card(card: &MovieCardView) -> String {
    format!(
        r#"<a class="movie-card" href="{href}"><img src="{poster}" alt="{title}" loading="lazy"><h3>{title}</h3><p>{overview}</p></a>"#,
        href = escape(&card.href),
        poster = escape(&card.poster_url),
        title = escape(&card.title),
        overview = escape(&card.overview),
    )
}

pub fn movie_grid(movies: &[MovieSummary], images: &ImageUrls) -> String {
    let cards: String = movies
        .iter()
        .map(|m| movie_card(&MovieCardView::new(m, images)))
        .collect();
    format!(r#"<section class="movie-grid">{cards}</section>"#)
}

pub fn skeleton_grid() -> String {
    let cards = r#"<div class="movie-card skeleton" aria-hidden="true"></div>"#.repeat(SKELETON_CARDS);
    format!(r#"<section class="movie-grid loading" aria-busy="true">{cards}</section>"#)
}

pub fn empty_state() -> String {
    format!(r#"<p class="empty-state">{EMPTY_LISTING}</p>"#)
}

pub fn inline_error(message: &str) -> String {
    format!(r#"<p class="error" role="alert">{}</p>"#, escape(message))
}

/// Href for `page` of the listing for `query`.
pub fn page_href(query: &str, page: i64) -> String {
    if query.is_empty() {
        format!("/?page={page}")
    } else {
        format!("/?query={}&page={page}", utf8_percent_encode(query, QUERY_VALUE))
    }
}

/// Previous/next controls. "Previous" is disabled on page 1 and below.
pub fn pagination(query: &str, page: i64) -> String {
    let previous = if page > 1 {
        format!(
            r#"<a class="page-prev" href="{}">Previous</a>"#,
            escape(&page_href(query, page - 1))
        )
    } else {
        r#"<span class="page-prev disabled" aria-disabled="true">Previous</span>"#.to_string()
    };
    let next = format!(
        r#"<a class="page-next" href="{}">Next</a>"#,
        escape(&page_href(query, page.saturating_add(1)))
    );
    format!(r#"<nav class="pagination">{previous}<span class="page-current">Page {page}</span>{next}</nav>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_href_keeps_encoded_query() {
        assert_eq!(page_href("", 3), "/?page=3");
        assert_eq!(page_href("star wars", 2), "/?query=star%20wars&page=2");
    }

    #[test]
    fn previous_is_disabled_on_first_page() {
        let nav = pagination("", 1);
        assert!(nav.contains("page-prev disabled"));
        assert!(nav.contains(r#"href="/?page=2""#));
    }

    #[test]
    fn card_escapes_catalog_text() {
        let card = MovieCardView {
            id: 1,
            title: "<b>Bold</b>".into(),
            poster_url: "/placeholder.png".into(),
            overview: String::new(),
            href: "/movie/1".into(),
        };
        let html = movie_card(&card);
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
