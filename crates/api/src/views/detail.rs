//! Movie detail page.

use axum::response::Html;
use jafflix_core::display::{
    CastEntry, CreditsToggle, CrewEntry, MovieDetailView, ShareLinks, Truncated, CAST_PREVIEW,
    CREW_PREVIEW,
};
use jafflix_core::session::Session;

use super::escape;
use super::layout::document;

pub const NOT_FOUND_HEADING: &str = "Movie not found";

pub fn detail_skeleton(session: &Session) -> Html<String> {
    let body = r#"<article class="movie-detail skeleton" aria-busy="true">
<div class="poster skeleton"></div><div class="line skeleton"></div><div class="line skeleton"></div>
</article>"#;
    document("Loading", Some(session), body)
}

/// Shown for a failed fetch or a missing record, with a retry link back to
/// the same URL and a link home.
pub fn detail_not_found(session: &Session, retry_href: &str, message: Option<&str>) -> Html<String> {
    let detail = message
        .map(|m| format!(r#"<p class="error">{}</p>"#, escape(m)))
        .unwrap_or_default();
    let body = format!(
        r#"<section class="not-found"><h1>{NOT_FOUND_HEADING}</h1>{detail}
<a class="retry" href="{}">Try again</a> <a href="/">Back to home</a></section>"#,
        escape(retry_href)
    );
    document(NOT_FOUND_HEADING, Some(session), &body)
}

pub fn detail_page(
    session: &Session,
    view: &MovieDetailView,
    toggle: CreditsToggle,
    share: &ShareLinks,
) -> Html<String> {
    let poster = view
        .poster_url
        .as_deref()
        .map(|src| {
            format!(
                r#"<img class="poster" src="{}" alt="{}">"#,
                escape(src),
                escape(&view.title)
            )
        })
        .unwrap_or_default();

    let genres: String = view
        .genres
        .iter()
        .map(|g| format!(r#"<span class="genre">{}</span>"#, escape(g)))
        .collect();

    let rating = view
        .rating
        .as_deref()
        .map(|r| format!(r#"<p class="rating">Rating: {}</p>"#, escape(r)))
        .unwrap_or_else(|| r#"<p class="rating">Not yet rated</p>"#.to_string());

    let cast = cast_section(view.id, &view.cast, toggle);
    let crew = crew_section(view.id, &view.crew, toggle);
    let share = share_section(share);

    let body = format!(
        r#"<article class="movie-detail">
{poster}
<div class="info">
<h1>{title} <span class="year">({year})</span></h1>
<div class="genres">{genres}</div>
{rating}
<p class="release">{release}</p>
<p class="overview">{overview}</p>
</div>
{cast}
{crew}
{share}
<a href="/">Back to home</a>
</article>"#,
        title = escape(&view.title),
        year = escape(&view.year),
        release = escape(&view.release),
        overview = escape(&view.overview),
    );

    document(&view.title, Some(session), &body)
}

/// Href that flips one credit list and keeps the other as it is.
fn toggle_href(movie_id: i64, toggle: CreditsToggle) -> String {
    let mut params = Vec::new();
    if toggle.all_cast {
        params.push("cast=true");
    }
    if toggle.all_crew {
        params.push("crew=true");
    }
    if params.is_empty() {
        format!("/movie/{movie_id}")
    } else {
        format!("/movie/{movie_id}?{}", params.join("&"))
    }
}

fn toggle_link<T>(href: String, list: &Truncated<T>) -> String {
    let label = if list.expanded {
        "Show less".to_string()
    } else {
        format!("Show all ({})", list.total())
    };
    format!(r#"<a class="toggle" href="{}">{label}</a>"#, escape(&href))
}

fn cast_section(movie_id: i64, cast: &Truncated<CastEntry>, toggle: CreditsToggle) -> String {
    if cast.total() == 0 {
        return String::new();
    }
    let items: String = cast
        .visible
        .iter()
        .map(|c| {
            let photo = c
                .profile_url
                .as_deref()
                .map(|src| format!(r#"<img src="{}" alt="" loading="lazy">"#, escape(src)))
                .unwrap_or_default();
            format!(r#"<li class="cast-member">{photo}<span>{}</span></li>"#, escape(&c.label))
        })
        .collect();
    let link = if cast.is_toggleable(CAST_PREVIEW) {
        let flipped = CreditsToggle {
            all_cast: !toggle.all_cast,
            ..toggle
        };
        toggle_link(toggle_href(movie_id, flipped), cast)
    } else {
        String::new()
    };
    format!(r#"<section class="cast"><h2>Cast</h2><ul>{items}</ul>{link}</section>"#)
}

fn crew_section(movie_id: i64, crew: &Truncated<CrewEntry>, toggle: CreditsToggle) -> String {
    if crew.total() == 0 {
        return String::new();
    }
    let items: String = crew
        .visible
        .iter()
        .map(|c| format!(r#"<li class="crew-member">{}</li>"#, escape(&c.label)))
        .collect();
    let link = if crew.is_toggleable(CREW_PREVIEW) {
        let flipped = CreditsToggle {
            all_crew: !toggle.all_crew,
            ..toggle
        };
        toggle_link(toggle_href(movie_id, flipped), crew)
    } else {
        String::new()
    };
    format!(r#"<section class="crew"><h2>Crew</h2><ul>{items}</ul>{link}</section>"#)
}

fn share_section(share: &ShareLinks) -> String {
    format!(
        r#"<section class="share"><h2>Share</h2>
<a class="share-whatsapp" href="{whatsapp}" target="_blank" rel="noopener">WhatsApp</a>
<a class="share-facebook" href="{facebook}" target="_blank" rel="noopener">Facebook</a>
<input class="share-url" type="text" readonly value="{url}">
<button type="button" class="share-copy" data-copy="{url}">Copy link</button>
</section>"#,
        whatsapp = escape(&share.whatsapp),
        facebook = escape(&share.facebook),
        url = escape(&share.url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_href_keeps_other_list_state() {
        let both = CreditsToggle {
            all_cast: true,
            all_crew: true,
        };
        assert_eq!(toggle_href(550, both), "/movie/550?cast=true&crew=true");
        assert_eq!(toggle_href(550, CreditsToggle::default()), "/movie/550");
    }
}
