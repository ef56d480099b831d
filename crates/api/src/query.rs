//! Query parameter types shared by page and API handlers.

use jafflix_core::display::CreditsToggle;
use jafflix_core::list::ListQuery;
use serde::Deserialize;

/// `?query=&page=` for listings. Both are optional; the page is passed
/// through unvalidated.
#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    #[serde(default)]
    pub query: String,
    pub page: Option<i64>,
}

impl MovieListParams {
    pub fn into_list_query(self) -> ListQuery {
        ListQuery {
            page: self.page.unwrap_or(1),
            query: self.query.trim().to_string(),
        }
    }
}

/// `?cast=true&crew=true` on the detail page expands the credit lists.
#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    #[serde(default)]
    pub cast: bool,
    #[serde(default)]
    pub crew: bool,
}

impl DetailParams {
    pub fn toggle(&self) -> CreditsToggle {
        CreditsToggle {
            all_cast: self.cast,
            all_crew: self.crew,
        }
    }
}

/// `?query=` for typeahead suggestions.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub query: String,
}

/// `?callbackUrl=` on sign-in and sign-out.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// Query the provider redirects back with.
#[derive(Debug, Default, Deserialize)]
pub struct OAuthCallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// `?error=` on the sign-in page.
#[derive(Debug, Default, Deserialize)]
pub struct SignInPageParams {
    pub error: Option<String>,
}
