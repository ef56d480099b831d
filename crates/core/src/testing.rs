//! In-memory catalog for controller tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{CatalogResult, MovieCatalog};
use crate::error::CatalogError;
use crate::movie::{CastMember, CrewMember, Genre, MovieDetail, MovieId, MovieSummary};
use crate::suggestion::Suggestion;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Popular(i64),
    Search(String, i64),
    Details(String),
    Suggest(String),
}

/// Answers every call from fixed data. Lists are keyed by query (the popular
/// listing uses the empty key), details by id.
#[derive(Default)]
pub struct FakeCatalog {
    calls: Mutex<Vec<Call>>,
    delays: HashMap<String, Duration>,
    failures: HashMap<String, String>,
    details: HashMap<String, MovieDetail>,
}

pub fn summary(id: i64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        poster_path: None,
        overview: String::new(),
    }
}

pub fn cast(n: usize) -> Vec<CastMember> {
    (1..=n)
        .map(|i| CastMember {
            id: i as i64,
            name: format!("Actor {i}"),
            character: format!("Character {i}"),
            profile_path: Some(format!("/actor{i}.jpg")),
        })
        .collect()
}

pub fn crew(n: usize) -> Vec<CrewMember> {
    (1..=n)
        .map(|i| CrewMember {
            id: i as i64,
            name: format!("Crew {i}"),
            job: format!("Job {i}"),
        })
        .collect()
}

pub fn detail(id: i64, title: &str) -> MovieDetail {
    MovieDetail {
        id,
        title: title.to_string(),
        poster_path: Some("/poster.jpg".into()),
        overview: "A ticking-time-bomb insomniac and a slippery soap salesman.".into(),
        genres: vec![Genre {
            id: 18,
            name: "Drama".into(),
        }],
        rating: 8.433,
        release_date: "1999-10-15".into(),
        cast: cast(2),
        crew: crew(1),
    }
}

impl FakeCatalog {
    pub fn delayed(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    pub fn failing(mut self, key: &str, message: &str) -> Self {
        self.failures.insert(key.to_string(), message.to_string());
        self
    }

    pub fn with_detail(mut self, key: &str, movie: MovieDetail) -> Self {
        self.details.insert(key.to_string(), movie);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, call: Call, key: &str) -> CatalogResult<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        match self.failures.get(key) {
            Some(message) => Err(CatalogError::Upstream {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    async fn list_popular(&self, page: i64) -> CatalogResult<Vec<MovieSummary>> {
        self.answer(Call::Popular(page), "").await?;
        Ok(vec![summary(page, &format!("popular p{page}"))])
    }

    async fn search(&self, query: &str, page: i64) -> CatalogResult<Vec<MovieSummary>> {
        self.answer(Call::Search(query.to_string(), page), query).await?;
        Ok(vec![summary(page, &format!("{query} p{page}"))])
    }

    async fn get_details(&self, id: &MovieId) -> CatalogResult<MovieDetail> {
        self.answer(Call::Details(id.to_string()), id.as_str()).await?;
        self.details
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| CatalogError::Upstream {
                status: 404,
                message: "The resource you requested could not be found.".into(),
            })
    }

    async fn suggest(&self, query: &str) -> CatalogResult<Vec<Suggestion>> {
        self.answer(Call::Suggest(query.to_string()), query).await?;
        Ok(Vec::new())
    }
}
