use async_trait::async_trait;

use crate::tmdb::{DiscoverPage, Genre, GenreList};

/// One discovery fetch against the proxy endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub page: u32,
    pub from: String,
    pub to: String,
    /// Comma-joined genre ids; None when no genre is selected.
    pub genres: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Upstream returned status {0}")]
    Status(u16),
}

/// Movie data source as seen by the session controller. The real
/// implementation talks to the proxy endpoint; tests substitute their own.
#[async_trait]
pub trait MovieApi {
    async fn genres(&self) -> Result<Vec<Genre>, ApiError>;
    async fn discover(&self, query: &DiscoverQuery) -> Result<DiscoverPage, ApiError>;
}

/// Client for the `/api/tmdb` proxy endpoint.
pub struct HttpMovieApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMovieApi {
    /// `base_url` points at the proxy endpoint itself, e.g.
    /// `http://localhost:8649/api/tmdb`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("mode", "genres")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        let list: GenreList = response.json().await?;
        Ok(list.genres)
    }

    async fn discover(&self, query: &DiscoverQuery) -> Result<DiscoverPage, ApiError> {
        let page = query.page.to_string();
        let mut params = vec![
            ("mode", "discover"),
            ("page", page.as_str()),
            ("from", query.from.as_str()),
            ("to", query.to.as_str()),
        ];
        if let Some(genres) = query.genres.as_deref() {
            params.push(("genres", genres));
        }

        let response = self.client.get(&self.base_url).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}
