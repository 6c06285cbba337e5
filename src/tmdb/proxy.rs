use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use serde::Deserialize;
use tracing::warn;

use crate::server::AppState;

const CACHE_CONTROL: &str = "s-maxage=60, stale-while-revalidate=600";

/// Query parameters accepted by the proxy endpoint. Everything is optional;
/// parsing is best effort and unknown values fall back to discovery mode.
#[derive(Debug, Default, Deserialize)]
pub struct ProxyParams {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

impl ProxyParams {
    fn is_genre_mode(&self) -> bool {
        self.mode.as_deref() == Some("genres")
    }
}

/// Build the upstream path and query pairs for an incoming proxy request.
pub fn upstream_request(params: &ProxyParams) -> (&'static str, Vec<(&'static str, String)>) {
    let endpoint = if params.is_genre_mode() {
        "/genre/movie/list"
    } else {
        "/discover/movie"
    };

    let page = params.page.as_deref().unwrap_or("1");
    let mut query = vec![
        ("page", page.to_string()),
        ("language", "en-US".to_string()),
        ("sort_by", "popularity.desc".to_string()),
    ];

    if let Some(genres) = params.genres.as_deref().filter(|s| !s.is_empty()) {
        query.push(("with_genres", genres.to_string()));
    }
    if let Some(from) = params.from.as_deref().filter(|s| !s.is_empty()) {
        query.push(("primary_release_date.gte", from.to_string()));
    }
    if let Some(to) = params.to.as_deref().filter(|s| !s.is_empty()) {
        query.push(("primary_release_date.lte", to.to_string()));
    }

    (endpoint, query)
}

/// GET /api/tmdb
///
/// Relays the upstream response verbatim: same status code, same JSON body.
/// The only additions are the bearer credential on the way out and a
/// Cache-Control header on the way back.
pub async fn tmdb_proxy(
    State(state): State<AppState>,
    Query(params): Query<ProxyParams>,
) -> Result<Response, StatusCode> {
    let (endpoint, query) = upstream_request(&params);
    let url = format!("{}{}", state.config.tmdb.api_base, endpoint);

    let upstream = state
        .http
        .get(&url)
        .query(&query)
        .bearer_auth(&state.config.tmdb.bearer)
        .send()
        .await
        .map_err(|e| {
            warn!(error = %e, url = %url, "upstream request failed");
            StatusCode::BAD_GATEWAY
        })?;

    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    let body_bytes = upstream.bytes().await.map_err(|e| {
        warn!(error = %e, url = %url, "failed to read upstream body");
        StatusCode::BAD_GATEWAY
    })?;

    let mut headers = HeaderMap::new();
    if let Ok(value) = header::HeaderValue::from_str(&content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static(CACHE_CONTROL),
    );

    let mut response = Response::new(Body::from(body_bytes));
    *response.status_mut() =
        StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    *response.headers_mut() = headers;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        mode: Option<&str>,
        page: Option<&str>,
        genres: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> ProxyParams {
        ProxyParams {
            mode: mode.map(String::from),
            page: page.map(String::from),
            genres: genres.map(String::from),
            from: from.map(String::from),
            to: to.map(String::from),
        }
    }

    fn get<'a>(query: &'a [(&str, String)], key: &str) -> Option<&'a str> {
        query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_endpoint_selection() {
        let (endpoint, _) = upstream_request(&params(Some("genres"), None, None, None, None));
        assert_eq!(endpoint, "/genre/movie/list");

        let (endpoint, _) = upstream_request(&params(Some("discover"), None, None, None, None));
        assert_eq!(endpoint, "/discover/movie");

        let (endpoint, _) = upstream_request(&params(None, None, None, None, None));
        assert_eq!(endpoint, "/discover/movie");

        // Unknown mode falls back to discovery.
        let (endpoint, _) = upstream_request(&params(Some("bogus"), None, None, None, None));
        assert_eq!(endpoint, "/discover/movie");
    }

    #[test]
    fn test_fixed_query_parameters() {
        let (_, query) = upstream_request(&params(None, None, None, None, None));
        assert_eq!(get(&query, "page"), Some("1"));
        assert_eq!(get(&query, "language"), Some("en-US"));
        assert_eq!(get(&query, "sort_by"), Some("popularity.desc"));
    }

    #[test]
    fn test_page_passthrough() {
        let (_, query) = upstream_request(&params(None, Some("7"), None, None, None));
        assert_eq!(get(&query, "page"), Some("7"));
    }

    #[test]
    fn test_optional_parameters_present_iff_provided() {
        let (_, query) = upstream_request(&params(
            None,
            None,
            Some("28,12"),
            Some("2023-01-01"),
            Some("2024-12-31"),
        ));
        assert_eq!(get(&query, "with_genres"), Some("28,12"));
        assert_eq!(get(&query, "primary_release_date.gte"), Some("2023-01-01"));
        assert_eq!(get(&query, "primary_release_date.lte"), Some("2024-12-31"));

        let (_, query) = upstream_request(&params(None, None, None, None, None));
        assert!(get(&query, "with_genres").is_none());
        assert!(get(&query, "primary_release_date.gte").is_none());
        assert!(get(&query, "primary_release_date.lte").is_none());
    }

    #[test]
    fn test_empty_strings_treated_as_absent() {
        let (_, query) = upstream_request(&params(None, None, Some(""), Some(""), Some("")));
        assert!(get(&query, "with_genres").is_none());
        assert!(get(&query, "primary_release_date.gte").is_none());
        assert!(get(&query, "primary_release_date.lte").is_none());
    }
}
