use serde::{Deserialize, Serialize};

/// One movie record as returned by the upstream discovery resource.
/// Only the fields the session half consumes are modelled; everything
/// else in the upstream payload is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// One page of discovery results. A missing `total_pages` is kept as None
/// so the session can hold on to its previous value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverPage {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub results: Vec<Movie>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_page_tolerates_missing_fields() {
        let page: DiscoverPage = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert_eq!(page.page, Some(1));
        assert_eq!(page.total_pages, None);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_movie_ignores_unknown_fields() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": 5, "title": "Heat", "poster_path": null,
                "release_date": "1995-12-15", "vote_average": 8.3,
                "overview": "..."}"#,
        )
        .unwrap();
        assert_eq!(movie.id, 5);
        assert_eq!(movie.title, "Heat");
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.release_date.as_deref(), Some("1995-12-15"));
    }
}
