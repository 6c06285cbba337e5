use crate::session::store::SeenSet;
use crate::tmdb::Movie;

/// Renderable description of one movie card. Pure data; the view decides
/// what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u64,
    pub title: String,
    pub year: String,
    pub poster: String,
}

/// Map a movie record to a card, or nothing if it should not be shown.
/// Movies without a poster are permanently skipped; movies already in the
/// seen set are filtered out.
pub fn card_for(movie: &Movie, seen: &SeenSet, image_base: &str) -> Option<Card> {
    let poster_path = movie.poster_path.as_deref()?;
    if poster_path.is_empty() || seen.contains(movie.id) {
        return None;
    }

    let year = movie
        .release_date
        .as_deref()
        .map(|d| d.chars().take(4).collect())
        .unwrap_or_default();

    Some(Card {
        id: movie.id,
        title: movie.title.clone(),
        year,
        poster: poster_url(image_base, poster_path),
    })
}

pub fn poster_url(image_base: &str, poster_path: &str) -> String {
    format!("{}{}", image_base, poster_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::MemStore;

    const IMG: &str = "https://image.tmdb.org/t/p/w342";

    fn movie(id: u64, poster: Option<&str>) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            poster_path: poster.map(String::from),
            release_date: Some("2023-06-15".to_string()),
        }
    }

    #[test]
    fn test_card_fields() {
        let seen = SeenSet::default();
        let card = card_for(&movie(1, Some("/abc.jpg")), &seen, IMG).unwrap();
        assert_eq!(card.id, 1);
        assert_eq!(card.title, "Movie 1");
        assert_eq!(card.year, "2023");
        assert_eq!(card.poster, "https://image.tmdb.org/t/p/w342/abc.jpg");
    }

    #[test]
    fn test_missing_poster_never_rendered() {
        let store = MemStore::new();
        let mut seen = SeenSet::load(&store);
        assert!(card_for(&movie(5, None), &seen, IMG).is_none());

        // Seen-set membership makes no difference without a poster.
        seen.insert(5, &store);
        assert!(card_for(&movie(5, None), &seen, IMG).is_none());
    }

    #[test]
    fn test_empty_poster_path_skipped() {
        let seen = SeenSet::default();
        assert!(card_for(&movie(5, Some("")), &seen, IMG).is_none());
    }

    #[test]
    fn test_seen_movie_excluded() {
        let store = MemStore::new();
        let mut seen = SeenSet::load(&store);
        seen.insert(7, &store);
        assert!(card_for(&movie(7, Some("/x.jpg")), &seen, IMG).is_none());
        assert!(card_for(&movie(8, Some("/x.jpg")), &seen, IMG).is_some());
    }

    #[test]
    fn test_missing_release_date_gives_empty_year() {
        let seen = SeenSet::default();
        let mut m = movie(1, Some("/a.jpg"));
        m.release_date = None;
        let card = card_for(&m, &seen, IMG).unwrap();
        assert_eq!(card.year, "");
    }
}
