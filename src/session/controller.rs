use std::collections::BTreeSet;

use tracing::debug;

use crate::session::api::{DiscoverQuery, MovieApi};
use crate::session::render::{card_for, Card};
use crate::session::store::{KvStore, SeenSet};
use crate::session::view::View;
use crate::tmdb::Genre;

/// Optimistic upper bound used until the first response reports the real
/// page count.
const INITIAL_TOTAL_PAGES: u32 = 999;

/// Filter state for one browsing session.
#[derive(Debug, Clone)]
pub struct FilterState {
    pub page: u32,
    pub total_pages: u32,
    pub genres: Vec<Genre>,
    pub selected_genres: BTreeSet<u32>,
    pub year_from: i32,
    pub year_to: i32,
}

/// One long-lived browsing session. Owns the filter state and the seen
/// set; drives the view and the movie API. All session state lives here,
/// nothing is ambient.
pub struct Session<A, S, V> {
    api: A,
    store: S,
    view: V,
    filter: FilterState,
    seen: SeenSet,
    image_base: String,
    loading: bool,
}

impl<A: MovieApi, S: KvStore, V: View> Session<A, S, V> {
    pub fn new(api: A, store: S, view: V, image_base: String, year_from: i32, year_to: i32) -> Self {
        let seen = SeenSet::load(&store);
        Self {
            api,
            store,
            view,
            filter: FilterState {
                page: 1,
                total_pages: INITIAL_TOTAL_PAGES,
                genres: Vec::new(),
                selected_genres: BTreeSet::new(),
                year_from,
                year_to,
            },
            seen,
            image_base,
            loading: false,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Fetch the genre catalog, populate the selector, then apply the
    /// initial filters. Any failure surfaces as a single error message.
    pub async fn boot(&mut self) {
        match self.api.genres().await {
            Ok(genres) => {
                self.view.set_genres(&genres);
                self.filter.genres = genres;
                let selected = self.filter.selected_genres.clone();
                let (from, to) = (self.filter.year_from, self.filter.year_to);
                self.apply_filters(selected, from, to).await;
            }
            Err(e) => self.view.show_error(&e.to_string()),
        }
    }

    /// Reset pagination to the new filter settings, clear the grid, and
    /// load the first page.
    pub async fn apply_filters(
        &mut self,
        selected_genres: BTreeSet<u32>,
        year_from: i32,
        year_to: i32,
    ) {
        self.filter.selected_genres = selected_genres;
        self.filter.year_from = year_from;
        self.filter.year_to = year_to;
        self.filter.page = 1;
        self.filter.total_pages = INITIAL_TOTAL_PAGES;
        self.view.clear_grid();
        self.load_next_page().await;
    }

    /// Load one page of discovery results and append the rendered cards.
    /// No-op past the last page, and while another load is in flight.
    /// On failure the page counter stays put so a retry re-attempts the
    /// same page.
    pub async fn load_next_page(&mut self) {
        if self.loading {
            debug!("ignoring load trigger while a page load is in flight");
            return;
        }
        if self.filter.page > self.filter.total_pages {
            return;
        }

        self.loading = true;
        self.view.set_loading(true);
        self.view.clear_error();

        let query = self.discover_query();
        match self.api.discover(&query).await {
            Ok(page) => {
                if let Some(total) = page.total_pages {
                    self.filter.total_pages = total;
                }
                let cards: Vec<Card> = page
                    .results
                    .iter()
                    .filter_map(|m| card_for(m, &self.seen, &self.image_base))
                    .collect();
                self.view.append_cards(&cards);
                self.filter.page += 1;
            }
            Err(e) => self.view.show_error(&e.to_string()),
        }

        self.loading = false;
        self.view.set_loading(false);
    }

    /// Mark a movie as seen: persist the id and drop its card.
    pub fn mark_seen(&mut self, id: u64) {
        self.seen.insert(id, &self.store);
        self.view.remove_card(id);
    }

    /// Empty the seen set after user confirmation, then re-apply the
    /// current filters so previously hidden movies reappear.
    pub async fn clear_seen(&mut self) {
        if !self.view.confirm_clear_seen() {
            return;
        }
        self.seen.clear(&self.store);
        let selected = self.filter.selected_genres.clone();
        let (from, to) = (self.filter.year_from, self.filter.year_to);
        self.apply_filters(selected, from, to).await;
    }

    fn discover_query(&self) -> DiscoverQuery {
        let genres = if self.filter.selected_genres.is_empty() {
            None
        } else {
            Some(
                self.filter
                    .selected_genres
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            )
        };

        DiscoverQuery {
            page: self.filter.page,
            from: format!("{}-01-01", self.filter.year_from),
            to: format!("{}-12-31", self.filter.year_to),
            genres,
        }
    }
}
