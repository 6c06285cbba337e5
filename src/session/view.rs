use crate::session::render::Card;
use crate::tmdb::Genre;

/// The UI surface the session controller drives. In a browser build this
/// maps onto the DOM (grid, genre selector, loading and error indicators);
/// tests record the calls instead.
pub trait View {
    /// Populate the genre selector.
    fn set_genres(&mut self, genres: &[Genre]);

    /// Append cards to the grid. Never clears existing cards.
    fn append_cards(&mut self, cards: &[Card]);

    /// Clear the grid wholesale (apply-filters only).
    fn clear_grid(&mut self);

    /// Remove a single card after it was marked seen.
    fn remove_card(&mut self, id: u64);

    fn set_loading(&mut self, on: bool);

    fn show_error(&mut self, message: &str);

    fn clear_error(&mut self);

    /// Ask the user to confirm clearing the seen set.
    fn confirm_clear_seen(&mut self) -> bool;
}
