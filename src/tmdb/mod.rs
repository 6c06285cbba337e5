pub mod proxy;
pub mod types;

pub use proxy::tmdb_proxy;
pub use types::{DiscoverPage, Genre, GenreList, Movie};
