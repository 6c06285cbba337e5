pub mod api;
pub mod controller;
pub mod render;
pub mod store;
pub mod view;

pub use api::{ApiError, DiscoverQuery, HttpMovieApi, MovieApi};
pub use controller::{FilterState, Session};
pub use render::Card;
pub use store::{FileStore, KvStore, MemStore, SeenSet};
pub use view::View;
