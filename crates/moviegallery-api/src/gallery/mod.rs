//! Movie gallery query module.
//!
//! Turns TMDB list and detail responses into gallery results: genre ids
//! resolved to names, page counts derived client-side, and UI side
//! effects reported through `GalleryView`.

mod client;
mod error;
mod genre;
mod models;
mod pagination;
mod view;

pub use client::{MovieQueryClient, NO_MATCHES_MESSAGE};
pub use error::{QueryError, QueryErrorKind};
pub use genre::GenreTable;
pub use models::{CastMember, CrewMember, MovieDetail, MovieSummary, QueryResult};
pub use pagination::{PAGE_SIZE, PaginationState, total_pages_for};
pub use view::GalleryView;
