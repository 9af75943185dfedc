//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! (trending, search, details, credits, genre list).

mod api;
mod client;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    SearchMovieParams, TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbErrorResponse, TmdbGenre,
    TmdbGenreList, TmdbMovieDetails, TmdbMovieListItem, TmdbMovieListResponse,
};
