//! API client library for moviegallery.
//!
//! Provides the TMDB transport and the movie query client that turns
//! raw responses into gallery-ready results with resolved genres and
//! pagination metadata.

/// Movie query client (genre resolution, pagination, view callbacks).
pub mod gallery;

/// TMDB API client.
pub mod tmdb;
