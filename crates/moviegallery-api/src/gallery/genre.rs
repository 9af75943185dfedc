//! Genre id to name resolution.

use crate::tmdb::{TmdbGenre, TmdbGenreList};

/// Movie genre table as returned by `genre/movie/list`.
///
/// Fetched fresh for every query and never cached. TMDB has about
/// twenty movie genres, so lookups scan linearly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreTable {
    entries: Vec<TmdbGenre>,
}

impl GenreTable {
    /// Creates a table from `(id, name)` pairs.
    #[must_use]
    pub fn new(entries: Vec<TmdbGenre>) -> Self {
        Self { entries }
    }

    /// Returns the name for `id`, or `None` if the table lacks it.
    #[must_use]
    pub fn name(&self, id: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|genre| genre.id == id)
            .map(|genre| genre.name.as_str())
    }

    /// Resolves genre ids to names, preserving order.
    ///
    /// Ids missing from the table are skipped.
    #[must_use]
    pub fn resolve(&self, ids: &[u32]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| {
                let name = self.name(id);
                if name.is_none() {
                    tracing::debug!(genre_id = id, "unknown genre id skipped");
                }
                name.map(String::from)
            })
            .collect()
    }
}

impl From<TmdbGenreList> for GenreTable {
    fn from(list: TmdbGenreList) -> Self {
        Self::new(list.genres)
    }
}
