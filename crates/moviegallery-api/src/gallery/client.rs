//! `MovieQueryClient` - trending, search and detail queries for the gallery.

use anyhow::Context;
use tracing::instrument;

use super::error::QueryError;
use super::genre::GenreTable;
use super::models::{MovieDetail, MovieSummary, QueryResult};
use super::pagination::{PaginationState, total_pages_for};
use super::view::GalleryView;
use crate::tmdb::{LocalTmdbApi, SearchMovieParams, TmdbMovieListResponse};

/// Notice shown when a search matches nothing.
pub const NO_MATCHES_MESSAGE: &str = "Sorry, there are no movies matching your search";

/// Page loaded in place of an empty search.
const FALLBACK_PAGE: u32 = 1;

/// Runs gallery queries against a TMDB transport and reports UI side
/// effects to a `GalleryView`.
///
/// Failures never panic: every operation logs the failure and returns a
/// `QueryError`, leaving the caller's `PaginationState` untouched.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieQueryClient<A, V> {
    /// TMDB transport.
    api: A,
    /// UI callbacks.
    view: V,
    /// Response language; empty means the server default.
    language: String,
}

impl<A, V> MovieQueryClient<A, V>
where
    A: LocalTmdbApi,
    V: GalleryView,
{
    /// Creates a client using the server's default language.
    pub const fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            language: String::new(),
        }
    }

    /// Sets the response language (e.g., "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// The view receiving side effects.
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Looks up one movie with its credits.
    ///
    /// Genre names come from the detail response itself, so no genre
    /// table is fetched. The modal spinner is shown for the duration of
    /// the lookup. Pagination state is never touched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty or non-numeric id, otherwise
    /// `Transport` or `Parse` when either request fails.
    #[instrument(skip_all, fields(movie_id = id))]
    pub async fn fetch_by_id(&self, id: &str) -> Result<MovieDetail, QueryError> {
        let outcome = match parse_movie_id(id) {
            Ok(movie_id) => {
                self.view.show_spinner_modal();
                let loaded = self.load_detail(movie_id).await;
                self.view.hide_spinner_modal();
                loaded.map_err(|err| QueryError::from_transport(&err))
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(detail) => {
                tracing::info!(
                    movie_id = detail.id,
                    cast = detail.cast.len(),
                    "movie details loaded"
                );
                Ok(detail)
            }
            Err(err) => {
                log_failure("fetch_by_id", &err);
                Err(err)
            }
        }
    }

    /// Loads a page of this week's trending movies.
    ///
    /// On success, commits `page` and the derived page count to `state`,
    /// then renders pagination and hides the spinner, in that order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for page 0 or a page past the derived page
    /// count, otherwise `Transport` or `Parse` when the trending or genre
    /// request fails. `state` is unchanged.
    #[instrument(skip_all, fields(page = page))]
    pub async fn fetch_trending(
        &self,
        state: &mut PaginationState,
        page: u32,
    ) -> Result<QueryResult, QueryError> {
        if let Err(err) = check_page(page) {
            log_failure("fetch_trending", &err);
            return Err(err);
        }

        self.view.show_spinner();
        let loaded = self
            .load_trending(page)
            .await
            .map_err(|err| QueryError::from_transport(&err))
            .and_then(|result| check_last_page(page, result.total_pages).map(|()| result));

        match loaded {
            Ok(result) => {
                state.commit_page(page, result.total_pages);
                self.view
                    .render_pagination(state.total_pages(), state.current_page());
                self.view.hide_spinner();
                tracing::info!(
                    page,
                    total_results = result.total_results,
                    total_pages = result.total_pages,
                    "trending page loaded"
                );
                Ok(result)
            }
            Err(err) => {
                self.view.hide_spinner();
                log_failure("fetch_trending", &err);
                Err(err)
            }
        }
    }

    /// Searches movies by title.
    ///
    /// On a match, commits page, page count and the search term to
    /// `state`, then renders pagination and hides the spinner.
    ///
    /// When nothing matches, the user is notified and page 1 of trending
    /// movies is loaded and sent to `render_gallery` instead. The search
    /// itself commits nothing; only the fallback updates `state`, and a
    /// successful fallback clears the remembered search term. The empty
    /// search result is still returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank query, page 0 or a page past the
    /// derived page count, otherwise `Transport` or `Parse` when the search
    /// or genre request fails. `state` is unchanged.
    #[instrument(skip_all, fields(page = page))]
    pub async fn fetch_query(
        &self,
        state: &mut PaginationState,
        query: &str,
        page: u32,
    ) -> Result<QueryResult, QueryError> {
        let query = query.trim();
        let checked = if query.is_empty() {
            Err(QueryError::invalid_input("search query must not be empty"))
        } else {
            check_page(page)
        };
        if let Err(err) = checked {
            log_failure("fetch_query", &err);
            return Err(err);
        }

        self.view.show_spinner();
        let result = match self.load_search(query, page).await {
            Ok(result) => result,
            Err(err) => {
                self.view.hide_spinner();
                let err = QueryError::from_transport(&err);
                log_failure("fetch_query", &err);
                return Err(err);
            }
        };

        if result.is_empty() {
            self.view.notify_failure(NO_MATCHES_MESSAGE);
            self.view.hide_spinner();
            tracing::info!(query, "no movies matched, falling back to trending");
            match self.fetch_trending(state, FALLBACK_PAGE).await {
                Ok(fallback) => {
                    // Paging now follows the trending list on screen.
                    state.forget_query();
                    self.view.render_gallery(&fallback.items);
                }
                Err(err) => tracing::warn!(error = %err, "trending fallback failed"),
            }
            return Ok(result);
        }

        if let Err(err) = check_last_page(page, result.total_pages) {
            self.view.hide_spinner();
            log_failure("fetch_query", &err);
            return Err(err);
        }

        state.commit_page(page, result.total_pages);
        state.remember_query(query);
        self.view
            .render_pagination(state.total_pages(), state.current_page());
        self.view.hide_spinner();
        tracing::info!(
            query,
            page,
            total_results = result.total_results,
            total_pages = result.total_pages,
            "search page loaded"
        );
        Ok(result)
    }

    async fn load_detail(&self, movie_id: u64) -> anyhow::Result<MovieDetail> {
        let (details, credits) = tokio::try_join!(
            async {
                self.api
                    .movie_details(movie_id, &self.language)
                    .await
                    .context("movie details request failed")
            },
            async {
                self.api
                    .movie_credits(movie_id, &self.language)
                    .await
                    .context("movie credits request failed")
            },
        )?;
        Ok(MovieDetail::from_parts(details, credits))
    }

    async fn load_trending(&self, page: u32) -> anyhow::Result<QueryResult> {
        let (response, genres) = tokio::try_join!(
            async {
                self.api
                    .trending_movies(page, &self.language)
                    .await
                    .context("trending request failed")
            },
            self.genre_table(),
        )?;
        Ok(build_result(response, &genres))
    }

    async fn load_search(&self, query: &str, page: u32) -> anyhow::Result<QueryResult> {
        let params = SearchMovieParams::new(query)
            .page(page)
            .language(self.language.as_str());
        let (response, genres) = tokio::try_join!(
            async {
                self.api
                    .search_movies(&params)
                    .await
                    .context("search request failed")
            },
            self.genre_table(),
        )?;
        Ok(build_result(response, &genres))
    }

    async fn genre_table(&self) -> anyhow::Result<GenreTable> {
        let list = self
            .api
            .movie_genres(&self.language)
            .await
            .context("genre list request failed")?;
        Ok(GenreTable::from(list))
    }
}

/// Resolves genres for every item and derives the page count.
fn build_result(response: TmdbMovieListResponse, genres: &GenreTable) -> QueryResult {
    let total_results = response.total_results;
    let items = response
        .results
        .into_iter()
        .map(|item| MovieSummary::from_list_item(item, genres))
        .collect();
    QueryResult {
        items,
        total_results,
        total_pages: total_pages_for(total_results),
    }
}

fn parse_movie_id(id: &str) -> Result<u64, QueryError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(QueryError::invalid_input("movie id must not be empty"));
    }
    id.parse()
        .map_err(|_| QueryError::invalid_input(format!("movie id must be numeric: {id}")))
}

fn check_page(page: u32) -> Result<(), QueryError> {
    if page == 0 {
        return Err(QueryError::invalid_input("page must be at least 1"));
    }
    Ok(())
}

/// Rejects pages past the last one. Page 1 is always valid.
fn check_last_page(page: u32, total_pages: u32) -> Result<(), QueryError> {
    if page > total_pages.max(1) {
        return Err(QueryError::invalid_input(format!(
            "page {page} is past the last page ({total_pages})"
        )));
    }
    Ok(())
}

/// Logs a failed operation at the operation boundary.
fn log_failure(operation: &str, err: &QueryError) {
    tracing::error!(
        operation,
        kind = %err.kind,
        error = %err.message,
        "movie query failed"
    );
}
