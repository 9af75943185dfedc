//! Terminal rendering of gallery callbacks through `tracing`.

use moviegallery_api::gallery::{GalleryView, MovieDetail, MovieSummary};

/// `GalleryView` that writes everything to the log.
#[derive(Debug, Default)]
pub struct LogView;

impl GalleryView for LogView {
    fn show_spinner(&self) {
        tracing::debug!("loading movies...");
    }

    fn hide_spinner(&self) {
        tracing::debug!("loading finished");
    }

    fn show_spinner_modal(&self) {
        tracing::debug!("loading movie details...");
    }

    fn hide_spinner_modal(&self) {
        tracing::debug!("movie details finished");
    }

    fn render_pagination(&self, total_pages: u32, current_page: u32) {
        tracing::info!("Page {current_page} of {total_pages}");
    }

    fn notify_failure(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn render_gallery(&self, items: &[MovieSummary]) {
        log_movies(items);
    }
}

/// Logs a gallery page as a table.
pub fn log_movies(items: &[MovieSummary]) {
    tracing::info!("ID\tYear\tRating\tTitle\t\t\tGenres");
    for movie in items {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}\t\t{}",
            movie.id,
            movie
                .release_year()
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            movie.vote_average,
            movie.title,
            movie.genre_names.join(", "),
        );
    }
}

/// Logs a movie detail page.
pub fn log_detail(detail: &MovieDetail) {
    tracing::info!("ID: {}", detail.id);
    tracing::info!("Title: {}", detail.title);
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        tracing::info!("Tagline: {tagline}");
    }
    tracing::info!(
        "Released: {}",
        detail.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "Runtime: {}",
        detail
            .runtime
            .map_or_else(|| String::from("-"), |m| format!("{m} min"))
    );
    tracing::info!("Rating: {:.1}", detail.vote_average);
    tracing::info!("Genres: {}", detail.genre_names.join(", "));
    let directors = detail.crew_with_job("Director");
    if !directors.is_empty() {
        tracing::info!("Director: {}", directors.join(", "));
    }
    tracing::info!("Overview: {}", detail.overview.as_deref().unwrap_or("-"));
    if !detail.cast.is_empty() {
        tracing::info!("Cast:");
        for member in detail.cast.iter().take(10) {
            tracing::info!("  {} as {}", member.name, member.character);
        }
    }
}
