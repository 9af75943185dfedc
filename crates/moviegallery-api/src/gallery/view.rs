//! Presentation callbacks invoked by the query client.

use super::models::MovieSummary;

/// Receives UI side effects from `MovieQueryClient`.
///
/// Rendering itself lives with the implementor (terminal, web view,
/// test recorder). Spinner hooks default to no-ops.
pub trait GalleryView {
    /// A list query started.
    fn show_spinner(&self) {}

    /// A list query finished, successfully or not.
    fn hide_spinner(&self) {}

    /// A movie detail lookup started.
    fn show_spinner_modal(&self) {}

    /// A movie detail lookup finished, successfully or not.
    fn hide_spinner_modal(&self) {}

    /// Pagination changed after a successful list query.
    fn render_pagination(&self, total_pages: u32, current_page: u32);

    /// A user-facing failure notice, e.g. a search with no matches.
    fn notify_failure(&self, message: &str);

    /// Items to show when the client substitutes results on its own
    /// (the trending fallback after an empty search).
    fn render_gallery(&self, items: &[MovieSummary]);
}
