//! Interactive catalog session: loaded records plus view configuration.

use std::sync::Arc;

use crate::models::{Paper, SearchField, SortDirection, SortKey};
use crate::pipeline::{self, DerivedView, ViewConfig, compute_view};

/// One viewer session over a loaded record set.
///
/// Owns the view configuration; every intent mutates it and the next
/// [`CatalogSession::view`] call recomputes the derived view. Positions in
/// [`CatalogSession::record_at`] are 1-based within the current page,
/// matching the rendered card numbers.
#[derive(Debug)]
pub struct CatalogSession {
    records: Arc<Vec<Paper>>,
    config: ViewConfig,
}

impl CatalogSession {
    /// Start a session with defaults (title search, year descending, page 1).
    #[must_use]
    pub fn new(records: Arc<Vec<Paper>>, page_size: usize) -> Self {
        Self { records, config: ViewConfig::new(page_size) }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Recompute the derived view under the current configuration.
    pub fn view(&mut self) -> DerivedView<'_> {
        let Self { records, config } = self;
        compute_view(records.as_slice(), config)
    }

    /// Set the free-text query.
    pub fn set_query(&mut self, query: &str) {
        self.config.query = query.trim().to_string();
    }

    /// Clear the free-text query.
    pub fn clear_query(&mut self) {
        self.config.query.clear();
    }

    /// Select the field the query matches against.
    pub fn set_field(&mut self, field: SearchField) {
        self.config.field = field;
    }

    /// Select the sort key.
    pub fn set_sort(&mut self, sort_by: SortKey) {
        self.config.sort_by = sort_by;
    }

    /// Select the sort direction.
    pub fn set_direction(&mut self, sort_dir: SortDirection) {
        self.config.sort_dir = sort_dir;
    }

    /// Jump to a page; clamped to at least 1. Out-of-range pages reset to 1
    /// at the next recomputation.
    pub fn set_page(&mut self, page: usize) {
        self.config.page = page.max(1);
    }

    /// Advance one page, stopping at the last.
    pub fn next_page(&mut self) {
        if self.config.page < self.total_pages() {
            self.config.page += 1;
        }
    }

    /// Go back one page, stopping at the first.
    pub fn prev_page(&mut self) {
        if self.config.page > 1 {
            self.config.page -= 1;
        }
    }

    /// Record at a 1-based position on the current page.
    pub fn record_at(&mut self, position: usize) -> Option<&Paper> {
        let index = position.checked_sub(1)?;
        let view = self.view();
        view.page_items.get(index).copied()
    }

    fn total_pages(&self) -> usize {
        let matched = pipeline::match_count(&self.records, &self.config);
        matched.div_ceil(self.config.page_size).max(1)
    }
}
