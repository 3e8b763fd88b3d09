//! Derived-view computation: filter, stable sort, paginate.
//!
//! [`compute_view`] is the single recomputation path for the catalog list.
//! It matches and orders records through the same normalization accessors
//! the renderer uses, and applies the page-reset rule atomically, so an
//! out-of-range page is never observable.

use crate::config::api;
use crate::models::{Paper, SearchField, SortDirection, SortKey};

/// Session-local view controls.
///
/// Created with defaults at session start, mutated only by user intents,
/// discarded with the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Free-text query; empty keeps every record.
    pub query: String,
    /// Field the query matches against.
    pub field: SearchField,
    /// Sort key.
    pub sort_by: SortKey,
    /// Sort direction.
    pub sort_dir: SortDirection,
    /// Current page, 1-based.
    pub page: usize,
    /// Records per page, fixed for the session.
    pub page_size: usize,
}

impl ViewConfig {
    /// Session-start configuration: title search, year descending, page 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            field: SearchField::default(),
            sort_by: SortKey::default(),
            sort_dir: SortDirection::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new(api::DEFAULT_PAGE_SIZE)
    }
}

/// One recomputation of the catalog view.
#[derive(Debug)]
pub struct DerivedView<'a> {
    /// Records on the current page, in sorted order.
    pub page_items: Vec<&'a Paper>,
    /// Records matching the filter.
    pub total: usize,
    /// Page count, at least 1.
    pub total_pages: usize,
    /// The page the slice was taken from (after any reset).
    pub page: usize,
}

/// Compute the derived view for `records` under `config`.
///
/// Mutates `config.page` back to 1 when the filtered page count shrinks
/// below it; the returned slice is then page 1. This is the only
/// configuration write the pipeline performs.
pub fn compute_view<'a>(records: &'a [Paper], config: &mut ViewConfig) -> DerivedView<'a> {
    let mut matched = filter(records, config);
    sort(&mut matched, config.sort_by, config.sort_dir);

    let total = matched.len();
    let total_pages = total.div_ceil(config.page_size).max(1);
    if config.page > total_pages {
        config.page = 1;
    }

    let start = (config.page - 1) * config.page_size;
    let page_items = matched.into_iter().skip(start).take(config.page_size).collect();

    DerivedView { page_items, total, total_pages, page: config.page }
}

/// Number of records matching the current filter.
#[must_use]
pub fn match_count(records: &[Paper], config: &ViewConfig) -> usize {
    filter(records, config).len()
}

fn filter<'a>(records: &'a [Paper], config: &ViewConfig) -> Vec<&'a Paper> {
    if config.query.is_empty() {
        return records.iter().collect();
    }
    let needle = config.query.to_lowercase();
    records
        .iter()
        .filter(|paper| {
            // A field that resolves to nothing never matches; the placeholder
            // is a display artifact, not searchable content.
            paper
                .search_text(config.field)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

fn sort(papers: &mut [&Paper], key: SortKey, dir: SortDirection) {
    papers.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Title => a
                .title_text()
                .unwrap_or_default()
                .to_lowercase()
                .cmp(&b.title_text().unwrap_or_default().to_lowercase()),
            SortKey::Year => a.year().unwrap_or(0).cmp(&b.year().unwrap_or(0)),
            SortKey::ImpactFactor => {
                a.impact_factor().unwrap_or(0.0).total_cmp(&b.impact_factor().unwrap_or(0.0))
            }
        };
        match dir {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
