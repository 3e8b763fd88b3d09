//! JSON output for the one-shot (non-interactive) mode.

use serde_json::{Value, json};

use crate::models::Paper;
use crate::pipeline::DerivedView;

/// Compact normalized representation of one record.
#[must_use]
pub fn compact_paper(paper: &Paper, origin: &str) -> Value {
    let mut object = json!({
        "id": paper.id,
        "title": paper.display_title(),
        "authors": paper.display_authors(),
        "journal": paper.display_journal(),
        "publisher": paper.display_publisher(),
    });

    if let Some(year) = paper.year() {
        object["year"] = json!(year);
    }
    if let Some(impact) = paper.impact_factor() {
        object["impactFactor"] = json!(impact);
    }
    if let Some(doi) = paper.doi_text() {
        object["doi"] = json!(doi);
    }
    if let Some(cover) = paper.cover_image_url(origin) {
        object["cover"] = json!(cover);
    }
    if let Some(target) = paper.download_target() {
        object["download"] = json!(target);
    }

    object
}

/// Render a derived view as a JSON page object.
#[must_use]
pub fn page_json(view: &DerivedView<'_>, origin: &str) -> Value {
    json!({
        "total": view.total,
        "totalPages": view.total_pages,
        "page": view.page,
        "items": view.page_items.iter().map(|paper| compact_paper(paper, origin)).collect::<Vec<_>>(),
    })
}
