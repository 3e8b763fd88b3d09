//! Text rendering of the card list and the record detail view.

use crate::models::{PLACEHOLDER, Paper};
use crate::pipeline::DerivedView;

/// Render the current page as a card list with a pager footer.
///
/// Cards are numbered 1-based within the page; `view <n>` and
/// `download <n>` resolve against these numbers.
#[must_use]
pub fn render_page(view: &DerivedView<'_>, origin: &str) -> String {
    if view.total == 0 {
        return "No papers found.\n".to_string();
    }

    let mut output = String::new();
    for (index, paper) in view.page_items.iter().enumerate() {
        output.push_str(&render_card(paper, index + 1, origin));
        output.push('\n');
    }
    output.push_str(&format!(
        "Total: {} | Page {} / {}\n",
        view.total, view.page, view.total_pages
    ));
    output
}

fn render_card(paper: &Paper, index: usize, origin: &str) -> String {
    let mut card = format!("{index:>2}. {}\n", paper.display_title());
    card.push_str(&format!("    Author: {}\n", paper.display_authors()));
    card.push_str(&format!("    Publisher: {}\n", paper.display_publisher()));

    let mut journal_line = format!("    Journal: {}", paper.display_journal());
    if paper.impact_factor().is_some() {
        journal_line.push_str(&format!("  [IF {}]", paper.display_impact_factor()));
    }
    journal_line.push('\n');
    card.push_str(&journal_line);

    if let Some(cover) = paper.cover_image_url(origin) {
        card.push_str(&format!("    Cover: {cover}\n"));
    }
    if paper.download_target().is_some() {
        card.push_str("    [PDF available]\n");
    }
    card
}

/// Render the full detail view for one record, ending with its raw JSON.
#[must_use]
pub fn render_detail(paper: &Paper, origin: &str) -> String {
    let mut output = format!("# {}\n\n", paper.display_title());

    output.push_str(&format!("Authors: {}\n", paper.display_authors()));
    output.push_str(&format!("Journal: {}\n", paper.display_journal()));
    output.push_str(&format!("Publisher: {}\n", paper.display_publisher()));
    output.push_str(&format!("Year: {}\n", paper.display_year()));
    output.push_str(&format!("Impact Factor: {}\n", paper.display_impact_factor()));

    if let Some(doi) = paper.doi_text() {
        output.push_str(&format!("DOI: {doi} (https://doi.org/{doi})\n"));
    } else {
        output.push_str(&format!("DOI: {PLACEHOLDER}\n"));
    }

    if let Some(cover) = paper.cover_image_url(origin) {
        output.push_str(&format!("Cover: {cover}\n"));
    }
    if let Some(link) = paper.article_link() {
        output.push_str(&format!("Article link: {link}\n"));
    }

    let files = paper.file_entries();
    if !files.is_empty() {
        output.push_str("Files:\n");
        for entry in files {
            match (entry.label(), entry.url()) {
                (Some(label), Some(url)) if label != url => {
                    output.push_str(&format!("  - {label} ({url})\n"));
                }
                (_, Some(url)) => output.push_str(&format!("  - {url}\n")),
                _ => output.push_str(&format!("  - {PLACEHOLDER}\n")),
            }
        }
    }

    output.push_str("\nRaw record:\n");
    output.push_str(&serde_json::to_string_pretty(paper).unwrap_or_default());
    output.push('\n');
    output
}

/// Placeholder shown while the fetch is in flight.
#[must_use]
pub fn render_loading() -> String {
    "Loading catalog...\n".to_string()
}

/// User-facing fetch failure line. List rendering stays suppressed while
/// this is shown.
#[must_use]
pub fn render_error(message: &str) -> String {
    format!("Error: {message}\n")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::pipeline::{ViewConfig, compute_view};

    fn sample_records() -> Vec<Paper> {
        vec![
            serde_json::from_value(json!({
                "id": 1,
                "papertitle": "Quantum Widgets",
                "coauthors": "A. Researcher, B. Scholar",
                "year": 2023,
                "journal": {
                    "displaytitle": "Nature Physics",
                    "impactfactor": 19.6,
                    "publishingcompany": "Springer Nature",
                    "journalimage": "/img/cover.png"
                },
                "files": [{"url": "https://host/q.pdf", "name": "preprint"}]
            }))
            .unwrap(),
            serde_json::from_value(json!({"id": 2})).unwrap(),
        ]
    }

    #[test]
    fn test_render_page_includes_cards_and_footer() {
        let records = sample_records();
        let mut config = ViewConfig::default();
        let view = compute_view(&records, &mut config);

        let output = render_page(&view, "https://easydash.enago.com");
        assert!(output.contains("Quantum Widgets"));
        assert!(output.contains("A. Researcher, B. Scholar"));
        assert!(output.contains("Nature Physics"));
        assert!(output.contains("[IF 19.60]"));
        assert!(output.contains("https://easydash.enago.com/img/cover.png"));
        assert!(output.contains("[PDF available]"));
        assert!(output.contains("Total: 2 | Page 1 / 1"));
    }

    #[test]
    fn test_render_page_empty_set() {
        let records: Vec<Paper> = Vec::new();
        let mut config = ViewConfig::default();
        let view = compute_view(&records, &mut config);

        assert_eq!(render_page(&view, "https://easydash.enago.com"), "No papers found.\n");
    }

    #[test]
    fn test_render_page_uses_placeholders() {
        let records = sample_records();
        let mut config = ViewConfig::default();
        config.sort_dir = crate::models::SortDirection::Asc;
        let view = compute_view(&records, &mut config);

        // The bare record sorts first (no year) and renders placeholders.
        let output = render_page(&view, "https://easydash.enago.com");
        assert!(output.contains(&format!(" 1. {PLACEHOLDER}")));
    }

    #[test]
    fn test_render_detail_contains_raw_json() {
        let records = sample_records();
        let output = render_detail(&records[0], "https://easydash.enago.com");

        assert!(output.starts_with("# Quantum Widgets"));
        assert!(output.contains("Impact Factor: 19.60"));
        assert!(output.contains("preprint (https://host/q.pdf)"));
        assert!(output.contains("Raw record:"));
        assert!(output.contains("\"papertitle\": \"Quantum Widgets\""));
    }

    #[test]
    fn test_render_error_line() {
        assert_eq!(render_error("HTTP 500"), "Error: HTTP 500\n");
    }
}
