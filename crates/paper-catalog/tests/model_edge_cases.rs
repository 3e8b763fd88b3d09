//! Normalization edge cases across the record schema's variant shapes.

use serde_json::json;

use paper_catalog::models::{PLACEHOLDER, Paper};

fn paper(value: serde_json::Value) -> Paper {
    serde_json::from_value(value).expect("record decodes")
}

#[test]
fn test_journal_object_scenario() {
    // Structured journal, no top-level impact factor.
    let p = paper(json!({
        "id": 1,
        "papertitle": "Emergent Order",
        "journal": {"displaytitle": "Nature Physics", "impactfactor": 19.6}
    }));

    assert_eq!(p.display_journal(), "Nature Physics");
    assert_eq!(p.impact_factor(), Some(19.6));
}

#[test]
fn test_cover_image_absolutized_against_provider_origin() {
    let p = paper(json!({
        "id": 1,
        "journal": {"journalimage": "/img/cover.png"}
    }));

    assert_eq!(
        p.cover_image_url("https://easydash.enago.com").as_deref(),
        Some("https://easydash.enago.com/img/cover.png")
    );
}

#[test]
fn test_absolute_cover_image_unchanged() {
    let p = paper(json!({
        "id": 1,
        "journal": {"journalimage": {"url": "https://cdn.host/cover.jpg"}}
    }));

    assert_eq!(
        p.cover_image_url("https://easydash.enago.com").as_deref(),
        Some("https://cdn.host/cover.jpg")
    );
}

#[test]
fn test_title_resolves_whenever_either_field_is_non_empty() {
    for record in [
        json!({"id": 1, "papertitle": "Primary only"}),
        json!({"id": 2, "title": "Fallback only"}),
        json!({"id": 3, "papertitle": "Primary", "title": "Fallback"}),
        json!({"id": 4, "papertitle": "", "title": "Fallback after empty"}),
    ] {
        let p = paper(record);
        assert_ne!(p.display_title(), PLACEHOLDER);
    }
}

#[test]
fn test_journal_display_is_never_a_serialized_object() {
    let p = paper(json!({
        "id": 1,
        "journal": {"displaytitle": "Display", "impactfactor": 12.3, "publishingcompany": "Pub"}
    }));

    let display = p.display_journal();
    assert_eq!(display, "Display");
    assert!(!display.contains('{'));
    assert!(!display.contains("impactfactor"));
}

#[test]
fn test_journal_object_with_non_string_members() {
    // Members of the wrong type are skipped, not stringified.
    let p = paper(json!({
        "id": 1,
        "journal": {"displaytitle": 42, "title": ["x"], "journalabbreviation": "NP"}
    }));

    assert_eq!(p.display_journal(), "NP");
}

#[test]
fn test_authors_array_joins_with_comma() {
    let p = paper(json!({"id": 1, "authors": ["Ada Lovelace", "Alan Turing"]}));
    assert_eq!(p.display_authors(), "Ada Lovelace, Alan Turing");
}

#[test]
fn test_coauthors_string_wins_over_authors() {
    let p = paper(json!({
        "id": 1,
        "coauthors": "Listed First, Listed Second",
        "authors": ["Ignored"]
    }));
    assert_eq!(p.display_authors(), "Listed First, Listed Second");
}

#[test]
fn test_publisher_chain_across_nestings() {
    let nested = paper(json!({"id": 1, "publisher": {"publishername": "Nested Press"}}));
    assert_eq!(nested.display_publisher(), "Nested Press");

    let journal = paper(json!({"id": 2, "journal": {"publishingcompany": "Journal Press"}}));
    assert_eq!(journal.display_publisher(), "Journal Press");

    let none = paper(json!({"id": 3, "publisher": "just a string"}));
    assert_eq!(none.display_publisher(), PLACEHOLDER);
}

#[test]
fn test_files_bare_string_entries() {
    let p = paper(json!({"id": 1, "files": ["https://host/direct.pdf"]}));
    assert_eq!(p.download_target(), Some("https://host/direct.pdf"));
}

#[test]
fn test_article_link_is_last_resort() {
    let p = paper(json!({"id": 1, "articlelink": "https://journal.site/article/9"}));
    assert_eq!(p.download_target(), Some("https://journal.site/article/9"));
}

#[test]
fn test_unicode_content_survives_normalization() {
    let p = paper(json!({
        "id": "unicode",
        "papertitle": "机器学习与深度神经网络",
        "coauthors": "René Müller, 王芳"
    }));

    assert_eq!(p.display_title(), "机器学习与深度神经网络");
    assert!(p.display_authors().contains("王芳"));
}

#[test]
fn test_null_fields_resolve_to_placeholders() {
    let p = paper(json!({
        "id": 1,
        "papertitle": null,
        "title": null,
        "authors": null,
        "journal": null,
        "year": null,
        "doi": null
    }));

    assert_eq!(p.display_title(), PLACEHOLDER);
    assert_eq!(p.display_authors(), PLACEHOLDER);
    assert_eq!(p.display_journal(), PLACEHOLDER);
    assert_eq!(p.display_year(), PLACEHOLDER);
    assert_eq!(p.display_doi(), PLACEHOLDER);
}

#[test]
fn test_round_trip_keeps_unknown_keys() {
    let original = json!({
        "id": 1,
        "papertitle": "Kept",
        "submissiondate": "2024-06-01",
        "internalstatus": {"code": 7}
    });

    let p = paper(original);
    let back = serde_json::to_value(&p).expect("serializes");
    assert_eq!(back["submissiondate"], json!("2024-06-01"));
    assert_eq!(back["internalstatus"], json!({"code": 7}));
}
