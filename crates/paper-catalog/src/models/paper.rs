//! Raw catalog records and the normalization rules applied to them.
//!
//! The provider's schema is not uniform across records: a field may be
//! missing, carry one of several names, or appear as a string in one record
//! and a structured object in the next. Every variant shape is modeled as an
//! untagged union with a tolerated catch-all, so decoding a record never
//! fails on field shape, and every conceptual field is resolved through
//! exactly one precedence-ordered accessor. Filtering, sorting and rendering
//! all go through the same accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SearchField;

/// Shown when no representation of a field yields a value.
pub const PLACEHOLDER: &str = "—";

/// Record identifier, string or numeric on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// String identifier.
    Text(String),
    /// Numeric identifier.
    Number(i64),
}

impl Default for RecordId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(id) => f.write_str(id),
            Self::Number(id) => write!(f, "{id}"),
        }
    }
}

/// A field expected to be a string, tolerating any other shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    /// The expected shape.
    Text(String),
    /// Anything else; resolves to no value.
    Other(Value),
}

impl TextField {
    /// The string value, if the field really is a non-empty string.
    ///
    /// Empty strings resolve to `None` so precedence chains fall through to
    /// the next candidate instead of displaying nothing.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// A field expected to be numeric, tolerating numeric strings and junk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberField {
    /// JSON number.
    Number(f64),
    /// Numeric string, parsed on resolution.
    Text(String),
    /// Anything else; resolves to no value.
    Other(Value),
}

impl NumberField {
    /// Numeric value, if one can be resolved.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

/// Author credits: a single delimited string or a list of names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorsField {
    /// List of author names.
    Many(Vec<String>),
    /// One pre-joined string.
    One(String),
    /// Anything else; resolves to no value.
    Other(Value),
}

/// The journal field: a plain name or a structured object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JournalField {
    /// Plain journal name.
    Name(String),
    /// Structured journal record.
    Details(Journal),
    /// Anything else; resolves to no value.
    Other(Value),
}

/// Structured journal record nested in a paper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    /// Marketing display title; wins over the formal title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displaytitle: Option<TextField>,

    /// Formal title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TextField>,

    /// Abbreviated title, last resort for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journalabbreviation: Option<TextField>,

    /// Impact factor; wins over the record-level field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impactfactor: Option<NumberField>,

    /// Publishing company, last link of the publisher chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishingcompany: Option<TextField>,

    /// Cover image, string URL or `{ url }` object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journalimage: Option<ImageField>,

    /// Fallback cover image URL.
    #[serde(default, rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<TextField>,
}

impl Journal {
    /// Display name: displaytitle, else title, else abbreviation.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.displaytitle
            .as_ref()
            .and_then(TextField::as_str)
            .or_else(|| self.title.as_ref().and_then(TextField::as_str))
            .or_else(|| self.journalabbreviation.as_ref().and_then(TextField::as_str))
    }
}

/// Cover image reference: a URL string or an object carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageField {
    /// Bare URL.
    Url(String),
    /// Object with a `url` property.
    Nested(ImageRef),
    /// Anything else; resolves to no value.
    Other(Value),
}

impl ImageField {
    /// The image URL, if one is present.
    #[must_use]
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url(url) if !url.is_empty() => Some(url),
            Self::Nested(image) => image.url.as_ref().and_then(TextField::as_str),
            _ => None,
        }
    }
}

/// Object form of an image reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<TextField>,
}

/// The nested publisher object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublisherField {
    /// Object carrying a publisher name.
    Details(PublisherRef),
    /// Anything else; resolves to no value.
    Other(Value),
}

/// Object form of the publisher reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublisherRef {
    /// Publisher name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishername: Option<TextField>,
}

/// The files field: an ordered list of downloadable entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilesField {
    /// The expected list shape.
    List(Vec<FileEntry>),
    /// Anything else; resolves to no entries.
    Other(Value),
}

/// One file entry: a descriptor object or a bare URL string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
    /// Bare URL.
    Bare(String),
    /// Descriptor with URL and optional display name.
    Descriptor(FileDescriptor),
    /// Anything else; resolves to no target.
    Other(Value),
}

impl FileEntry {
    /// Download URL of this entry, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Bare(url) if !url.is_empty() => Some(url),
            Self::Descriptor(file) => file.url.as_ref().and_then(TextField::as_str),
            _ => None,
        }
    }

    /// Human-facing label: the descriptor name, else the URL.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Descriptor(file) => {
                file.name.as_ref().and_then(TextField::as_str).or_else(|| self.url())
            }
            _ => self.url(),
        }
    }
}

/// Object form of a file entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Provider-side file identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextField>,

    /// Download URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<TextField>,
}

/// One catalog record as returned by the provider.
///
/// Field names mirror the wire format. Unrecognized keys are retained in
/// [`Paper::extra`] so the detail view can show the complete raw record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Unique identifier, the stable list key.
    pub id: RecordId,

    /// Primary title field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub papertitle: Option<TextField>,

    /// Fallback title field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TextField>,

    /// Pre-joined author string; wins over `authors`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coauthors: Option<TextField>,

    /// Author list or string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<AuthorsField>,

    /// Publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<NumberField>,

    /// Journal name or structured journal record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<JournalField>,

    /// Digital Object Identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<TextField>,

    /// Record-level impact factor; the journal's value wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_factor: Option<NumberField>,

    /// Direct publisher name; first link of the publisher chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishername: Option<TextField>,

    /// Nested publisher object; second link of the publisher chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<PublisherField>,

    /// External article page, lowest-priority download target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articlelink: Option<TextField>,

    /// Downloadable files, in provider order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesField>,

    /// Everything the schema above does not name.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Paper {
    /// Resolved title: `papertitle`, else `title`.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.papertitle
            .as_ref()
            .and_then(TextField::as_str)
            .or_else(|| self.title.as_ref().and_then(TextField::as_str))
    }

    /// Resolved author credit: `coauthors`, else the `authors` list joined
    /// with ", ", else a bare `authors` string.
    #[must_use]
    pub fn authors_text(&self) -> Option<String> {
        if let Some(coauthors) = self.coauthors.as_ref().and_then(TextField::as_str) {
            return Some(coauthors.to_string());
        }
        match self.authors.as_ref()? {
            AuthorsField::Many(names) => {
                let joined = names
                    .iter()
                    .map(String::as_str)
                    .filter(|name| !name.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                (!joined.is_empty()).then_some(joined)
            }
            AuthorsField::One(name) if !name.is_empty() => Some(name.clone()),
            _ => None,
        }
    }

    /// Resolved journal display string, never a serialized object.
    #[must_use]
    pub fn journal_text(&self) -> Option<&str> {
        match self.journal.as_ref()? {
            JournalField::Name(name) if !name.is_empty() => Some(name),
            JournalField::Details(journal) => journal.display_name(),
            _ => None,
        }
    }

    /// Resolved publisher: direct field, else nested publisher object, else
    /// the journal's publishing company.
    #[must_use]
    pub fn publisher_text(&self) -> Option<&str> {
        if let Some(name) = self.publishername.as_ref().and_then(TextField::as_str) {
            return Some(name);
        }
        if let Some(PublisherField::Details(publisher)) = self.publisher.as_ref() {
            if let Some(name) = publisher.publishername.as_ref().and_then(TextField::as_str) {
                return Some(name);
            }
        }
        match self.journal.as_ref()? {
            JournalField::Details(journal) => {
                journal.publishingcompany.as_ref().and_then(TextField::as_str)
            }
            _ => None,
        }
    }

    /// Resolved impact factor, the journal's value winning over the
    /// record-level one. Numeric or absent, never a string.
    #[must_use]
    pub fn impact_factor(&self) -> Option<f64> {
        if let Some(JournalField::Details(journal)) = self.journal.as_ref() {
            if let Some(value) = journal.impactfactor.as_ref().and_then(NumberField::as_f64) {
                return Some(value);
            }
        }
        self.impact_factor.as_ref().and_then(NumberField::as_f64)
    }

    /// Resolved publication year.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.year.as_ref().and_then(NumberField::as_f64).map(|year| year as i32)
    }

    /// Resolved DOI.
    #[must_use]
    pub fn doi_text(&self) -> Option<&str> {
        self.doi.as_ref().and_then(TextField::as_str)
    }

    /// External article page URL.
    #[must_use]
    pub fn article_link(&self) -> Option<&str> {
        self.articlelink.as_ref().and_then(TextField::as_str)
    }

    /// File entries, empty when the field is absent or malformed.
    #[must_use]
    pub fn file_entries(&self) -> &[FileEntry] {
        match self.files.as_ref() {
            Some(FilesField::List(entries)) => entries,
            _ => &[],
        }
    }

    /// Cover image URL: the journal's `journalimage` (string or `{url}`)
    /// first, then its `coverImage` string. A root-relative URL is rewritten
    /// against the provider origin; anything else is returned unchanged.
    #[must_use]
    pub fn cover_image_url(&self, origin: &str) -> Option<String> {
        let JournalField::Details(journal) = self.journal.as_ref()? else {
            return None;
        };
        let url = journal
            .journalimage
            .as_ref()
            .and_then(ImageField::as_url)
            .or_else(|| journal.cover_image.as_ref().and_then(TextField::as_str))?;
        if url.starts_with('/') {
            Some(format!("{}{url}", origin.trim_end_matches('/')))
        } else {
            Some(url.to_string())
        }
    }

    /// Primary download target: the first file entry's URL (or the entry
    /// itself when it is a bare string), else the article link. A non-empty
    /// files list with an unusable first entry yields no target, matching
    /// the provider UI.
    #[must_use]
    pub fn download_target(&self) -> Option<&str> {
        let entries = self.file_entries();
        if let Some(first) = entries.first() {
            return first.url();
        }
        self.article_link()
    }

    /// The text the configured search field matches against.
    #[must_use]
    pub fn search_text(&self, field: SearchField) -> Option<std::borrow::Cow<'_, str>> {
        use std::borrow::Cow;
        match field {
            SearchField::Title => self.title_text().map(Cow::Borrowed),
            SearchField::Authors => self.authors_text().map(Cow::Owned),
            SearchField::Journal => self.journal_text().map(Cow::Borrowed),
        }
    }

    /// Title for display, placeholder when absent.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title_text().unwrap_or(PLACEHOLDER)
    }

    /// Author credit for display, placeholder when absent.
    #[must_use]
    pub fn display_authors(&self) -> String {
        self.authors_text().unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// Journal name for display, placeholder when absent.
    #[must_use]
    pub fn display_journal(&self) -> &str {
        self.journal_text().unwrap_or(PLACEHOLDER)
    }

    /// Publisher for display, placeholder when absent.
    #[must_use]
    pub fn display_publisher(&self) -> &str {
        self.publisher_text().unwrap_or(PLACEHOLDER)
    }

    /// Impact factor for display, two decimals, placeholder when absent.
    #[must_use]
    pub fn display_impact_factor(&self) -> String {
        self.impact_factor()
            .map_or_else(|| PLACEHOLDER.to_string(), |value| format!("{value:.2}"))
    }

    /// Year for display, placeholder when absent.
    #[must_use]
    pub fn display_year(&self) -> String {
        self.year().map_or_else(|| PLACEHOLDER.to_string(), |year| year.to_string())
    }

    /// DOI for display, placeholder when absent.
    #[must_use]
    pub fn display_doi(&self) -> &str {
        self.doi_text().unwrap_or(PLACEHOLDER)
    }
}
