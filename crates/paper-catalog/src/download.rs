//! Best-effort file download with graceful fallback.
//!
//! Mirrors what the provider UI does with a download click: provider-origin
//! resources are saved directly, cross-origin resources are saved only when
//! the response confirms a PDF or binary payload, and everything else (or
//! any failure along the way) degrades to handing the URL back for the user
//! to open. A download never surfaces an application error.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::error::ClientResult;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]").expect("fixed pattern"));

/// What became of a download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Payload confirmed and written to disk.
    Saved(PathBuf),
    /// Not a confirmed document, or a step failed; open this URL instead.
    Opened(String),
}

/// Downloads resolved file targets.
#[derive(Debug, Clone)]
pub struct Downloader {
    http: reqwest::Client,
    origin: String,
    dest_dir: PathBuf,
}

impl Downloader {
    /// Create a downloader saving into the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { http, origin: config.origin.clone(), dest_dir: PathBuf::from(".") })
    }

    /// Change the destination directory.
    #[must_use]
    pub fn with_dest_dir(mut self, dest_dir: impl Into<PathBuf>) -> Self {
        self.dest_dir = dest_dir.into();
        self
    }

    /// Fetch `url`, saving under `filename` when possible.
    ///
    /// Never fails: anything that cannot be confirmed and saved comes back
    /// as [`DownloadOutcome::Opened`] with the URL to open externally.
    pub async fn fetch(&self, url: &str, filename: Option<&str>) -> DownloadOutcome {
        // URLs that don't look like documents are article pages; open them.
        if !looks_like_pdf(url) {
            return DownloadOutcome::Opened(url.to_string());
        }

        match self.try_save(url, filename).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(%err, url, "download failed, falling back to open");
                DownloadOutcome::Opened(url.to_string())
            }
        }
    }

    async fn try_save(&self, url: &str, filename: Option<&str>) -> ClientResult<DownloadOutcome> {
        let absolute = if url.starts_with('/') {
            format!("{}{url}", self.origin)
        } else {
            url.to_string()
        };
        let provider_origin = url.starts_with('/') || absolute.starts_with(&self.origin);

        let response = self.http.get(&absolute).send().await?.error_for_status()?;

        // Cross-origin payloads must confirm themselves as documents.
        if !provider_origin && !is_document_response(&response) {
            return Ok(DownloadOutcome::Opened(absolute));
        }

        let name = filename
            .map(ToString::to_string)
            .or_else(|| filename_from_url(&absolute))
            .unwrap_or_else(|| "download.pdf".to_string());

        let bytes = response.bytes().await?;
        let path = self.dest_dir.join(name);
        tokio::fs::write(&path, &bytes).await?;

        tracing::info!(path = %path.display(), "saved download");
        Ok(DownloadOutcome::Saved(path))
    }
}

/// Build a safe filename from a paper title, the way the provider UI does:
/// non-alphanumerics become underscores, lowercased, `.pdf` appended.
#[must_use]
pub fn suggested_filename(title: &str) -> String {
    format!("{}.pdf", NON_ALNUM.replace_all(title, "_").to_lowercase())
}

fn looks_like_pdf(url: &str) -> bool {
    url.to_lowercase().contains(".pdf")
}

fn is_document_response(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_document_content_type)
}

fn is_document_content_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or("").trim();
    mime.eq_ignore_ascii_case("application/pdf")
        || mime.eq_ignore_ascii_case("application/octet-stream")
}

fn filename_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let name = path.rsplit('/').next()?;
    (!name.is_empty() && name.contains('.')).then(|| name.to_string())
}
