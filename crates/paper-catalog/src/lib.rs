//! Paper Catalog
//!
//! A terminal viewer for a read-only catalog of accepted research papers.
//! The full record set is fetched once from the provider's JSON endpoint,
//! normalized defensively (the upstream schema is not uniform across
//! records), and served through a searchable, sortable, paginated view with
//! best-effort PDF downloads.
//!
//! # Architecture
//!
//! - **models** — raw records as untagged unions plus the precedence-ordered
//!   normalization accessors used everywhere a field is read
//! - **pipeline** — filter / stable sort / paginate with an atomic
//!   page-reset rule
//! - **source** — the single cancellable fetch, published as a watch state
//! - **formatters / session / commands** — the presentation loop
//!
//! # Example
//!
//! ```no_run
//! use paper_catalog::config::Config;
//! use paper_catalog::source::{CatalogClient, PaperSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let mut source = PaperSource::activate(CatalogClient::new(&config)?);
//!     let _state = source.settled().await;
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod download;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod session;
pub mod source;

pub use commands::Command;
pub use config::Config;
pub use download::{DownloadOutcome, Downloader};
pub use error::{ClientError, ClientResult};
pub use models::{Paper, SearchField, SortDirection, SortKey};
pub use pipeline::{DerivedView, ViewConfig, compute_view};
pub use session::CatalogSession;
pub use source::{CatalogClient, FetchOutcome, LoadState, PaperSource};
