//! Rendering of the derived view for the terminal.
//!
//! Pure consumers of pipeline output: nothing here touches configuration
//! state or performs I/O.

mod cards;
mod json;

pub use cards::{render_detail, render_error, render_loading, render_page};
pub use json::{compact_paper, page_json};
