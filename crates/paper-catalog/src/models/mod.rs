//! Data models: raw catalog records and view-control enums.
//!
//! Record fields use `#[serde(default)]` plus untagged unions so no field
//! shape can fail a record.

mod enums;
mod paper;

pub use enums::{SearchField, SortDirection, SortKey};
pub use paper::{
    AuthorsField, FileDescriptor, FileEntry, FilesField, ImageField, ImageRef, Journal,
    JournalField, NumberField, PLACEHOLDER, Paper, PublisherField, PublisherRef, RecordId,
    TextField,
};
