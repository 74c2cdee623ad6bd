//! DocCheck Domain Layer
//!
//! Core value types shared by every other DocCheck crate. Nothing here
//! performs I/O; infrastructure (model clients, parsers, HTTP) lives in the
//! outer crates.
//!
//! ## Key Concepts
//!
//! - **Uploaded document**: a `(filename, bytes)` pair owned by one request
//! - **Document kind**: the text format resolved from a filename suffix
//! - **Corpus**: the ordered set of documents whose text could be extracted
//! - **Analysis report**: the model's list of contradiction records

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod corpus;
pub mod document;
pub mod report;

// Re-exports for convenience
pub use corpus::DocumentCorpus;
pub use document::{DocumentKind, UploadedDocument};
pub use report::{AnalysisReport, Contradiction, Severity, SeveritySummary};

/// Minimum number of documents a contradiction analysis needs.
pub const MIN_DOCUMENTS: usize = 2;
