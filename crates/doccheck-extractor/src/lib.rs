//! DocCheck Extractor
//!
//! Turns uploaded documents into a contradiction analysis using an LLM.
//!
//! # Architecture
//!
//! ```text
//! Uploads → extract (pdf/docx/txt) → Corpus → Prompt → LLM → clean → validate
//! ```
//!
//! # Key Features
//!
//! - **Per-format extraction**: PDF via pdf-extract, DOCX via docx-rs, UTF-8 text
//! - **Explicit failures**: every extractor returns the reason a file had no text
//! - **Deterministic prompts**: identical corpora give byte-identical prompts
//! - **Output validation**: model output is checked against the report schema
//!
//! # Example Usage
//!
//! ```no_run
//! use doccheck_domain::UploadedDocument;
//! use doccheck_extractor::{AnalysisConfig, Analyzer};
//! use doccheck_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockProvider::new(r#"{"contradictions": []}"#));
//! let analyzer = Analyzer::new(llm, AnalysisConfig::default());
//!
//! let body = analyzer
//!     .analyze(vec![
//!         UploadedDocument::new("a.txt", b"Meeting is at 3pm".to_vec()),
//!         UploadedDocument::new("b.txt", b"Meeting is at 4pm".to_vec()),
//!     ])
//!     .await?;
//!
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod extract;
mod prompt;
mod response;


pub use analyzer::{build_corpus, Analyzer};
pub use config::{AnalysisConfig, OutputPolicy};
pub use error::{AnalysisError, ExtractionError};
pub use extract::{extract_document, extract_text};
pub use prompt::PromptBuilder;
pub use response::{clean_response, parse_report};
