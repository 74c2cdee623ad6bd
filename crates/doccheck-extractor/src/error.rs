//! Error types for extraction and analysis

use doccheck_llm::LlmError;
use thiserror::Error;

/// Why a single document yielded no text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Filename has no recognized suffix
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Parsed successfully but contained no text
    #[error("document contains no text")]
    Empty,

    /// Parser rejected the file
    #[error("corrupt document: {0}")]
    Corrupt(String),

    /// Plain-text file is not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),
}

/// Errors that end an analysis request
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The upload carried no `files` parts
    #[error("No files part in the request")]
    NoFiles,

    /// Fewer than two files were uploaded
    #[error("Please upload at least two documents")]
    TooFewFiles(usize),

    /// Fewer than two files produced text
    #[error("Could not extract text from at least two of the uploaded documents.")]
    TooFewDocuments(usize),

    /// The model call failed
    #[error("Failed to communicate with AI model: {0}")]
    Llm(#[from] LlmError),

    /// The model answered with something other than a valid report
    #[error("AI model returned a malformed analysis: {0}")]
    MalformedOutput(String),

    /// Unexpected failure inside the service
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Whether the error was caused by the request rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::NoFiles | AnalysisError::TooFewFiles(_) | AnalysisError::TooFewDocuments(_)
        )
    }

    /// Whether the error came from the upstream model
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, AnalysisError::Llm(_) | AnalysisError::MalformedOutput(_))
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::MalformedOutput(e.to_string())
    }
}
