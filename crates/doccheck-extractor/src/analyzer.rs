//! Core Analyzer implementation

use crate::config::{AnalysisConfig, OutputPolicy};
use crate::error::AnalysisError;
use crate::extract::extract_document;
use crate::prompt::PromptBuilder;
use crate::response::{clean_response, parse_report};
use doccheck_domain::{DocumentCorpus, UploadedDocument, MIN_DOCUMENTS};
use doccheck_llm::LlmProvider;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Turns a set of uploads into a contradiction report
///
/// Validates document counts, extracts text, prompts the model and returns
/// the cleaned response text ready to be relayed as `application/json`.
pub struct Analyzer {
    llm_provider: Arc<dyn LlmProvider>,
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create a new Analyzer
    pub fn new(llm_provider: Arc<dyn LlmProvider>, config: AnalysisConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// The model provider in use
    pub fn provider(&self) -> &dyn LlmProvider {
        self.llm_provider.as_ref()
    }

    /// The analysis configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run a full analysis over uploaded documents
    pub async fn analyze(&self, uploads: Vec<UploadedDocument>) -> Result<String, AnalysisError> {
        if uploads.is_empty() {
            return Err(AnalysisError::NoFiles);
        }
        if uploads.len() < MIN_DOCUMENTS {
            return Err(AnalysisError::TooFewFiles(uploads.len()));
        }

        let upload_count = uploads.len();
        info!("Starting analysis of {} uploaded files", upload_count);

        // PDF and DOCX parsing is CPU-bound
        let corpus = tokio::task::spawn_blocking(move || build_corpus(uploads))
            .await
            .map_err(|e| AnalysisError::Internal(format!("Extraction task failed: {}", e)))?;

        info!(
            "Extracted text from {} of {} files ({} chars)",
            corpus.len(),
            upload_count,
            corpus.total_chars()
        );

        if corpus.len() < MIN_DOCUMENTS {
            warn!(
                "Only {} of {} files yielded text, need {}",
                corpus.len(),
                upload_count,
                MIN_DOCUMENTS
            );
            return Err(AnalysisError::TooFewDocuments(corpus.len()));
        }

        self.analyze_corpus(&corpus).await
    }

    /// Prompt the model with an already-extracted corpus
    pub async fn analyze_corpus(&self, corpus: &DocumentCorpus) -> Result<String, AnalysisError> {
        let start = Instant::now();
        let prompt = PromptBuilder::new(corpus).build();

        info!(
            "Sending prompt to {} ({}): {} documents, {} chars",
            self.llm_provider.name(),
            self.llm_provider.model(),
            corpus.len(),
            prompt.len()
        );

        let raw = self.llm_provider.generate(&prompt).await.map_err(|e| {
            error!("An error occurred during model call: {}", e);
            AnalysisError::Llm(e)
        })?;

        debug!("Model response length: {} chars", raw.len());
        let cleaned = clean_response(&raw);

        if self.config.output_policy == OutputPolicy::Strict {
            let report = parse_report(&cleaned).map_err(|e| {
                error!("Rejecting model output: {}", e);
                e
            })?;

            if self.config.warn_unknown_sources {
                let known: Vec<&str> = corpus.filenames().collect();
                let unknown = report.unknown_sources(&known);
                if !unknown.is_empty() {
                    warn!("Report cites sources that were not uploaded: {:?}", unknown);
                }
            }

            let summary = report.summary();
            info!(
                "Analysis complete in {}ms: {} contradictions ({} high, {} medium, {} low)",
                start.elapsed().as_millis(),
                summary.total,
                summary.high,
                summary.medium,
                summary.low
            );
        } else {
            info!("Analysis complete in {}ms (unvalidated)", start.elapsed().as_millis());
        }

        Ok(cleaned)
    }
}

/// Extract every upload, keeping only the ones that yield text
///
/// Failures are logged with their reason and otherwise ignored.
pub fn build_corpus(uploads: Vec<UploadedDocument>) -> DocumentCorpus {
    let mut corpus = DocumentCorpus::new();

    for upload in uploads {
        match extract_document(&upload.filename, &upload.bytes) {
            Ok(text) => {
                debug!("Extracted {} chars from {}", text.len(), upload.filename);
                if corpus.insert(upload.filename.clone(), text).is_some() {
                    warn!("Duplicate filename {}, keeping the later upload", upload.filename);
                }
            }
            Err(e) => {
                warn!("Could not extract text from {}: {}", upload.filename, e);
            }
        }
    }

    corpus
}
