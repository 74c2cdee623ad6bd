//! Cleanup and validation of the model's response text

use crate::error::AnalysisError;
use doccheck_domain::AnalysisReport;

/// Strip markdown code fences and surrounding whitespace
///
/// Every literal "```json" and "```" is removed wherever it appears, not
/// only at the edges, then the result is trimmed.
pub fn clean_response(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse cleaned text into a validated report
pub fn parse_report(cleaned: &str) -> Result<AnalysisReport, AnalysisError> {
    let report: AnalysisReport = serde_json::from_str(cleaned)?;
    report.validate().map_err(AnalysisError::MalformedOutput)?;
    Ok(report)
}
