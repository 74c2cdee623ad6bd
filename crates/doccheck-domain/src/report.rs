//! Contradiction analysis report
//!
//! Mirrors the JSON object the model is instructed to return:
//!
//! ```text
//! { "contradictions": [ { "id": 1, "type": "...", "severity": "High", ... } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a contradiction is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Minor inconsistency
    #[serde(alias = "low", alias = "LOW")]
    Low,
    /// Conflict worth resolving
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    /// Conflict that changes the meaning of a document
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        };
        f.write_str(name)
    }
}

/// One contradiction found between documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contradiction {
    /// Index starting from 1
    pub id: u32,

    /// Short category, e.g. "Time Conflict"
    #[serde(rename = "type")]
    pub kind: String,

    /// Severity rating
    pub severity: Severity,

    /// One-sentence summary
    pub description: String,

    /// Explanation quoting the conflicting passages
    pub details: String,

    /// Filenames involved in the conflict
    pub sources: Vec<String>,

    /// Actionable suggestion to resolve the conflict
    pub suggestion: String,

    /// Model confidence in [0.0, 1.0]
    pub confidence: f64,
}

impl Contradiction {
    /// Validate field contents beyond what deserialization guarantees
    pub fn validate(&self) -> Result<(), String> {
        if self.id == 0 {
            return Err("id must start from 1".to_string());
        }
        if self.kind.trim().is_empty() {
            return Err(format!("contradiction {}: type is empty", self.id));
        }
        if self.description.trim().is_empty() {
            return Err(format!("contradiction {}: description is empty", self.id));
        }
        if self.sources.is_empty() {
            return Err(format!("contradiction {}: sources is empty", self.id));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "contradiction {}: confidence {} out of range [0.0, 1.0]",
                self.id, self.confidence
            ));
        }
        Ok(())
    }
}

/// The full analysis returned by the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Contradictions found, possibly empty
    pub contradictions: Vec<Contradiction>,
}

impl AnalysisReport {
    /// Validate every contradiction record
    pub fn validate(&self) -> Result<(), String> {
        for contradiction in &self.contradictions {
            contradiction.validate()?;
        }
        Ok(())
    }

    /// Count contradictions by severity
    pub fn summary(&self) -> SeveritySummary {
        let mut summary = SeveritySummary {
            total: self.contradictions.len(),
            ..Default::default()
        };
        for c in &self.contradictions {
            match c.severity {
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
        }
        summary
    }

    /// Sources cited by the report that are not in `known`
    pub fn unknown_sources<'a>(&'a self, known: &[&str]) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = self
            .contradictions
            .iter()
            .flat_map(|c| c.sources.iter().map(String::as_str))
            .filter(|source| !known.contains(source))
            .collect();
        unknown.sort_unstable();
        unknown.dedup();
        unknown
    }
}

/// Contradiction counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeveritySummary {
    /// Total contradictions
    pub total: usize,
    /// High severity
    pub high: usize,
    /// Medium severity
    pub medium: usize,
    /// Low severity
    pub low: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contradiction(id: u32, severity: Severity, confidence: f64) -> Contradiction {
        Contradiction {
            id,
            kind: "Time Conflict".to_string(),
            severity,
            description: "Meeting times differ.".to_string(),
            details: "a.txt says 3pm, b.txt says 4pm.".to_string(),
            sources: vec!["a.txt".to_string(), "b.txt".to_string()],
            suggestion: "Confirm the meeting time.".to_string(),
            confidence,
        }
    }

    #[test]
    fn test_deserialize_model_output() {
        let json = r#"{
            "contradictions": [
                {
                    "id": 1,
                    "type": "Time Conflict",
                    "severity": "High",
                    "description": "Meeting times differ.",
                    "details": "3pm vs 4pm",
                    "sources": ["a.txt", "b.txt"],
                    "suggestion": "Pick one.",
                    "confidence": 0.92
                }
            ]
        }"#;

        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.contradictions.len(), 1);
        assert_eq!(report.contradictions[0].kind, "Time Conflict");
        assert_eq!(report.contradictions[0].severity, Severity::High);
        assert!(report.validate().is_ok());
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let report = AnalysisReport {
            contradictions: vec![contradiction(1, Severity::Low, 0.5)],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["contradictions"][0]["type"], "Time Conflict");
        assert_eq!(value["contradictions"][0]["severity"], "Low");
    }

    #[test]
    fn test_lowercase_severity_accepted() {
        let severity: Severity = serde_json::from_str(r#""medium""#).unwrap();
        assert_eq!(severity, Severity::Medium);
        assert!(serde_json::from_str::<Severity>(r#""Critical""#).is_err());
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report: AnalysisReport = serde_json::from_str(r#"{"contradictions": []}"#).unwrap();
        assert!(report.validate().is_ok());
        assert_eq!(report.summary().total, 0);
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{"contradictions": [{"id": 1, "type": "X"}]}"#;
        assert!(serde_json::from_str::<AnalysisReport>(json).is_err());
    }

    #[test]
    fn test_confidence_out_of_range() {
        let report = AnalysisReport {
            contradictions: vec![contradiction(1, Severity::High, 1.5)],
        };
        let err = report.validate().unwrap_err();
        assert!(err.contains("confidence"));
    }

    #[test]
    fn test_zero_id_and_empty_sources_rejected() {
        assert!(contradiction(0, Severity::Low, 0.5).validate().is_err());

        let mut c = contradiction(1, Severity::Low, 0.5);
        c.sources.clear();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_summary_counts() {
        let report = AnalysisReport {
            contradictions: vec![
                contradiction(1, Severity::High, 0.9),
                contradiction(2, Severity::High, 0.8),
                contradiction(3, Severity::Low, 0.4),
            ],
        };
        let summary = report.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.medium, 0);
        assert_eq!(summary.low, 1);
    }

    #[test]
    fn test_unknown_sources() {
        let mut c = contradiction(1, Severity::Low, 0.5);
        c.sources.push("ghost.pdf".to_string());
        let report = AnalysisReport {
            contradictions: vec![c.clone(), c],
        };
        assert_eq!(report.unknown_sources(&["a.txt", "b.txt"]), vec!["ghost.pdf"]);
        assert!(report.unknown_sources(&["a.txt", "b.txt", "ghost.pdf"]).is_empty());
    }
}
