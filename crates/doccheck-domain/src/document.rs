//! Uploaded documents and their formats

use std::fmt;

/// A single file received in an upload
///
/// Owned by the request that received it and dropped once its text has been
/// extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Client-supplied filename (may be empty)
    pub filename: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Create a new uploaded document
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Text formats DocCheck knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Portable Document Format (`.pdf`)
    Pdf,
    /// Office Open XML word-processing document (`.docx`)
    Docx,
    /// Plain UTF-8 text (`.txt`)
    Txt,
}

impl DocumentKind {
    /// All supported kinds
    pub const ALL: [DocumentKind; 3] = [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Txt];

    /// File suffix, including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => ".pdf",
            DocumentKind::Docx => ".docx",
            DocumentKind::Txt => ".txt",
        }
    }

    /// Resolve a kind from a filename suffix (ASCII case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use doccheck_domain::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_filename("report.PDF"), Some(DocumentKind::Pdf));
    /// assert_eq!(DocumentKind::from_filename("notes.md"), None);
    /// ```
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| lower.ends_with(kind.extension()))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
            DocumentKind::Txt => "TXT",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_suffix() {
        assert_eq!(DocumentKind::from_filename("a.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("a.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("a.txt"), Some(DocumentKind::Txt));
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        assert_eq!(DocumentKind::from_filename("Policy.DOCX"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("README.Txt"), Some(DocumentKind::Txt));
    }

    #[test]
    fn test_unrecognized_kinds() {
        assert_eq!(DocumentKind::from_filename("a.doc"), None);
        assert_eq!(DocumentKind::from_filename("archive.txt.gz"), None);
        assert_eq!(DocumentKind::from_filename("pdf"), None);
        assert_eq!(DocumentKind::from_filename(""), None);
    }

    #[test]
    fn test_uploaded_document_keeps_bytes() {
        let doc = UploadedDocument::new("minutes.txt", b"hello".to_vec());
        assert_eq!(doc.filename, "minutes.txt");
        assert_eq!(doc.bytes, b"hello");
    }
}
