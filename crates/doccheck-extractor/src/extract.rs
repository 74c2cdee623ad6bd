//! Per-format text extraction
//!
//! Each extractor takes the raw bytes of one upload and returns its text or
//! the reason it has none. Callers decide what a failure means; the
//! [`Analyzer`](crate::Analyzer) drops the document and logs the reason.

use crate::error::ExtractionError;
use doccheck_domain::DocumentKind;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, warn};

/// Extract text from an upload, choosing the format by filename suffix
pub fn extract_document(filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_filename(filename)
        .ok_or_else(|| ExtractionError::UnsupportedFormat(filename.to_string()))?;

    debug!("Extracting {} ({}, {} bytes)", filename, kind, bytes.len());
    extract_text(kind, bytes)
}

/// Extract text from bytes of a known format
///
/// An empty result is reported as [`ExtractionError::Empty`]; any other
/// text, whitespace included, is returned unchanged.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match kind {
        DocumentKind::Pdf => extract_pdf(bytes)?,
        DocumentKind::Docx => extract_docx(bytes)?,
        DocumentKind::Txt => extract_txt(bytes)?,
    };

    if text.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text)
}

/// Text of every page, concatenated
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract can panic on malformed fonts/glyphs
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Corrupt(format!("PDF extraction failed: {}", e))),
        Err(_panic) => {
            warn!("PDF extraction panicked - likely malformed fonts");
            Err(ExtractionError::Corrupt(
                "PDF extraction panicked - likely contains malformed fonts".to_string(),
            ))
        }
    }
}

/// Body paragraphs joined by newlines
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ExtractionError::Corrupt(format!("DOCX read failed: {}", e)))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Text of the runs in a paragraph, including runs inside hyperlinks
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut output = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, &mut output),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for link_child in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = link_child {
                        push_run_text(run, &mut output);
                    }
                }
            }
            _ => {}
        }
    }
    output
}

fn push_run_text(run: &docx_rs::Run, output: &mut String) {
    for run_child in &run.children {
        match run_child {
            docx_rs::RunChild::Text(text) => output.push_str(&text.text),
            docx_rs::RunChild::Tab(_) => output.push('\t'),
            docx_rs::RunChild::Break(_) => output.push('\n'),
            _ => {}
        }
    }
}

/// Strict UTF-8 decode
fn extract_txt(bytes: &[u8]) -> Result<String, ExtractionError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError::InvalidUtf8(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};
    use std::io::Cursor;

    /// One page per line of text, set in Helvetica
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(b"Helvetica".to_vec())),
            ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
        ]));
        let resources_id = doc.add_object(Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
        )]));

        let mut page_ids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                    Operation::new("Td", vec![Object::Integer(72), Object::Integer(700)]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(text.as_bytes().to_vec(), lopdf::StringFormat::Literal)],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

            let page_id = doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
                ("Resources", Object::Reference(resources_id)),
                ("Contents", Object::Reference(content_id)),
            ]));
            page_ids.push(page_id);
        }

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(page_ids.len() as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = docx_rs::Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(
                docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text)),
            );
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_txt_returns_exact_text() {
        let text = "Meeting is at 3pm\nRoom 4B – café\n";
        let extracted = extract_document("a.txt", text.as_bytes()).unwrap();
        assert_eq!(extracted, text);
    }

    #[test]
    fn test_txt_invalid_utf8() {
        let bytes = [0x66, 0x6f, 0xff, 0xfe, 0x6f];
        let result = extract_document("bad.txt", &bytes);
        assert!(matches!(result, Err(ExtractionError::InvalidUtf8(_))));
    }

    #[test]
    fn test_empty_txt() {
        assert_eq!(extract_document("a.txt", b""), Err(ExtractionError::Empty));
    }

    #[test]
    fn test_whitespace_only_txt_is_kept() {
        assert_eq!(extract_document("blank.txt", b"   \n\t").unwrap(), "   \n\t");
    }

    #[test]
    fn test_unsupported_format() {
        let result = extract_document("slides.pptx", b"whatever");
        assert_eq!(
            result,
            Err(ExtractionError::UnsupportedFormat("slides.pptx".to_string()))
        );
    }

    #[test]
    fn test_uppercase_suffix_dispatches() {
        assert_eq!(extract_document("NOTES.TXT", b"hi").unwrap(), "hi");
    }

    #[test]
    fn test_docx_paragraphs_joined() {
        let bytes = build_docx(&["Leave policy", "Employees get 20 days."]);
        let text = extract_document("policy.docx", &bytes).unwrap();
        assert_eq!(text, "Leave policy\nEmployees get 20 days.");
    }

    #[test]
    fn test_docx_without_text_is_empty() {
        let bytes = build_docx(&[""]);
        assert_eq!(extract_document("blank.docx", &bytes), Err(ExtractionError::Empty));
    }

    #[test]
    fn test_corrupt_docx() {
        let result = extract_document("broken.docx", b"PK\x03\x04 not really a zip");
        assert!(matches!(result, Err(ExtractionError::Corrupt(_))));
    }

    #[test]
    fn test_pdf_text_extracted() {
        let bytes = build_pdf(&["Meeting is at 3pm"]);
        let text = extract_document("minutes.pdf", &bytes).unwrap();
        assert!(text.contains("Meeting is at 3pm"), "got {:?}", text);
    }

    #[test]
    fn test_pdf_pages_in_order() {
        let bytes = build_pdf(&["First page", "Second page"]);
        let text = extract_document("report.PDF", &bytes).unwrap();

        let first = text.find("First page").unwrap();
        let second = text.find("Second page").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_corrupt_pdf() {
        let result = extract_document("broken.pdf", b"%PDF-1.4\nthis is not a pdf body");
        assert!(matches!(result, Err(ExtractionError::Corrupt(_))));
    }

    #[test]
    fn test_non_pdf_bytes_with_pdf_suffix() {
        let result = extract_document("renamed.pdf", b"Meeting is at 3pm");
        assert!(result.is_err());
    }
}
