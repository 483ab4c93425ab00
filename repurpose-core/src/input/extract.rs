//! Plain-text extraction for uploaded documents.
//!
//! DOCX files are ZIP archives; the body lives in `word/document.xml` and is
//! read with a streaming `quick-xml` reader. PDFs go through `pdf-extract`.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type '{0}'. Please upload a PDF, DOCX or plain text file.")]
    UnsupportedFormat(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract PDF text: {0}")]
    Pdf(String),

    #[error("Invalid DOCX archive: {0}")]
    Docx(String),
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Markdown,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detect the kind from a file name and an optional MIME type.
    pub fn detect(file_name: &str, mime_type: Option<&str>) -> Result<Self, ExtractError> {
        let name = file_name.to_lowercase();
        let mime = mime_type.unwrap_or_default().to_lowercase();

        if name.ends_with(".pdf") || mime.contains("pdf") {
            return Ok(Self::Pdf);
        }
        if name.ends_with(".docx") || mime.contains("word") || mime.contains("docx") {
            return Ok(Self::Docx);
        }
        if name.ends_with(".md") || name.ends_with(".markdown") || mime.contains("markdown") {
            return Ok(Self::Markdown);
        }
        if name.ends_with(".txt") || mime.starts_with("text/") {
            return Ok(Self::PlainText);
        }

        Err(ExtractError::UnsupportedFormat(file_name.to_string()))
    }
}

/// Extract best-effort plain text from `bytes` of the given kind.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::PlainText | DocumentKind::Markdown => {
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        }
        DocumentKind::Docx => extract_docx_text(bytes),
    }
}

/// Read a file from disk and extract its text based on the extension.
pub fn read_document(path: &Path) -> Result<String, ExtractError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = DocumentKind::detect(&file_name, None)?;
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.display().to_string(),
        source,
    })?;
    extract_text(&bytes, kind)
}

fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut body = Vec::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|e| ExtractError::Docx(format!("{DOCX_BODY}: {e}")))?
        .read_to_end(&mut body)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    docx_body_text(&body)
}

/// Collect the text runs of a WordprocessingML body, one line per paragraph.
fn docx_body_text(xml: &[u8]) -> Result<String, ExtractError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractError::Docx(err.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n"))
}
