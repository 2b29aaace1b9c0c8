//! Text extraction from various file formats

use crate::error::{DetectorError, Result};
use crate::processing::document::ExtractedDocument;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> impl std::future::Future<Output = Result<ExtractedDocument>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        decode_utf8(bytes).map(ExtractedDocument::plain)
    }
}

/// Markdown is scanned as written; rendering it would hide the spans the redactor must find.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        decode_utf8(bytes).map(ExtractedDocument::plain)
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        DetectorError::Extraction(format!("File is not valid UTF-8 text: {}", e))
    })
}

/// Raw text of a `.docx` package. Word run styling is not inspected.
pub struct DocxExtractor;

const DOCUMENT_PART: &str = "word/document.xml";

impl TextExtractor for DocxExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| DetectorError::Extraction(format!("Missing {}: {}", DOCUMENT_PART, e)))?
            .read_to_string(&mut xml)?;

        let text = self.document_text(&xml)?;
        Ok(ExtractedDocument::plain(text))
    }
}

impl DocxExtractor {
    fn document_text(&self, xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);
        let mut text = String::new();
        let mut in_text_run = false;
        // Depth inside `mc:Choice`; only the `mc:Fallback` branch of alternate content is read
        let mut choice_depth = 0usize;

        loop {
            let event = reader.read_event().map_err(|e| {
                DetectorError::Extraction(format!(
                    "Malformed {} at position {}: {}",
                    DOCUMENT_PART,
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(e) if e.local_name().as_ref() == b"Choice" => choice_depth += 1,
                Event::End(e) if e.local_name().as_ref() == b"Choice" => {
                    choice_depth = choice_depth.saturating_sub(1)
                }
                Event::Eof => break,
                _ if choice_depth > 0 => {}
                Event::Start(e) if e.local_name().as_ref() == b"t" => in_text_run = true,
                Event::End(e) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"p" => text.push_str("\n\n"),
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"tab" => text.push('\t'),
                    b"br" | b"cr" => text.push('\n'),
                    b"p" => text.push_str("\n\n"),
                    _ => {}
                },
                Event::Text(t) if in_text_run => {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| DetectorError::Extraction(format!("Bad XML text: {}", e)))?;
                    text.push_str(&unescaped);
                }
                _ => {}
            }
        }

        Ok(text)
    }
}
