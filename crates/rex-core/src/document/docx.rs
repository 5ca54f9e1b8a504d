//! DOCX text extraction: unzip `word/document.xml` and walk the paragraphs.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use super::{DocumentFormat, DocumentLoader, LoadedDocument, Result};
use crate::error::DocumentError;

const DOCUMENT_XML: &str = "word/document.xml";

/// Default cap on the uncompressed size of `word/document.xml`.
pub const DEFAULT_MAX_XML_SIZE: usize = 64 * 1024 * 1024;

/// Largest buffer reserved up front, whatever the archive header claims.
const INITIAL_CAPACITY_CAP: usize = 1024 * 1024;

/// Document loader for Office Open XML word processing files.
pub struct DocxLoader {
    max_xml_size: usize,
}

impl DocxLoader {
    pub fn new() -> Self {
        Self {
            max_xml_size: DEFAULT_MAX_XML_SIZE,
        }
    }

    /// Set the largest uncompressed document part that will be read.
    pub fn with_max_xml_size(mut self, max_xml_size: usize) -> Self {
        self.max_xml_size = max_xml_size;
        self
    }

    /// Read the main document part out of the archive.
    ///
    /// The declared entry size is not trusted: reads stop one byte past the
    /// limit so a highly compressed part cannot exhaust memory.
    fn document_xml(&self, data: &[u8]) -> Result<String> {
        let mut archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| DocumentError::Docx(e.to_string()))?;

        let entry = archive
            .by_name(DOCUMENT_XML)
            .map_err(|e| DocumentError::Docx(format!("{}: {}", DOCUMENT_XML, e)))?;

        let limit = self.max_xml_size;
        let declared = usize::try_from(entry.size()).unwrap_or(usize::MAX);
        if declared > limit {
            return Err(DocumentError::TooLarge {
                size: declared,
                limit,
            });
        }

        let mut xml = String::with_capacity(declared.min(INITIAL_CAPACITY_CAP));
        entry
            .take(limit as u64 + 1)
            .read_to_string(&mut xml)
            .map_err(|e| DocumentError::Docx(e.to_string()))?;

        if xml.len() > limit {
            return Err(DocumentError::TooLarge {
                size: xml.len(),
                limit,
            });
        }

        Ok(xml)
    }
}

impl Default for DocxLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader for DocxLoader {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn load(&self, data: &[u8]) -> Result<LoadedDocument> {
        let xml = self.document_xml(data)?;
        let text = paragraphs_to_text(&xml)?;

        debug!("DOCX: {} bytes of XML -> {} chars of text", xml.len(), text.len());

        Ok(LoadedDocument {
            format: DocumentFormat::Docx,
            text,
            page_count: None,
        })
    }
}

/// Flatten WordprocessingML into text, one line per paragraph.
///
/// Only `w:t` content is kept. Tabs and breaks inside runs become `\t` and
/// `\n`; table cells are ordinary paragraphs so their text comes through too.
pub(crate) fn paragraphs_to_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" if in_run => text.push('\t'),
                b"br" | b"cr" if in_run => text.push('\n'),
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let chunk = t.unescape().map_err(|e| DocumentError::Xml(e.to_string()))?;
                text.push_str(&chunk);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"r" => in_run = false,
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Xml(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Email: </w:t></w:r><w:r><w:t>jane@example.com</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Rust &amp; Go</w:t></w:r></w:p>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>MIT</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
  </w:body>
</w:document>"#;

    fn build_docx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_to_text() {
        let text = paragraphs_to_text(BODY).unwrap();
        assert_eq!(
            text,
            "Jane Doe\nEmail: jane@example.com\n\nSkills\tRust & Go\nMIT\n"
        );
    }

    #[test]
    fn test_load_docx_archive() {
        let data = build_docx(&[("[Content_Types].xml", "<Types/>"), (DOCUMENT_XML, BODY)]);
        let doc = DocxLoader::new().load(&data).unwrap();

        assert_eq!(doc.format, DocumentFormat::Docx);
        assert!(doc.text.starts_with("Jane Doe\n"));
        assert!(doc.text.contains("jane@example.com"));
    }

    #[test]
    fn test_missing_document_part() {
        let data = build_docx(&[("word/styles.xml", "<w:styles/>")]);
        let result = DocxLoader::new().load(&data);
        assert!(matches!(result, Err(DocumentError::Docx(msg)) if msg.contains(DOCUMENT_XML)));
    }

    #[test]
    fn test_not_a_zip() {
        let result = DocxLoader::new().load(b"PK\x03\x04 definitely truncated");
        assert!(matches!(result, Err(DocumentError::Docx(_))));
    }

    #[test]
    fn test_oversized_document_part() {
        let padding = format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", "x".repeat(4096));
        let body = BODY.replace("</w:body>", &format!("{}</w:body>", padding));
        let data = build_docx(&[(DOCUMENT_XML, &body)]);

        let result = DocxLoader::new().with_max_xml_size(1024).load(&data);
        assert!(matches!(
            result,
            Err(DocumentError::TooLarge { limit: 1024, .. })
        ));

        let doc = DocxLoader::new()
            .with_max_xml_size(body.len())
            .load(&data)
            .unwrap();
        assert!(doc.text.starts_with("Jane Doe\n"));
    }
}
