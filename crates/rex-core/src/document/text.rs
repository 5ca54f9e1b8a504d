//! Plain text documents.

use super::{DocumentFormat, DocumentLoader, LoadedDocument, Result};

const BOM: char = '\u{FEFF}';

/// Document loader for UTF-8 text files.
pub struct TextLoader;

impl DocumentLoader for TextLoader {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Text
    }

    fn load(&self, data: &[u8]) -> Result<LoadedDocument> {
        let text = String::from_utf8(data.to_vec())?;
        let text = match text.strip_prefix(BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        };

        Ok(LoadedDocument {
            format: DocumentFormat::Text,
            text,
            page_count: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentError;

    #[test]
    fn test_strips_bom() {
        let doc = TextLoader.load("\u{FEFF}Jane Doe".as_bytes()).unwrap();
        assert_eq!(doc.text, "Jane Doe");
    }

    #[test]
    fn test_invalid_utf8() {
        let result = TextLoader.load(&[b'J', 0xC3, 0x28]);
        assert!(matches!(result, Err(DocumentError::Encoding(_))));
    }
}
