//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::{debug, trace, warn};

use super::{DocumentFormat, DocumentLoader, LoadedDocument, Result};
use crate::error::DocumentError;
use crate::models::config::DocumentConfig;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// Contains only images (scanned document).
    Image,
    /// Contains both text and images.
    Hybrid,
    /// Empty or unreadable.
    Empty,
}

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    decrypt_empty_password: bool,
    min_text_length: usize,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Extracted text.
    pub text: String,
    /// Number of pages.
    pub page_count: u32,
    /// Number of image objects in the document.
    pub image_count: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(&DocumentConfig::default())
    }

    /// Create an extractor using the given document settings.
    pub fn with_config(config: &DocumentConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            decrypt_empty_password: config.decrypt_empty_password,
            min_text_length: config.min_text_length,
        }
    }

    /// Parse a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Pdf(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract works on bytes, so hand it the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| DocumentError::Pdf(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    /// Number of pages in the loaded PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Extract text from the entire PDF.
    pub fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(DocumentError::Pdf("no document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| DocumentError::TextExtraction(e.to_string()))
    }

    /// Count image XObjects across the whole document.
    fn count_images(&self) -> usize {
        let doc = match self.document.as_ref() {
            Some(d) => d,
            None => return 0,
        };

        let count = doc
            .objects
            .values()
            .filter(|object| is_image_object(object))
            .count();

        trace!("Found {} image objects", count);
        count
    }

    /// Classify the PDF from its text length and image count.
    pub fn classify(&self, text_len: usize, image_count: usize) -> PdfType {
        let has_text = text_len > self.min_text_length;
        let has_images = image_count > 0;

        match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        }
    }

    /// Extract text and classify the loaded PDF.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        let text = self.extract_text()?;
        let text_len = text.trim().len();
        let image_count = self.count_images();
        let pdf_type = self.classify(text_len, image_count);

        debug!(
            "PDF analysis: {} pages, {} chars text, {} images -> {:?}",
            page_count, text_len, image_count, pdf_type
        );

        Ok(PdfContent {
            pdf_type,
            text,
            page_count,
            image_count,
        })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_image_object(object: &Object) -> bool {
    let Object::Stream(stream) = object else {
        return false;
    };

    stream
        .dict
        .get(b"Subtype")
        .ok()
        .and_then(|subtype| subtype.as_name().ok())
        .is_some_and(|name| name == b"Image")
}

/// Document loader for PDF files.
pub struct PdfLoader {
    config: DocumentConfig,
}

impl PdfLoader {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }
}

impl DocumentLoader for PdfLoader {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn load(&self, data: &[u8]) -> Result<LoadedDocument> {
        let mut extractor = PdfExtractor::with_config(&self.config);
        extractor.load(data)?;

        let content = extractor.extract_all()?;
        let has_text = !content.text.trim().is_empty();

        match content.pdf_type {
            PdfType::Image if !has_text => return Err(DocumentError::Scanned),
            PdfType::Empty if !has_text => return Err(DocumentError::Empty),
            PdfType::Image | PdfType::Empty => {
                warn!(
                    "PDF has very little embedded text ({} chars); results may be incomplete",
                    content.text.trim().len()
                );
            }
            PdfType::Text | PdfType::Hybrid => {}
        }

        Ok(LoadedDocument {
            format: DocumentFormat::Pdf,
            text: content.text,
            page_count: Some(content.page_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::load_document;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Dictionary, Stream};

    /// One A4 page with the given content operations and resources.
    fn build_pdf(operations: Vec<Operation>, resources: Dictionary) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let resources_id = doc.add_object(resources);
        let media_box: Vec<Object> = vec![0.into(), 0.into(), 595.into(), 842.into()];

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box.clone(),
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => media_box,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    fn text_pdf(lines: &[&str]) -> Vec<u8> {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![16.into()]),
            Operation::new("Td", vec![72.into(), 760.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));

        build_pdf(operations, dictionary! { "Font" => dictionary! { "F1" => font } })
    }

    fn image_only_pdf() -> Vec<u8> {
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 1,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            vec![0x80],
        );
        let operations = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![595.into(), 0.into(), 0.into(), 842.into(), 0.into(), 0.into()],
            ),
            Operation::new("Do", vec!["Im1".into()]),
            Operation::new("Q", vec![]),
        ];

        build_pdf(operations, dictionary! { "XObject" => dictionary! { "Im1" => image } })
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_classify() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.classify(400, 0), PdfType::Text);
        assert_eq!(extractor.classify(400, 2), PdfType::Hybrid);
        assert_eq!(extractor.classify(10, 1), PdfType::Image);
        assert_eq!(extractor.classify(0, 0), PdfType::Empty);
    }

    #[test]
    fn test_corrupt_pdf_is_rejected() {
        let loader = PdfLoader::new(DocumentConfig::default());
        let result = loader.load(b"%PDF-1.4\nthis is not really a pdf");
        assert!(matches!(
            result,
            Err(DocumentError::Pdf(_)) | Err(DocumentError::NoPages)
        ));
    }

    #[test]
    fn test_image_object_detection() {
        let mut dict = lopdf::Dictionary::new();
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        let image = Object::Stream(lopdf::Stream::new(dict, Vec::new()));
        assert!(is_image_object(&image));

        let mut dict = lopdf::Dictionary::new();
        dict.set("Subtype", Object::Name(b"Form".to_vec()));
        let form = Object::Stream(lopdf::Stream::new(dict, Vec::new()));
        assert!(!is_image_object(&form));
        assert!(!is_image_object(&Object::Null));
    }

    #[test]
    fn test_text_pdf_loads() {
        let data = text_pdf(&[
            "John Doe",
            "Senior Software Engineer",
            "john.doe@example.com",
            "Skills: Rust, Python, Docker",
        ]);

        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();
        let content = extractor.extract_all().unwrap();
        assert_eq!(content.page_count, 1);
        assert_eq!(content.image_count, 0);
        assert_eq!(content.pdf_type, PdfType::Text);

        let doc = load_document(&data, DocumentFormat::Pdf, &DocumentConfig::default()).unwrap();
        assert_eq!(doc.page_count, Some(1));
        assert!(doc.text.contains("John Doe"));
        assert!(doc.text.contains("john.doe@example.com"));
    }

    #[test]
    fn test_image_only_pdf_is_scanned() {
        let data = image_only_pdf();

        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();
        let content = extractor.extract_all().unwrap();
        assert_eq!(content.image_count, 1);
        assert_eq!(content.pdf_type, PdfType::Image);

        let result = PdfLoader::new(DocumentConfig::default()).load(&data);
        assert!(matches!(result, Err(DocumentError::Scanned)));
    }
}
