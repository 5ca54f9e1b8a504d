//! WASM bindings for resume entity extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use wasm_bindgen::prelude::*;

use rex_core::clock::current_year;
use rex_core::models::resume::{Resume, SkillCategory};
use rex_core::{
    export, extract_resume, extract_text, DocumentFormat, ExportFormat, ExtractionResult,
    RexConfig, SAMPLE_RESUME,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// The built-in sample resume text.
#[wasm_bindgen]
pub fn sample_resume() -> String {
    SAMPLE_RESUME.to_string()
}

/// Extract resume data from pasted text.
#[wasm_bindgen]
pub fn extract_resume_from_text(text: &str) -> Result<JsValue, JsValue> {
    ResumeExtractor::new().extract(text)
}

/// Extract resume data from file contents (PDF, DOCX or text).
///
/// The format is taken from the file name's extension, falling back to the
/// file's magic bytes.
#[wasm_bindgen]
pub fn extract_resume_from_bytes(file_name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
    ResumeExtractor::new().extract_bytes(file_name, bytes)
}

/// Extract resume data from text and render it as `json`, `csv` or `report`.
#[wasm_bindgen]
pub fn export_resume(text: &str, format: &str) -> Result<String, JsValue> {
    ResumeExtractor::new().export_as(text, format)
}

/// Display category of a skill ("Programming", "Web", ...).
#[wasm_bindgen]
pub fn skill_category(skill: &str) -> String {
    SkillCategory::classify(skill).label().to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Resume extractor class for browser use.
#[wasm_bindgen]
pub struct ResumeExtractor {
    config: RexConfig,
}

#[wasm_bindgen]
impl ResumeExtractor {
    /// Create a new resume extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_reference_year(current_year())
    }

    /// Year used for "present" in date ranges.
    #[wasm_bindgen(getter)]
    pub fn reference_year(&self) -> i32 {
        self.config
            .extraction
            .reference_year
            .unwrap_or_else(current_year)
    }

    #[wasm_bindgen(setter)]
    pub fn set_reference_year(&mut self, year: i32) {
        self.config.extraction.reference_year = Some(year);
    }

    /// Add a skill keyword to match alongside the built-in vocabulary.
    #[wasm_bindgen]
    pub fn add_skill(&mut self, skill: &str) {
        self.config.extraction.extra_skills.push(skill.to_string());
    }

    /// Extract resume data from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.run_text(text).map_err(to_js_error)?;
        to_output(result)
    }

    /// Extract resume data from file contents.
    #[wasm_bindgen]
    pub fn extract_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let result = self.run_bytes(file_name, bytes).map_err(to_js_error)?;
        to_output(result)
    }

    /// Extract resume data from text and render it in an export format.
    #[wasm_bindgen]
    pub fn export_as(&self, text: &str, format: &str) -> Result<String, JsValue> {
        let format: ExportFormat = format.parse().map_err(to_js_error)?;
        let result = self.run_text(text).map_err(to_js_error)?;
        export(&result.resume, format).map_err(to_js_error)
    }
}

impl ResumeExtractor {
    /// Create an extractor with a fixed reference year.
    pub fn with_reference_year(year: i32) -> Self {
        let mut config = RexConfig::default();
        config.extraction.reference_year = Some(year);
        Self { config }
    }

    fn run_text(&self, text: &str) -> rex_core::Result<ExtractionResult> {
        extract_text(text, &self.config)
    }

    fn run_bytes(&self, file_name: &str, bytes: &[u8]) -> rex_core::Result<ExtractionResult> {
        let format = DocumentFormat::detect(Some(file_name), None, bytes)?;
        extract_resume(bytes, format, &self.config)
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extraction result handed to JavaScript.
#[derive(serde::Serialize)]
struct ExtractOutput {
    resume: Resume,
    warnings: Vec<String>,
    processing_time_ms: u64,
}

fn to_output(result: ExtractionResult) -> Result<JsValue, JsValue> {
    if !result.warnings.is_empty() {
        web_sys::console::debug_1(&JsValue::from_str(&result.warnings.join("; ")));
    }

    let output = ExtractOutput {
        resume: result.resume,
        warnings: result.warnings,
        processing_time_ms: result.processing_time_ms,
    };

    serde_wasm_bindgen::to_value(&output).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }

    #[wasm_bindgen_test]
    fn test_extract_sample() {
        let extractor = ResumeExtractor::with_reference_year(2026);
        let result = extractor.run_text(&sample_resume()).unwrap();

        assert_eq!(result.resume.name.as_deref(), Some("John Doe"));
        assert_eq!(result.resume.total_experience_years, Some(7));
        assert_eq!(extractor.reference_year(), 2026);
    }

    #[wasm_bindgen_test]
    fn test_js_entry_points_extract() {
        assert!(extract_resume_from_text(SAMPLE_RESUME).is_ok());
        assert!(extract_resume_from_bytes("resume.txt", SAMPLE_RESUME.as_bytes()).is_ok());
        assert!(export_resume(SAMPLE_RESUME, "report").unwrap().contains("John Doe"));
    }

    #[wasm_bindgen_test]
    fn test_extract_bytes_uses_extension() {
        let extractor = ResumeExtractor::with_reference_year(2026);
        let result = extractor
            .run_bytes("resume.txt", SAMPLE_RESUME.as_bytes())
            .unwrap();
        assert_eq!(result.resume.email.as_deref(), Some("john.doe@email.com"));

        assert!(extractor.run_bytes("resume.pdf", b"not a pdf").is_err());
    }

    #[wasm_bindgen_test]
    fn test_added_skill() {
        let mut extractor = ResumeExtractor::with_reference_year(2026);
        extractor.add_skill("Elixir");

        let result = extractor.run_text("Jane Roe\nBuilt services in Elixir").unwrap();
        assert!(result.resume.skills.contains(&"Elixir".to_string()));
    }

    #[wasm_bindgen_test]
    fn test_export_csv() {
        let csv = ResumeExtractor::with_reference_year(2026)
            .export_as(SAMPLE_RESUME, "csv")
            .unwrap();
        assert!(csv.starts_with("Name,Email,Phone,Skills,Experience,Education"));
    }

    #[wasm_bindgen_test]
    fn test_skill_category() {
        assert_eq!(skill_category("PostgreSQL"), "Database");
        assert_eq!(skill_category("Agile"), "Other");
    }
}
