#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use folio::{DocumentGenerator, GeneratorConfig, GenerationRequest, PipelineError};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text shown on a 1-based page, one entry per `Tj`.
    pub fn page_lines(&self, page: u32) -> Vec<String> {
        pdf_assertions::shown_text(&self.doc, page)
    }

    /// All shown text joined with spaces.
    pub fn text(&self) -> String {
        (1..=self.page_count() as u32)
            .flat_map(|page| self.page_lines(page))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First 1-based page that shows `needle` in one of its text runs.
    pub fn page_of(&self, needle: &str) -> Option<u32> {
        (1..=self.page_count() as u32)
            .find(|&page| self.page_lines(page).iter().any(|line| line.contains(needle)))
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn generate(request: &GenerationRequest) -> Result<GeneratedPdf, PipelineError> {
    generate_with(GeneratorConfig::default(), request)
}

pub fn generate_with(
    config: GeneratorConfig,
    request: &GenerationRequest,
) -> Result<GeneratedPdf, PipelineError> {
    let document = DocumentGenerator::new(config)?.generate(request)?;
    GeneratedPdf::from_bytes(document.bytes)
        .map_err(|e| PipelineError::Config(format!("generated PDF does not parse: {e}")))
}
