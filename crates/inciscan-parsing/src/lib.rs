use std::path::Path;

use thiserror::Error;

pub mod config;
pub mod extractor;
pub mod inline;
pub mod normalize;
pub mod recovery;
pub mod table;

pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::IngredientExtractor;
pub use inline::extract_inline;
pub use normalize::normalize_ingredients;
pub use recovery::recover_text;
pub use table::extract_table;
// Re-export domain types from core (canonical definitions live there)
pub use inciscan_core::{
    BackendError, DocumentReport, ExtractionMethod, ExtractionOutcome, OcrBackend, PdfBackend,
    RecoveredText, RecoverySource,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Extract a product's ingredient list from a PDF file.
///
/// Pipeline:
/// 1. Recover text: native layer via `pdf`, OCR fallback via `ocr` when the
///    native layer is too short (image-only/scanned documents)
/// 2. Try the inline-statement heuristic ("Ingredients: ...")
/// 3. Fall back to the tabular-list heuristic (INCI table headers)
///
/// Absence of a recognizable ingredient section is `Ok(NotFound)`, never an
/// error; unreadable documents and OCR failures are errors.
pub fn extract_ingredients(
    pdf_path: &Path,
    pdf: &dyn PdfBackend,
    ocr: &dyn OcrBackend,
) -> Result<ExtractionOutcome, ParsingError> {
    IngredientExtractor::new().extract_from_pdf(pdf_path, pdf, ocr)
}
