use std::path::Path;

use inciscan_core::{
    ExtractionMethod, ExtractionOutcome, OcrBackend, PdfBackend, RecoveredText,
};

use crate::config::ParsingConfig;
use crate::{ParsingError, inline, recovery, table};

/// A configurable ingredient extraction pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each pipeline step as a method.
/// The default constructor uses built-in patterns; use
/// [`IngredientExtractor::with_config`] to supply custom markers and
/// thresholds.
pub struct IngredientExtractor {
    config: ParsingConfig,
}

impl Default for IngredientExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Produce a document's best-effort text (step 1): native layer, with
    /// OCR fallback for image-only documents.
    pub fn recover_text(
        &self,
        path: &Path,
        pdf: &dyn PdfBackend,
        ocr: &dyn OcrBackend,
    ) -> Result<RecoveredText, ParsingError> {
        recovery::recover_text_with_config(path, pdf, ocr, &self.config).map_err(ParsingError::from)
    }

    /// Try the inline-statement heuristic (step 2).
    pub fn extract_inline(&self, text: &str) -> Option<String> {
        inline::extract_inline_with_config(text, &self.config)
    }

    /// Try the tabular-list heuristic (step 3).
    pub fn extract_table(&self, text: &str) -> Option<String> {
        table::extract_table_with_config(text, &self.config)
    }

    /// Run both heuristics over already-recovered text.
    ///
    /// The heuristics are mutually exclusive fallbacks, never merged: inline
    /// wins when it yields anything, tabular is tried only afterwards.
    pub fn extract_from_text(&self, text: &str) -> ExtractionOutcome {
        if let Some(ingredients) = self.extract_inline(text) {
            return ExtractionOutcome::Found {
                ingredients,
                method: ExtractionMethod::Inline,
            };
        }
        if let Some(ingredients) = self.extract_table(text) {
            return ExtractionOutcome::Found {
                ingredients,
                method: ExtractionMethod::Table,
            };
        }
        ExtractionOutcome::NotFound
    }

    /// Run the full per-document pipeline: recovery, then the heuristics.
    pub fn extract_from_pdf(
        &self,
        path: &Path,
        pdf: &dyn PdfBackend,
        ocr: &dyn OcrBackend,
    ) -> Result<ExtractionOutcome, ParsingError> {
        let recovered = self.recover_text(path, pdf, ocr)?;
        Ok(self.extract_from_text(&recovered.text))
    }
}
