use std::path::Path;

use inciscan_core::{BackendError, PdfBackend};

/// Native text-layer decode via the `pdf-extract` crate.
///
/// Pure Rust, no external tools. Scanned PDFs typically decode to an empty
/// or near-empty string here; the recovery policy in the parsing crate is
/// what decides when to fall back to OCR.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for PdfExtractBackend {
    fn decode_native(&self, path: &Path) -> Result<String, BackendError> {
        tracing::debug!(path = %path.display(), "decoding native text layer");
        let text =
            pdf_extract::extract_text(path).map_err(|e| BackendError::Decode(e.to_string()))?;
        tracing::debug!(chars = text.len(), "native text layer decoded");
        Ok(text)
    }
}
