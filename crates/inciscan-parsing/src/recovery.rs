use std::path::Path;

use inciscan_core::{BackendError, OcrBackend, PdfBackend, RecoveredText, RecoverySource};

use crate::config::ParsingConfig;

/// Produce a document's best-effort text.
///
/// The native text layer is tried first; if the trimmed result is shorter
/// than `min_native_chars` the document is treated as image-only (scanned)
/// and every page is rasterized and OCRed instead. Backend failures are
/// fatal for this document and propagate, no retry.
pub fn recover_text(
    path: &Path,
    pdf: &dyn PdfBackend,
    ocr: &dyn OcrBackend,
) -> Result<RecoveredText, BackendError> {
    recover_text_with_config(path, pdf, ocr, &ParsingConfig::default())
}

/// Config-aware version of [`recover_text`].
pub(crate) fn recover_text_with_config(
    path: &Path,
    pdf: &dyn PdfBackend,
    ocr: &dyn OcrBackend,
    config: &ParsingConfig,
) -> Result<RecoveredText, BackendError> {
    let native = pdf.decode_native(path)?;
    let native = native.trim();

    if native.chars().count() >= config.min_native_chars {
        return Ok(RecoveredText {
            text: native.to_string(),
            source: RecoverySource::Native,
        });
    }

    let pages = ocr.rasterize(path)?;
    let mut chunks = Vec::with_capacity(pages.len());
    for image in &pages {
        chunks.push(ocr.recognize(image)?);
    }

    Ok(RecoveredText {
        text: chunks.join("\n").trim().to_string(),
        source: RecoverySource::Ocr,
    })
}
