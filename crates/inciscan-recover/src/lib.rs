pub mod native;
pub mod ocr;

pub use native::PdfExtractBackend;
pub use ocr::{OcrToolchain, PopplerTesseractOcr};
// Re-export the traits these backends implement
pub use inciscan_core::{BackendError, OcrBackend, PageImage, PdfBackend};
