use std::path::Path;

use thiserror::Error;

/// Which heuristic produced an ingredient list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// Free-text "Ingredients: ..." statement.
    Inline,
    /// Tabular INCI list under a recognized header.
    Table,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionMethod::Inline => write!(f, "inline"),
            ExtractionMethod::Table => write!(f, "table"),
        }
    }
}

/// Outcome of running the ingredient heuristics over one document.
///
/// Absence is a value, never an error: a document whose text yields no
/// recognizable ingredient section is `NotFound`, while an unreadable
/// document surfaces as a [`BackendError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// A normalized, non-empty ingredient list. `ingredients` is guaranteed
    /// non-empty: normalization that yields an empty string is treated as
    /// "not found" by the extractors.
    Found {
        ingredients: String,
        method: ExtractionMethod,
    },
    /// Neither heuristic matched.
    NotFound,
}

impl ExtractionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ExtractionOutcome::Found { .. })
    }

    /// The ingredient string, if any.
    pub fn ingredients(&self) -> Option<&str> {
        match self {
            ExtractionOutcome::Found { ingredients, .. } => Some(ingredients),
            ExtractionOutcome::NotFound => None,
        }
    }
}

/// Which recovery path produced a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySource {
    /// The PDF's native text layer.
    Native,
    /// Rasterization + OCR (the native layer was missing or too short).
    Ocr,
}

/// Best-effort textual content of one document.
///
/// A single blob with no page or layout structure; pages are joined with
/// newlines by the recovery step. May be empty. The source tag records which
/// path produced it and is never consulted by the heuristics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredText {
    pub text: String,
    pub source: RecoverySource,
}

/// One row of the batch report: a document's display name and its outcome.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub file_name: String,
    pub outcome: ExtractionOutcome,
}

/// A single rendered page, kept in memory as an encoded image.
///
/// Holding the bytes (rather than a file path) lets the rasterizer clean up
/// its scratch directory before returning.
#[derive(Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 1-based page number.
    pub page: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

impl std::fmt::Debug for PageImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageImage")
            .field("page", &self.page)
            .field("png", &format_args!("<{} bytes>", self.png.len()))
            .finish()
    }
}

/// Errors from the text-recovery backends.
///
/// All of these are fatal for the document being processed; the pipeline
/// does not retry or degrade, it propagates.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to decode PDF text layer: {0}")]
    Decode(String),
    #[error("failed to rasterize PDF: {0}")]
    Rasterize(String),
    #[error("OCR failed: {0}")]
    Ocr(String),
    #[error("external tool `{tool}` failed to start: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for native PDF text-layer decoders.
///
/// Implementors provide the low-level decode step; the recovery policy
/// (native-vs-OCR decision) and the parsing heuristics live in the parsing
/// crate.
pub trait PdfBackend: Send + Sync {
    /// Decode the native text layer of a PDF, all pages concatenated with
    /// newline separators. Returns whatever the text layer holds, which may
    /// be nothing for scanned documents.
    fn decode_native(&self, path: &Path) -> Result<String, BackendError>;
}

/// Trait for OCR backends: page rasterization plus text recognition.
pub trait OcrBackend: Send + Sync {
    /// Render every page of a PDF to an image, in page order.
    fn rasterize(&self, path: &Path) -> Result<Vec<PageImage>, BackendError>;

    /// Recognize the text in a single rendered page.
    fn recognize(&self, image: &PageImage) -> Result<String, BackendError>;
}
