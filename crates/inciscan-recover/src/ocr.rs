use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use inciscan_core::{BackendError, OcrBackend, PageImage};

/// Resolved locations and settings for the external OCR tools.
///
/// Injected at startup (CLI flag > env var > PATH-resolved name); tool
/// locations are configuration, not constants baked into the extraction
/// logic.
#[derive(Debug, Clone)]
pub struct OcrToolchain {
    /// Poppler's `pdftoppm`, used to rasterize pages.
    pub pdftoppm: PathBuf,
    /// The `tesseract` binary.
    pub tesseract: PathBuf,
    /// Tesseract language spec, e.g. `"eng"` or `"eng+spa+fra"`.
    pub languages: String,
    /// Rasterization resolution in DPI.
    pub dpi: u32,
}

impl Default for OcrToolchain {
    fn default() -> Self {
        Self {
            pdftoppm: PathBuf::from("pdftoppm"),
            tesseract: PathBuf::from("tesseract"),
            languages: "eng".to_string(),
            dpi: 300,
        }
    }
}

/// OCR backend built on Poppler's `pdftoppm` for rasterization and
/// `tesseract` for recognition, both invoked as subprocesses.
///
/// Pages are rendered as PNG into a scratch directory that is removed before
/// `rasterize` returns; the image bytes travel in memory. Recognition feeds
/// each PNG to tesseract over stdin.
#[derive(Debug, Clone, Default)]
pub struct PopplerTesseractOcr {
    toolchain: OcrToolchain,
}

impl PopplerTesseractOcr {
    pub fn new(toolchain: OcrToolchain) -> Self {
        Self { toolchain }
    }

    /// Set the `pdftoppm` location.
    pub fn with_pdftoppm(mut self, path: PathBuf) -> Self {
        self.toolchain.pdftoppm = path;
        self
    }

    /// Set the `tesseract` location.
    pub fn with_tesseract(mut self, path: PathBuf) -> Self {
        self.toolchain.tesseract = path;
        self
    }

    /// Set the tesseract language spec (e.g. `"eng+spa"`).
    pub fn with_languages(mut self, languages: impl Into<String>) -> Self {
        self.toolchain.languages = languages.into();
        self
    }

    /// Set the rasterization resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.toolchain.dpi = dpi;
        self
    }
}

impl OcrBackend for PopplerTesseractOcr {
    fn rasterize(&self, path: &Path) -> Result<Vec<PageImage>, BackendError> {
        let dir = tempfile::tempdir()?;
        let prefix = dir.path().join("page");

        tracing::debug!(
            path = %path.display(),
            dpi = self.toolchain.dpi,
            "rasterizing pages via pdftoppm"
        );

        let output = Command::new(&self.toolchain.pdftoppm)
            .arg("-r")
            .arg(self.toolchain.dpi.to_string())
            .arg("-png")
            .arg(path)
            .arg(&prefix)
            .output()
            .map_err(|e| BackendError::ToolSpawn {
                tool: self.toolchain.pdftoppm.display().to_string(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(BackendError::Rasterize(format!(
                "pdftoppm exited with {}: {}",
                output.status,
                single_line(&String::from_utf8_lossy(&output.stderr)),
            )));
        }

        let mut pages = Vec::new();
        for entry in std::fs::read_dir(dir.path())? {
            let entry = entry?;
            let file = entry.path();
            if file.extension().is_none_or(|e| e != "png") {
                continue;
            }
            let page = page_number(&file).ok_or_else(|| {
                BackendError::Rasterize(format!(
                    "unexpected pdftoppm output file name: {}",
                    file.display()
                ))
            })?;
            pages.push(PageImage {
                page,
                png: std::fs::read(&file)?,
            });
        }

        if pages.is_empty() {
            return Err(BackendError::Rasterize(
                "pdftoppm produced no page images".to_string(),
            ));
        }

        pages.sort_by_key(|p| p.page);
        tracing::debug!(pages = pages.len(), "rasterization complete");
        Ok(pages)
    }

    fn recognize(&self, image: &PageImage) -> Result<String, BackendError> {
        tracing::debug!(page = image.page, "recognizing page via tesseract");

        let mut child = Command::new(&self.toolchain.tesseract)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.toolchain.languages)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BackendError::ToolSpawn {
                tool: self.toolchain.tesseract.display().to_string(),
                source: e,
            })?;

        // stdin is piped, so take() cannot fail
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&image.png)?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(BackendError::Ocr(format!(
                "tesseract exited with {} on page {}: {}",
                output.status,
                image.page,
                single_line(&String::from_utf8_lossy(&output.stderr)),
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse the 1-based page number out of a pdftoppm output name
/// (`page-1.png`, `page-07.png`, ...).
fn page_number(file: &Path) -> Option<u32> {
    let stem = file.file_stem()?.to_str()?;
    let (_, digits) = stem.rsplit_once('-')?;
    digits.parse().ok()
}

/// Collapse a tool's stderr to one line for error messages.
fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
