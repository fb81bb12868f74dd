//! End-to-end pipeline tests with mock recovery backends.

use std::path::{Path, PathBuf};

use inciscan_parsing::{
    BackendError, ExtractionMethod, ExtractionOutcome, OcrBackend, ParsingError, PdfBackend,
    extract_ingredients,
};
use inciscan_core::PageImage;

struct NativePdf(&'static str);

impl PdfBackend for NativePdf {
    fn decode_native(&self, _path: &Path) -> Result<String, BackendError> {
        Ok(self.0.to_string())
    }
}

struct UnreadablePdf;

impl PdfBackend for UnreadablePdf {
    fn decode_native(&self, _path: &Path) -> Result<String, BackendError> {
        Err(BackendError::Decode("not a PDF".into()))
    }
}

struct ScanOcr(Vec<&'static str>);

impl OcrBackend for ScanOcr {
    fn rasterize(&self, _path: &Path) -> Result<Vec<PageImage>, BackendError> {
        Ok((1..=self.0.len() as u32)
            .map(|page| PageImage { page, png: vec![] })
            .collect())
    }

    fn recognize(&self, image: &PageImage) -> Result<String, BackendError> {
        Ok(self.0[image.page as usize - 1].to_string())
    }
}

struct BrokenOcr;

impl OcrBackend for BrokenOcr {
    fn rasterize(&self, _path: &Path) -> Result<Vec<PageImage>, BackendError> {
        Err(BackendError::Rasterize("pdftoppm exited with status 1".into()))
    }

    fn recognize(&self, _image: &PageImage) -> Result<String, BackendError> {
        unreachable!("rasterize fails first")
    }
}

fn doc() -> PathBuf {
    PathBuf::from("dossier.pdf")
}

#[test]
fn native_document_with_inline_statement() {
    let pdf = NativePdf(
        "Purifying scrub for hair and scalp. Apply to wet hair.\n\
         Ingredients: Aqua, Sodium Laureth Sulfate, Glycerin, Parfum.\n\
         Warning: external use only.\n\
         www.example.com",
    );
    let outcome = extract_ingredients(&doc(), &pdf, &ScanOcr(vec![])).unwrap();
    assert_eq!(
        outcome,
        ExtractionOutcome::Found {
            ingredients: "Aqua, Sodium Laureth Sulfate, Glycerin, Parfum".to_string(),
            method: ExtractionMethod::Inline,
        }
    );
}

#[test]
fn scanned_document_falls_back_to_ocr_table() {
    // Native layer is essentially empty, so the OCRed pages are parsed.
    let pdf = NativePdf(" \n ");
    let ocr = ScanOcr(vec![
        "FORMULA — COLOR STAY CONDITIONER",
        "No. INCI name CAS No.\n1. Aqua 7732-18-5 60.0\n2. Cetearyl Alcohol 9004-95-9 4.5\nTotal 100",
    ]);
    let outcome = extract_ingredients(&doc(), &pdf, &ocr).unwrap();
    assert_eq!(
        outcome,
        ExtractionOutcome::Found {
            ingredients: "Aqua, Cetearyl Alcohol".to_string(),
            method: ExtractionMethod::Table,
        }
    );
}

#[test]
fn ocr_that_recovers_nothing_is_not_found() {
    let pdf = NativePdf("");
    let ocr = ScanOcr(vec!["", ""]);
    let outcome = extract_ingredients(&doc(), &pdf, &ocr).unwrap();
    assert_eq!(outcome, ExtractionOutcome::NotFound);
}

#[test]
fn text_without_ingredient_section_is_not_found() {
    let pdf = NativePdf(
        "Certificate of analysis for batch 2024-117.\n\
         Appearance: conforms. Viscosity: 4500 cps. pH: 5.4.\n\
         Microbiological testing: passed.",
    );
    let outcome = extract_ingredients(&doc(), &pdf, &ScanOcr(vec![])).unwrap();
    assert_eq!(outcome, ExtractionOutcome::NotFound);
}

#[test]
fn unreadable_document_is_an_error_not_absence() {
    let err = extract_ingredients(&doc(), &UnreadablePdf, &ScanOcr(vec![])).unwrap_err();
    let ParsingError::Backend(backend) = err;
    assert!(matches!(backend, BackendError::Decode(_)));
}

#[test]
fn ocr_failure_on_scanned_document_is_an_error() {
    let pdf = NativePdf("short");
    let err = extract_ingredients(&doc(), &pdf, &BrokenOcr).unwrap_err();
    let ParsingError::Backend(backend) = err;
    assert!(matches!(backend, BackendError::Rasterize(_)));
}
