use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

mod output;

use inciscan_core::{DocumentReport, RecoverySource};
use inciscan_parsing::{IngredientExtractor, ParsingConfigBuilder};
use inciscan_recover::{PdfExtractBackend, PopplerTesseractOcr};
use output::ColorMode;

/// Ingredient list extractor - pull INCI ingredient lists out of product PDFs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan one or more PDFs and print a tabular ingredient report
    Scan {
        /// Paths to the PDF documents to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Path to output report file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Native text shorter than this triggers the OCR fallback
        #[arg(long, default_value_t = 40)]
        min_native_chars: usize,

        #[command(flatten)]
        tools: ToolArgs,
    },

    /// Print the recovered text of a single PDF (debug aid)
    Text {
        /// Path to the PDF document
        path: PathBuf,

        /// Native text shorter than this triggers the OCR fallback
        #[arg(long, default_value_t = 40)]
        min_native_chars: usize,

        #[command(flatten)]
        tools: ToolArgs,
    },
}

/// External OCR tool locations and settings.
///
/// Resolution order: CLI flag > environment variable > PATH-resolved name.
#[derive(Args, Debug)]
struct ToolArgs {
    /// Location of poppler's pdftoppm (env: PDFTOPPM_PATH)
    #[arg(long)]
    pdftoppm: Option<PathBuf>,

    /// Location of the tesseract binary (env: TESSERACT_PATH)
    #[arg(long)]
    tesseract: Option<PathBuf>,

    /// Tesseract language spec, e.g. "eng+spa+fra" (env: OCR_LANGS)
    #[arg(long)]
    ocr_langs: Option<String>,

    /// Rasterization resolution in DPI
    #[arg(long, default_value_t = 300)]
    dpi: u32,
}

impl ToolArgs {
    fn build_ocr(&self) -> PopplerTesseractOcr {
        let pdftoppm = self
            .pdftoppm
            .clone()
            .or_else(|| std::env::var("PDFTOPPM_PATH").ok().map(PathBuf::from));
        let tesseract = self
            .tesseract
            .clone()
            .or_else(|| std::env::var("TESSERACT_PATH").ok().map(PathBuf::from));
        let languages = self
            .ocr_langs
            .clone()
            .or_else(|| std::env::var("OCR_LANGS").ok());

        let mut ocr = PopplerTesseractOcr::default().with_dpi(self.dpi);
        if let Some(path) = pdftoppm {
            ocr = ocr.with_pdftoppm(path);
        }
        if let Some(path) = tesseract {
            ocr = ocr.with_tesseract(path);
        }
        if let Some(langs) = languages {
            ocr = ocr.with_languages(langs);
        }
        ocr
    }
}

fn build_extractor(min_native_chars: usize) -> anyhow::Result<IngredientExtractor> {
    let config = ParsingConfigBuilder::new()
        .min_native_chars(min_native_chars)
        .build()
        .context("invalid parsing configuration")?;
    Ok(IngredientExtractor::with_config(config))
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            paths,
            no_color,
            output,
            min_native_chars,
            tools,
        } => scan(paths, no_color, output, min_native_chars, &tools),
        Command::Text {
            path,
            min_native_chars,
            tools,
        } => dump_text(path, min_native_chars, &tools),
    }
}

fn scan(
    paths: Vec<PathBuf>,
    no_color: bool,
    output: Option<PathBuf>,
    min_native_chars: usize,
    tools: &ToolArgs,
) -> anyhow::Result<()> {
    for path in &paths {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
    }

    let use_color = !no_color && output.is_none();
    let color = ColorMode(use_color);

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    // Progress goes to stderr when the report is redirected to a file.
    let mut progress: Box<dyn Write> = if output.is_some() {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };

    let extractor = build_extractor(min_native_chars)?;
    let pdf = PdfExtractBackend::new();
    let ocr = tools.build_ocr();

    // Documents are processed strictly one after another; a fatal
    // per-document error aborts the whole batch.
    let total = paths.len();
    let mut reports = Vec::with_capacity(total);
    for (index, path) in paths.iter().enumerate() {
        let name = display_name(path);
        output::print_progress(&mut *progress, index, total, &name)?;
        progress.flush()?;

        let outcome = extractor
            .extract_from_pdf(path, &pdf, &ocr)
            .with_context(|| format!("failed to process {}", path.display()))?;

        reports.push(DocumentReport {
            file_name: name,
            outcome,
        });
    }

    writeln!(writer)?;
    output::print_report(&mut writer, &reports, color)?;
    output::print_summary(&mut writer, &reports, color)?;

    Ok(())
}

fn dump_text(path: PathBuf, min_native_chars: usize, tools: &ToolArgs) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let extractor = build_extractor(min_native_chars)?;
    let pdf = PdfExtractBackend::new();
    let ocr = tools.build_ocr();

    let recovered = extractor
        .recover_text(&path, &pdf, &ocr)
        .with_context(|| format!("failed to recover text from {}", path.display()))?;

    let source = match recovered.source {
        RecoverySource::Native => "native text layer",
        RecoverySource::Ocr => "OCR",
    };
    eprintln!(
        "# {} ({} chars via {})",
        display_name(&path),
        recovered.text.chars().count(),
        source,
    );
    println!("{}", recovered.text);

    Ok(())
}
