use std::io::Write;

use inciscan_core::{DocumentReport, ExtractionOutcome};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print a per-document progress line before processing starts.
pub fn print_progress(
    w: &mut dyn Write,
    index: usize,
    total: usize,
    file_name: &str,
) -> std::io::Result<()> {
    writeln!(w, "[{}/{}] Scanning: {}", index + 1, total, file_name)
}

/// Print the batch report as an aligned table: one row per document with
/// its display name, the heuristic that matched, and the ingredient list or
/// a distinct not-found marker.
pub fn print_report(
    w: &mut dyn Write,
    reports: &[DocumentReport],
    color: ColorMode,
) -> std::io::Result<()> {
    let name_width = reports
        .iter()
        .map(|r| r.file_name.len())
        .max()
        .unwrap_or(0)
        .max("FILE".len());

    let header = format!("{:<name_width$}  {:<6}  INGREDIENTS", "FILE", "METHOD");
    if color.enabled() {
        writeln!(w, "{}", header.bold())?;
    } else {
        writeln!(w, "{}", header)?;
    }

    for report in reports {
        match &report.outcome {
            ExtractionOutcome::Found {
                ingredients,
                method,
            } => {
                writeln!(
                    w,
                    "{:<name_width$}  {:<6}  {}",
                    report.file_name,
                    method.to_string(),
                    ingredients,
                )?;
            }
            ExtractionOutcome::NotFound => {
                if color.enabled() {
                    writeln!(
                        w,
                        "{:<name_width$}  {:<6}  {}",
                        report.file_name,
                        "-",
                        "(not found)".red(),
                    )?;
                } else {
                    writeln!(
                        w,
                        "{:<name_width$}  {:<6}  (not found)",
                        report.file_name, "-",
                    )?;
                }
            }
        }
    }

    Ok(())
}

/// Print the found/not-found tally after the report table.
pub fn print_summary(
    w: &mut dyn Write,
    reports: &[DocumentReport],
    color: ColorMode,
) -> std::io::Result<()> {
    let found = reports.iter().filter(|r| r.outcome.is_found()).count();
    let missing = reports.len() - found;

    writeln!(w)?;
    if color.enabled() {
        writeln!(
            w,
            "{} {} of {} documents yielded an ingredient list, {} {}",
            "Summary:".bold(),
            found.green(),
            reports.len(),
            missing.red(),
            "not found",
        )?;
    } else {
        writeln!(
            w,
            "Summary: {} of {} documents yielded an ingredient list, {} not found",
            found,
            reports.len(),
            missing,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inciscan_core::ExtractionMethod;

    fn sample_reports() -> Vec<DocumentReport> {
        vec![
            DocumentReport {
                file_name: "label.pdf".to_string(),
                outcome: ExtractionOutcome::Found {
                    ingredients: "Aqua, Glycerin".to_string(),
                    method: ExtractionMethod::Inline,
                },
            },
            DocumentReport {
                file_name: "formulation-sheet.pdf".to_string(),
                outcome: ExtractionOutcome::NotFound,
            },
        ]
    }

    #[test]
    fn report_table_is_aligned_and_marks_absence() {
        let mut buf = Vec::new();
        print_report(&mut buf, &sample_reports(), ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("FILE"));
        assert!(out.contains("Aqua, Glycerin"));
        assert!(out.contains("(not found)"));
        // The ingredients column starts at the same offset on every line.
        let offsets: Vec<_> = [(0, "INGREDIENTS"), (1, "Aqua"), (2, "(not found)")]
            .iter()
            .map(|(i, word)| out.lines().nth(*i).unwrap().find(word).unwrap())
            .collect();
        assert_eq!(offsets[0], offsets[1]);
        assert_eq!(offsets[1], offsets[2]);
    }

    #[test]
    fn summary_counts_found_and_missing() {
        let mut buf = Vec::new();
        print_summary(&mut buf, &sample_reports(), ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("1 of 2 documents"));
        assert!(out.contains("1 not found"));
    }

    #[test]
    fn progress_line_is_one_based() {
        let mut buf = Vec::new();
        print_progress(&mut buf, 0, 3, "label.pdf").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[1/3] Scanning: label.pdf\n");
    }
}
