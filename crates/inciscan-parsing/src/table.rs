use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

/// Table header patterns seen across labels, dossiers and formulation
/// sheets. Every matching header contributes a block; results are merged,
/// not first-match-wins.
static HEADER_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)INGREDIENTES/INGREDIENTS\s*\(INCI\)",
        r"(?i)INGREDIENTE\s+INCI",
        r"(?i)Lista de ingredientes",
        r"(?i)No\.\s*INCI name\s*CAS No\.",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Markers ending a tabular block: totals rows, concentration-range and
/// regulatory sections, the numbered fragrance section of dossiers.
static SECTION_END_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\nTotal\b",
        r"(?i)\nTotal %",
        r"(?i)\nRangos de concentración",
        r"(?i)\nREGULACI[ÓO]N COSMETICA",
        r"(?i)\nAN[ÁA]LISIS",
        r"(?i)\n2\.\s*Fragrance/Perfume",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Leading row index like "1. " or "12- ".
static ROW_INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+[\.\-]?\s+").unwrap());

/// CAS registry number preceded by whitespace: 2-7 digits, 2 digits, 1 digit.
static CAS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\d{2,7}-\d{2}-\d\b").unwrap());

/// Decimal quantity preceded by whitespace (both "0.5" and "0,5").
static QUANTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\d+[.,]\d+").unwrap());

/// "cantidad suficiente para" marker in Spanish formulation tables.
static CSP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\sc\.s\.p\.").unwrap());

/// Lone "% INCI" style column-label line.
static COLUMN_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^%?\s*INCI\b").unwrap());

/// Extract an ingredient list from tabular text under a recognized header.
pub fn extract_table(text: &str) -> Option<String> {
    extract_table_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_table`].
///
/// Candidate names accumulate across all matched headers in header order,
/// are deduplicated by exact match preserving first occurrence, and joined
/// with `", "`.
pub(crate) fn extract_table_with_config(text: &str, config: &ParsingConfig) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let headers = config.table_headers.resolve(&HEADER_RES);
    let ends = config.section_end_markers.resolve(&SECTION_END_RES);

    let mut names: Vec<String> = Vec::new();

    for header in &headers {
        let Some(m) = header.find(text) else {
            continue;
        };
        let block = &text[m.end()..];

        // Leftmost section-end marker bounds the block.
        let cut = ends
            .iter()
            .filter_map(|marker| marker.find(block))
            .map(|m| m.start())
            .min()
            .unwrap_or(block.len());
        let block = &block[..cut];

        for raw_line in block.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            // A wrapped or repeated header row is not an ingredient.
            if header.is_match(line) {
                continue;
            }
            if COLUMN_LABEL_RE.is_match(line) {
                continue;
            }

            let Some(name) = candidate_from_line(line) else {
                continue;
            };
            if name.chars().count() < config.min_candidate_chars {
                continue;
            }
            names.push(name);
        }
    }

    if names.is_empty() {
        return None;
    }

    let mut seen = HashSet::new();
    names.retain(|n| seen.insert(n.clone()));

    Some(names.join(", "))
}

/// Reduce one table row to a candidate ingredient name.
///
/// Strips a leading row index, then truncates at the first of a CAS number,
/// a decimal quantity, or a "c.s.p." marker, tried in that fixed priority
/// order rather than leftmost-first. A row with none of those is kept whole.
fn candidate_from_line(line: &str) -> Option<String> {
    let line = ROW_INDEX_RE.replace(line, "");

    for marker in [&*CAS_RE, &*QUANTITY_RE, &*CSP_RE] {
        if let Some(m) = marker.find(&line) {
            let name = line[..m.start()].trim();
            return (!name.is_empty()).then(|| name.to_string());
        }
    }

    let name = line.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsingConfigBuilder;

    #[test]
    fn test_inci_header_with_total_row() {
        let text = "INGREDIENTES/INGREDIENTS (INCI)\nAqua\nGlycerin\nTotal 100%";
        assert_eq!(extract_table(text).unwrap(), "Aqua, Glycerin");
    }

    #[test]
    fn test_row_truncation_priority_cas_before_quantity() {
        // The CAS rule fires before the decimal-quantity rule even though
        // both would match; the leading index is stripped first.
        let text = "No. INCI name CAS No.\n1. Aqua 7732-18-5 0.5\nTotal";
        assert_eq!(extract_table(text).unwrap(), "Aqua");
    }

    #[test]
    fn test_quantity_truncation_with_comma_decimal() {
        let text = "INGREDIENTE INCI\nSodium Chloride 0,85\nGlycerin 12,5\nTotal %";
        assert_eq!(extract_table(text).unwrap(), "Sodium Chloride, Glycerin");
    }

    #[test]
    fn test_csp_truncation() {
        let text = "Lista de ingredientes\nAqua c.s.p. 100\nParfum 0.3\nTotal";
        assert_eq!(extract_table(text).unwrap(), "Aqua, Parfum");
    }

    #[test]
    fn test_dedup_preserves_first_occurrence() {
        let text = "INGREDIENTE INCI\nAqua 7732-18-5\nGlycerin 56-81-5\nAqua 7732-18-5\nTotal";
        assert_eq!(extract_table(text).unwrap(), "Aqua, Glycerin");
    }

    #[test]
    fn test_column_label_and_header_echo_skipped() {
        let text =
            "INGREDIENTES/INGREDIENTS (INCI)\n% INCI\nINGREDIENTES/INGREDIENTS (INCI)\nAqua\nTotal";
        assert_eq!(extract_table(text).unwrap(), "Aqua");
    }

    #[test]
    fn test_short_candidates_discarded() {
        let text = "INGREDIENTE INCI\nCI 0.1\nAqua 0.2\nTotal";
        // "CI" is two chars after truncation and is dropped.
        assert_eq!(extract_table(text).unwrap(), "Aqua");
    }

    #[test]
    fn test_multiple_headers_merge_in_order() {
        let text = "INGREDIENTE INCI\nAqua 1.0\nTotal\n\nLista de ingredientes\nGlycerin\nParfum\nTotal";
        assert_eq!(extract_table(text).unwrap(), "Aqua, Glycerin, Parfum");
    }

    #[test]
    fn test_leftmost_section_end_wins() {
        let text = "INGREDIENTE INCI\nAqua 1.0\nANÁLISIS\nGlycerin 2.0\nTotal";
        assert_eq!(extract_table(text).unwrap(), "Aqua");
    }

    #[test]
    fn test_no_header_is_absence() {
        assert_eq!(extract_table("Aqua\nGlycerin\nTotal"), None);
        assert_eq!(extract_table(""), None);
    }

    #[test]
    fn test_header_but_no_rows_is_absence() {
        assert_eq!(extract_table("INGREDIENTE INCI\nTotal 100%"), None);
    }

    #[test]
    fn test_row_index_with_hyphen() {
        let text = "Lista de ingredientes\n12- Cetearyl Alcohol 9004-95-9\nTotal";
        assert_eq!(extract_table(text).unwrap(), "Cetearyl Alcohol");
    }

    #[test]
    fn test_custom_min_candidate_chars() {
        let config = ParsingConfigBuilder::new()
            .min_candidate_chars(1)
            .build()
            .unwrap();
        let text = "INGREDIENTE INCI\nCI 0.1\nTotal";
        assert_eq!(extract_table_with_config(text, &config).unwrap(), "CI");
    }

    #[test]
    fn test_custom_section_end_marker() {
        let config = ParsingConfigBuilder::new()
            .add_section_end_marker(r"(?i)\nObservaciones".to_string())
            .build()
            .unwrap();
        let text = "INGREDIENTE INCI\nAqua 1.0\nObservaciones: ninguna\nGlycerin 2.0";
        assert_eq!(extract_table_with_config(text, &config).unwrap(), "Aqua");
    }
}
