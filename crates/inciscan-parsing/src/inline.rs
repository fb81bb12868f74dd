use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::normalize::normalize_ingredients;

/// Label patterns introducing an inline ingredient statement, in priority
/// order. `(?is)` so the capture window runs across newlines; the capture
/// group is everything after the colon/hyphen separator.
static LABEL_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)\bingredients?\b\s*[:\-]\s*(.+)",
        r"(?is)\bingredients/ingr[ée]dients\b\s*[:\-]\s*(.+)",
        r"(?is)\bingredientes\b\s*[:\-]\s*(.+)",
        r"(?is)\bingredientes/ingredients\b\s*[:\-]\s*(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Stop markers bounding the candidate window: regulatory boilerplate and
/// multilingual usage-instruction headers that reliably follow an ingredient
/// statement on real labels.
static STOP_MARKER_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\nmanufactured by",
        r"(?i)\nmade in",
        r"(?i)\nwarning",
        r"(?i)\nwww\.",
        r"(?i)\nkeep out of reach",
        r"(?i)\nuso t[oó]pico",
        r"(?i)\nmodo de empleo",
        r"(?i)\nmode d'emploi",
        r"(?i)\nkey ingredients",
        r"(?i)\ningredientes principales",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extract an ingredient list from running text like
/// `"Ingredients: Aqua, Glycerin, ..."`.
pub fn extract_inline(text: &str) -> Option<String> {
    extract_inline_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_inline`].
///
/// Labels are tried in fixed priority order and the first one whose window
/// normalizes to a non-empty string wins. Within a window, the *leftmost*
/// stop-marker occurrence truncates it: position wins over marker order,
/// unlike the row-truncation rules in [`crate::table`].
pub(crate) fn extract_inline_with_config(text: &str, config: &ParsingConfig) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let labels = config.inline_labels.resolve(&LABEL_RES);
    let stops = config.stop_markers.resolve(&STOP_MARKER_RES);

    for label in &labels {
        let Some(caps) = label.captures(text) else {
            continue;
        };
        let Some(window) = caps.get(1) else {
            continue;
        };
        let window = window.as_str();

        let cut = stops
            .iter()
            .filter_map(|marker| marker.find(window))
            .map(|m| m.start())
            .min()
            .unwrap_or(window.len());

        let ingredients = normalize_ingredients(&window[..cut]);
        if !ingredients.is_empty() {
            return Some(ingredients);
        }
    }

    None
}
