use regex::Regex;

/// Controls how a list of patterns is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Configuration for the ingredient extraction pipeline.
///
/// Pattern tables default to the built-in sets compiled once per process;
/// use [`ParsingConfigBuilder`] to replace or extend them with string
/// patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── inline.rs ──
    /// Label patterns introducing an inline ingredient statement, tried in
    /// order ("ingredients:", "ingredientes:", ...). Each needs one capture
    /// group holding the candidate window.
    pub(crate) inline_labels: ListOverride<Regex>,
    /// Stop markers bounding the inline window (regulatory boilerplate,
    /// usage instructions). Earliest match wins, regardless of which marker.
    pub(crate) stop_markers: ListOverride<Regex>,

    // ── table.rs ──
    /// Table header patterns ("INGREDIENTES/INGREDIENTS (INCI)", ...).
    /// Every matching header contributes rows, not just the first.
    pub(crate) table_headers: ListOverride<Regex>,
    /// Section-end markers bounding a table block ("Total", "ANÁLISIS", ...).
    pub(crate) section_end_markers: ListOverride<Regex>,
    /// Minimum length in chars for a table-row candidate name (default: 3).
    pub(crate) min_candidate_chars: usize,

    // ── recovery.rs ──
    /// Native text shorter than this many chars is treated as an image-only
    /// document and triggers the OCR fallback (default: 40).
    pub(crate) min_native_chars: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            inline_labels: ListOverride::Default,
            stop_markers: ListOverride::Default,
            table_headers: ListOverride::Default,
            section_end_markers: ListOverride::Default,
            min_candidate_chars: 3,
            min_native_chars: 40,
        }
    }
}

impl ParsingConfig {
    pub fn min_candidate_chars(&self) -> usize {
        self.min_candidate_chars
    }

    pub fn min_native_chars(&self) -> usize {
        self.min_native_chars
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in
/// [`build()`](Self::build). Fails fast with `regex::Error` if any pattern
/// is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    inline_labels: ListOverrideBuilder,
    stop_markers: ListOverrideBuilder,
    table_headers: ListOverrideBuilder,
    section_end_markers: ListOverrideBuilder,
    min_candidate_chars: Option<usize>,
    min_native_chars: Option<usize>,
}

/// Helper for building `ListOverride<Regex>` from string patterns.
#[derive(Debug, Clone, Default)]
enum ListOverrideBuilder {
    #[default]
    Default,
    Replace(Vec<String>),
    Extend(Vec<String>),
}

impl ListOverrideBuilder {
    fn replace(&mut self, patterns: Vec<String>) {
        *self = ListOverrideBuilder::Replace(patterns);
    }

    fn add(&mut self, pattern: String) {
        match self {
            ListOverrideBuilder::Extend(v) => v.push(pattern),
            _ => *self = ListOverrideBuilder::Extend(vec![pattern]),
        }
    }

    fn compile(self) -> Result<ListOverride<Regex>, regex::Error> {
        let compile_all = |patterns: Vec<String>| -> Result<Vec<Regex>, regex::Error> {
            patterns.iter().map(|p| Regex::new(p)).collect()
        };
        match self {
            ListOverrideBuilder::Default => Ok(ListOverride::Default),
            ListOverrideBuilder::Replace(patterns) => {
                Ok(ListOverride::Replace(compile_all(patterns)?))
            }
            ListOverrideBuilder::Extend(patterns) => {
                Ok(ListOverride::Extend(compile_all(patterns)?))
            }
        }
    }
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Inline labels ──

    pub fn set_inline_labels(mut self, patterns: Vec<String>) -> Self {
        self.inline_labels.replace(patterns);
        self
    }

    pub fn add_inline_label(mut self, pattern: String) -> Self {
        self.inline_labels.add(pattern);
        self
    }

    // ── Stop markers ──

    pub fn set_stop_markers(mut self, patterns: Vec<String>) -> Self {
        self.stop_markers.replace(patterns);
        self
    }

    pub fn add_stop_marker(mut self, pattern: String) -> Self {
        self.stop_markers.add(pattern);
        self
    }

    // ── Table headers ──

    pub fn set_table_headers(mut self, patterns: Vec<String>) -> Self {
        self.table_headers.replace(patterns);
        self
    }

    pub fn add_table_header(mut self, pattern: String) -> Self {
        self.table_headers.add(pattern);
        self
    }

    // ── Section-end markers ──

    pub fn set_section_end_markers(mut self, patterns: Vec<String>) -> Self {
        self.section_end_markers.replace(patterns);
        self
    }

    pub fn add_section_end_marker(mut self, pattern: String) -> Self {
        self.section_end_markers.add(pattern);
        self
    }

    // ── Scalars ──

    pub fn min_candidate_chars(mut self, n: usize) -> Self {
        self.min_candidate_chars = Some(n);
        self
    }

    pub fn min_native_chars(mut self, n: usize) -> Self {
        self.min_native_chars = Some(n);
        self
    }

    /// Compile all string patterns into regexes and produce a
    /// [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        Ok(ParsingConfig {
            inline_labels: self.inline_labels.compile()?,
            stop_markers: self.stop_markers.compile()?,
            table_headers: self.table_headers.compile()?,
            section_end_markers: self.section_end_markers.compile()?,
            min_candidate_chars: self.min_candidate_chars.unwrap_or(3),
            min_native_chars: self.min_native_chars.unwrap_or(40),
        })
    }
}
