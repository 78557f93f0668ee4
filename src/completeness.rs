//! Translation completeness scoring.
//!
//! The score of a locale is the share of its strings that carry a non-empty
//! translation. The reference locale is complete by definition.

use std::{fmt, path::Path};

use crate::{
    language::LocaleStrings,
    xliff::{XliffDocument, XliffError, same_locale},
};

/// File name of the per-locale completeness table read by the client.
pub const COMPLETENESS_FILE_NAME: &str = "translations.completeness";

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCompleteness {
    pub locale: String,
    /// Always within `0.0..=1.0`.
    pub ratio: f64,
}

impl LocaleCompleteness {
    pub fn new(locale: impl Into<String>, ratio: f64) -> Self {
        Self {
            locale: locale.into(),
            ratio: ratio.clamp(0.0, 1.0),
        }
    }

    pub fn meets(&self, threshold: f64) -> bool {
        self.ratio >= threshold
    }
}

impl fmt::Display for LocaleCompleteness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.locale, self.ratio)
    }
}

/// Score `document` for `locale`.
pub fn score(document: &XliffDocument, locale: &str, reference_locale: &str) -> LocaleCompleteness {
    if same_locale(locale, reference_locale) {
        return LocaleCompleteness::new(locale, 1.0);
    }
    let strings = LocaleStrings::from_document(document, locale);
    LocaleCompleteness::new(locale, strings.completeness())
}

/// Read and score an XLIFF file.
pub fn score_file(
    path: &Path,
    locale: &str,
    reference_locale: &str,
) -> Result<LocaleCompleteness, XliffError> {
    let document = XliffDocument::from_path(path)?;
    Ok(score(&document, locale, reference_locale))
}

/// Render a completeness table, one `locale:ratio` line per entry.
pub fn render_completeness(entries: &[LocaleCompleteness]) -> String {
    entries.iter().map(|e| format!("{}\n", e)).collect()
}

/// Parse a completeness table.
///
/// Lines without a `:` or with an unparsable ratio are skipped.
pub fn parse_completeness(content: &str) -> Vec<LocaleCompleteness> {
    content
        .lines()
        .filter_map(|line| {
            let (locale, ratio) = line.split_once(':')?;
            let ratio: f64 = ratio.trim().parse().ok()?;
            Some(LocaleCompleteness::new(locale.trim(), ratio))
        })
        .collect()
}
