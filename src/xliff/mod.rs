//! XLIFF 1.2 translation documents.
//!
//! Only the subset the localization pipeline needs is modeled: `<file>` groups
//! with their languages, and `<trans-unit>` elements with source, target and
//! notes. Documents are read once and never mutated in place; filtering
//! produces a new document.

mod parse;
mod write;

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub use parse::parse_str;
pub use write::escape_xml;

pub const XLIFF_NS: &str = "urn:oasis:names:tc:xliff:document:1.2";

#[derive(Debug, Error)]
pub enum XliffError {
    #[error("Failed to read XLIFF file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse XLIFF file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
    #[error("Missing `id` attribute on a trans-unit in {}", .path.display())]
    MissingUnitId { path: PathBuf },
}

/// A single `<trans-unit>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransUnit {
    pub id: String,
    pub source: String,
    /// `None` when the unit has no `<target>` element at all.
    pub target: Option<String>,
    /// `<note>` (and Qt's `<extracomment>`) texts.
    pub notes: Vec<String>,
}

impl TransUnit {
    pub fn is_translated(&self) -> bool {
        self.target.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// A `<file>` group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XliffFile {
    pub original: String,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub units: Vec<TransUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XliffDocument {
    pub files: Vec<XliffFile>,
}

impl XliffDocument {
    pub fn from_path(path: &Path) -> Result<Self, XliffError> {
        let content = std::fs::read_to_string(path).map_err(|source| XliffError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_str(&content, path)
    }

    pub fn units(&self) -> impl Iterator<Item = &TransUnit> {
        self.files.iter().flat_map(|f| f.units.iter())
    }

    /// Guess the locale the document translates into.
    ///
    /// Picks the most common `target-language` among the `<file>` groups; the
    /// first one seen wins a tie.
    pub fn guess_locale(&self) -> Option<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for lang in self.files.iter().filter_map(|f| f.target_language.as_deref()) {
            let count = counts.entry(lang).or_insert(0);
            if *count == 0 {
                order.push(lang);
            }
            *count += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for lang in order {
            let count = counts[lang];
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((lang, count));
            }
        }
        best.map(|(lang, _)| lang.to_string())
    }

    /// Keep only the units `keep` returns a new id for, renamed to that id.
    ///
    /// `rewrite` is applied to the source and target texts of every kept unit.
    pub fn filter_units<K, R>(&self, mut keep: K, rewrite: R) -> XliffDocument
    where
        K: FnMut(&str) -> Option<String>,
        R: Fn(&str) -> String,
    {
        let files = self
            .files
            .iter()
            .map(|file| XliffFile {
                original: file.original.clone(),
                source_language: file.source_language.clone(),
                target_language: file.target_language.clone(),
                units: file
                    .units
                    .iter()
                    .filter_map(|unit| {
                        keep(&unit.id).map(|id| TransUnit {
                            id,
                            source: rewrite(&unit.source),
                            target: unit.target.as_deref().map(&rewrite),
                            notes: unit.notes.clone(),
                        })
                    })
                    .collect(),
            })
            .collect();
        XliffDocument { files }
    }
}

/// Normalize a locale code for comparison with XLIFF language attributes.
///
/// Locale directories use `pt_BR` while XLIFF uses `pt-BR`.
pub fn normalize_locale(code: &str) -> String {
    code.replace('_', "-")
}

pub fn same_locale(a: &str, b: &str) -> bool {
    normalize_locale(a) == normalize_locale(b)
}
