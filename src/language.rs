//! Per-locale string lookup built from an XLIFF document.

use std::{collections::HashMap, fmt, sync::LazyLock};

use clap::ValueEnum;
use regex::Regex;

use crate::xliff::{XliffDocument, normalize_locale};

/// Autoconf `@ID@`, CMake `${ID}` and Qt `qtTrId("ID")` placeholders.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@(?P<ac>[\w.]+)@|\$\{(?P<cm>[\w.]+)\}|qtTrId\(\s*"(?P<qt>[\w.]+)"\s*\)"#)
        .expect("placeholder regex is valid")
});

/// Output format for rendered strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    /// ID and string separated by a colon
    #[default]
    Text,
    /// Environment variable format
    Env,
    /// macOS Localizable.strings format
    Macos,
    /// Just the translation string
    Raw,
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderFormat::Text => write!(f, "text"),
            RenderFormat::Env => write!(f, "env"),
            RenderFormat::Macos => write!(f, "macos"),
            RenderFormat::Raw => write!(f, "raw"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LocaleEntry {
    id: String,
    origin: String,
    source: String,
    target: String,
}

/// The strings of one locale, in document order.
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    locale: String,
    entries: Vec<LocaleEntry>,
    index: HashMap<String, usize>,
}

impl LocaleStrings {
    /// Collect the units of `document` that belong to `locale`.
    ///
    /// A `<file>` whose `target-language` is the locale contributes its
    /// targets. A `<file>` whose `source-language` is the locale contributes
    /// its sources as targets. Later units replace earlier ones with the same id.
    pub fn from_document(document: &XliffDocument, locale: &str) -> Self {
        let mut strings = LocaleStrings {
            locale: normalize_locale(locale),
            ..Default::default()
        };

        for file in &document.files {
            let use_source = if file.target_language.as_deref() == Some(strings.locale.as_str()) {
                false
            } else if file.source_language.as_deref() == Some(strings.locale.as_str()) {
                true
            } else {
                continue;
            };

            for unit in &file.units {
                let target = if use_source {
                    unit.source.clone()
                } else {
                    unit.target.clone().unwrap_or_default()
                };
                strings.insert(LocaleEntry {
                    id: unit.id.clone(),
                    origin: file.original.clone(),
                    source: unit.source.clone(),
                    target,
                });
            }
        }

        strings
    }

    fn insert(&mut self, entry: LocaleEntry) {
        match self.index.get(&entry.id) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Known ids in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    /// The `<file original>` a string came from.
    pub fn origin(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&i| self.entries[i].origin.as_str())
    }

    /// Ratio of strings with a non-empty translation, `0.0` when there are none.
    pub fn completeness(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let translated = self.entries.iter().filter(|e| !e.target.is_empty()).count();
        translated as f64 / self.entries.len() as f64
    }

    /// Best printable string for `id`: the target, else the source, else the id.
    pub fn translate<'a>(&'a self, id: &'a str) -> &'a str {
        let Some(&i) = self.index.get(id) else {
            return id;
        };
        let entry = &self.entries[i];
        if !entry.target.is_empty() {
            &entry.target
        } else if !entry.source.is_empty() {
            &entry.source
        } else {
            id
        }
    }

    /// Render `id` in `format`, dropping `strip` leading id segments.
    ///
    /// Returns `None` for unknown ids.
    pub fn render(&self, id: &str, format: RenderFormat, strip: usize) -> Option<String> {
        if !self.contains(id) {
            return None;
        }
        let value = self.translate(id);
        let name = strip_segments(id, strip);

        Some(match format {
            RenderFormat::Env => format!(
                "{}=\"{}\"",
                name.to_uppercase().replace('.', "_"),
                value.replace('"', "\\\"")
            ),
            RenderFormat::Macos => format!(
                "'{}' = '{}';",
                name.to_lowercase().replace('.', "_"),
                value.replace('\'', "\\'")
            ),
            RenderFormat::Text => format!("{}: {}", name, value),
            RenderFormat::Raw => value.to_string(),
        })
    }

    /// Ids selected by `query`: every id for `None`, else the exact id or
    /// every id under the `query.` prefix.
    pub fn select<'a>(&'a self, query: Option<&'a str>) -> Vec<&'a str> {
        match query {
            None => self.keys().collect(),
            Some(q) if self.contains(q) => vec![q],
            Some(q) => {
                let prefix = format!("{}.", q);
                self.keys().filter(|id| id.starts_with(&prefix)).collect()
            }
        }
    }

    /// Substitute placeholders in `text` with their translations.
    ///
    /// Ids are looked up as written, then by their environment variable form
    /// (`VPN_MAIN_TITLE` matches `vpn.main.title`). Unknown placeholders are
    /// left untouched.
    pub fn transform(&self, text: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let id = ["ac", "cm", "qt"]
                    .iter()
                    .find_map(|name| caps.name(name))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match self.resolve(id) {
                    Some(found) => self.translate(found).to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn resolve<'a>(&'a self, id: &'a str) -> Option<&'a str> {
        if self.contains(id) {
            return Some(id);
        }
        let wanted = id.to_uppercase();
        self.keys()
            .find(|key| key.to_uppercase().replace('.', "_") == wanted)
    }
}

fn strip_segments(id: &str, strip: usize) -> &str {
    let mut rest = id;
    for _ in 0..strip {
        match rest.find('.') {
            Some(i) => rest = &rest[i + 1..],
            None => break,
        }
    }
    rest
}
