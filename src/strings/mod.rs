//! String extraction.
//!
//! Translatable strings come from the YAML definitions and from structured
//! content manifests (guides, tutorials, addons). Every source is validated
//! while it is walked and flattened into a [`StringTable`]; nothing is written
//! until the whole table has been built.

pub mod codegen;
pub mod content;
mod error;
pub mod manifests;
pub mod yaml;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

pub use error::ExtractError;

/// Pattern manifest and block ids must match.
static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+").expect("id regex is valid"));

pub fn is_valid_id(id: &str) -> bool {
    ID_RE.is_match(id)
}

/// A translatable string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringUnit {
    /// Identifier used in the generated enum, e.g. `GuideIntroTitle`.
    pub enum_id: String,
    /// Dotted translation id, e.g. `guide.intro.title`.
    pub string_id: String,
    /// Line segments of the source text.
    pub value: Vec<String>,
    pub comments: Vec<String>,
    /// Id older clients expect when `string_id` is a shared string id.
    pub legacy_id: Option<String>,
}

impl StringUnit {
    /// A single-line unit whose enum id is derived from the string id.
    pub fn new(string_id: impl Into<String>, value: impl Into<String>, comment: Option<&str>) -> Self {
        let string_id = string_id.into();
        Self {
            enum_id: pascalize(&string_id.replace('.', "_")),
            string_id,
            value: vec![value.into()],
            comments: comment
                .filter(|c| !c.is_empty())
                .map(|c| vec![c.to_string()])
                .unwrap_or_default(),
            legacy_id: None,
        }
    }

    /// Source text with segments joined by newlines.
    pub fn text(&self) -> String {
        self.value.join("\n")
    }

    /// Id the client looks the string up with.
    pub fn client_id(&self) -> &str {
        self.legacy_id.as_deref().unwrap_or(&self.string_id)
    }
}

/// Ordered collection of extracted strings with unique enum ids.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    units: Vec<StringUnit>,
    by_enum: HashMap<String, usize>,
    by_string: HashMap<String, usize>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit. A second unit with the same enum id is an error.
    pub fn insert(&mut self, unit: StringUnit, origin: &Path) -> Result<(), ExtractError> {
        if self.by_enum.contains_key(&unit.enum_id) {
            return Err(ExtractError::Duplicate {
                path: origin.to_path_buf(),
                id: unit.enum_id,
            });
        }
        let index = self.units.len();
        self.by_enum.insert(unit.enum_id.clone(), index);
        self.by_string.insert(unit.string_id.clone(), index);
        self.units.push(unit);
        Ok(())
    }

    pub fn extend(
        &mut self,
        units: impl IntoIterator<Item = StringUnit>,
        origin: &Path,
    ) -> Result<(), ExtractError> {
        for unit in units {
            self.insert(unit, origin)?;
        }
        Ok(())
    }

    pub fn get(&self, string_id: &str) -> Option<&StringUnit> {
        self.by_string.get(string_id).map(|&i| &self.units[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &StringUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// `guide_intro_title` -> `GuideIntroTitle`.
pub fn pascalize(text: &str) -> String {
    text.split('_')
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let mut chars = chunk.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Where the application's strings are read from.
#[derive(Debug, Clone)]
pub struct StringSources {
    pub strings_file: PathBuf,
    pub guides_dir: Option<PathBuf>,
    pub tutorials_dir: Option<PathBuf>,
}

/// Build the application string table from all sources.
///
/// Missing guide or tutorial directories are treated as empty.
pub fn collect(sources: &StringSources) -> Result<StringTable, ExtractError> {
    let mut table = StringTable::new();

    let units = yaml::parse_strings_file(&sources.strings_file, yaml::APP_STRING_PREFIX)?;
    table.extend(units, &sources.strings_file)?;

    if let Some(dir) = &sources.guides_dir {
        manifests::collect_guides(dir, &mut table)?;
    }
    if let Some(dir) = &sources.tutorials_dir {
        manifests::collect_tutorials(dir, &mut table)?;
    }
    Ok(table)
}
