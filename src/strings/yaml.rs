//! YAML string definitions.
//!
//! ```yaml
//! category:
//!   key: A plain string
//!   other:
//!     value: [First line, Second line]
//!     comment: Shown to translators
//! ```
//!
//! Every entry becomes `<prefix>.<category>.<key>` with the enum id
//! `PascalCase(category_key)`.

use std::{fs, path::Path};

use serde_yaml::{Mapping, Value};

use super::{ExtractError, StringUnit, pascalize};

/// Prefix of the application's string ids.
pub const APP_STRING_PREFIX: &str = "vpn";

pub fn parse_strings_file(path: &Path, prefix: &str) -> Result<Vec<StringUnit>, ExtractError> {
    let content = fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_strings(&content, path, prefix)
}

/// Parse YAML definitions. Duplicate keys are rejected by the YAML parser.
pub fn parse_strings(content: &str, path: &Path, prefix: &str) -> Result<Vec<StringUnit>, ExtractError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let root: Value = serde_yaml::from_str(content).map_err(|source| ExtractError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    let not_a_collection = || ExtractError::NotACollection {
        path: path.to_path_buf(),
    };

    let categories = match root {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(categories) => categories,
        _ => return Err(not_a_collection()),
    };

    let mut units = Vec::new();
    for (category, keys) in categories {
        let category = scalar_key(&category).ok_or_else(not_a_collection)?;
        let Value::Mapping(keys) = keys else {
            return Err(not_a_collection());
        };

        for (key, entry) in keys {
            let key = scalar_key(&key).ok_or_else(not_a_collection)?;
            let string_id = format!("{}.{}.{}", prefix, category, key);

            let (value, comments) = match entry {
                Value::String(text) if !text.is_empty() => (vec![text], Vec::new()),
                Value::Mapping(entry) => parse_entry(&entry, &string_id)?,
                _ => return Err(ExtractError::EmptyValue { id: string_id }),
            };

            units.push(StringUnit {
                enum_id: pascalize(&format!("{}_{}", category, key)),
                string_id,
                value,
                comments,
                legacy_id: None,
            });
        }
    }
    Ok(units)
}

fn parse_entry(entry: &Mapping, id: &str) -> Result<(Vec<String>, Vec<String>), ExtractError> {
    let value = match entry.get("value") {
        None => {
            return Err(ExtractError::MissingValue { id: id.to_string() });
        }
        Some(value) => string_list(value).ok_or_else(|| ExtractError::InvalidValue {
            id: id.to_string(),
        })?,
    };

    let comments = match entry.get("comment") {
        None => Vec::new(),
        Some(comment) => string_list(comment).ok_or_else(|| ExtractError::InvalidComment {
            id: id.to_string(),
        })?,
    };

    if value.is_empty() {
        return Err(ExtractError::EmptyValue { id: id.to_string() });
    }
    Ok((value, comments))
}

/// A string or a list of strings.
fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Sequence(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
