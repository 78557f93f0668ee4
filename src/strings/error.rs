use std::{io, path::PathBuf};

use thiserror::Error;

/// Structural problems in string sources. All of them are fatal.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse YAML file {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{} does not match the manifest schema: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("The YAML file {} must contain collections only", .path.display())]
    NotACollection { path: PathBuf },
    #[error("Each key must be a string or a list with 1 or more items. Fix string ID `{id}`")]
    EmptyValue { id: String },
    #[error("The key {id} must contain a `value` string or an array of strings")]
    MissingValue { id: String },
    #[error("The value of {id} must be a string or an array of strings")]
    InvalidValue { id: String },
    #[error("The comment of {id} must be a string or an array of strings")]
    InvalidComment { id: String },
    #[error("{}: invalid id `{id}`", .path.display())]
    InvalidId { path: PathBuf, id: String },
    #[error("{}: block `{block}` does not have a type", .path.display())]
    MissingBlockType { path: PathBuf, block: String },
    #[error("Duplicate id {id} when parsing {}", .path.display())]
    Duplicate { path: PathBuf, id: String },
    #[error("{}: manifest of type `{kind}` has no `{kind}` section", .path.display())]
    MissingSection { path: PathBuf, kind: String },
    #[error("{}: shortVersion string required when usesSharedStrings is true", .path.display())]
    MissingShortVersion { path: PathBuf },
    #[error("{}: no shared string found for `{id}`", .path.display())]
    UnknownSharedString { path: PathBuf, id: String },
    #[error("No legacy id recorded for shared string `{id}`")]
    MissingLegacyId { id: String },
}
