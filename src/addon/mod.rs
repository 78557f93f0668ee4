//! Addon localization.
//!
//! An addon ships its own strings: the manifest is validated and flattened
//! into a [`StringTable`](crate::strings::StringTable), an English template
//! is written, and every locale of the i18n checkout that has a translation
//! for the addon gets its own `.ts`/`.qm` pair and completeness entry.

mod build;
pub mod extract;
pub mod manifest;
pub mod ts;

use std::{io, path::PathBuf};

use thiserror::Error;

pub use build::{AddonBuilder, AddonOptions, AddonReport, Fallbacks, load_fallbacks};
pub use manifest::{AddonManifest, AddonType};

use crate::{qt::ToolError, strings::ExtractError, xliff::XliffError};

#[derive(Debug, Error)]
pub enum AddonError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Xliff(#[from] XliffError),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid fallback file {}: {source}", .path.display())]
    Fallbacks {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Building locale '{locale}' failed: {source}")]
    Tool {
        locale: String,
        #[source]
        source: ToolError,
    },
}
