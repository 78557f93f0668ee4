use std::path::PathBuf;

use crate::{addon::AddonReport, import::ImportReport};

#[derive(Debug)]
pub enum CommandSummary {
    Import(ImportSummary),
    Generate(GenerateSummary),
    Xliff(XliffSummary),
    Addon(AddonReport),
    Schema(SchemaSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ImportSummary {
    pub report: ImportReport,
    /// Threshold applied, `None` for non-production imports.
    pub threshold: Option<f64>,
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub string_count: usize,
    /// Generated files and whether each one was rewritten.
    pub files: Vec<(PathBuf, bool)>,
}

#[derive(Debug)]
pub struct XliffSummary {
    pub source: PathBuf,
    pub locale: String,
    pub completeness: f64,
    /// Text for stdout (empty when written to a file).
    pub output: String,
    /// `(threshold, passed)` when `--check` was given.
    pub check: Option<(f64, bool)>,
}

#[derive(Debug)]
pub struct SchemaSummary {
    /// Schema text for stdout, `None` when written to a file.
    pub schema: Option<String>,
    pub written: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running l10nctl commands
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Failures that did not abort the command, such as a failed threshold check.
    pub error_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            error_count: 0,
        }
    }
}
