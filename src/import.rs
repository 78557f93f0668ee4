//! Locale import: score every locale of an i18n checkout, keep the ones the
//! build policy allows and turn their XLIFF files into `.ts` files.
//!
//! A run is a straight pass `Scan -> Score -> Filter -> Write-Manifest ->
//! Merge-Each`. A missing or broken locale is skipped; a missing or broken
//! reference locale and any unexpected I/O error abort the run.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use crate::{
    completeness::{self, COMPLETENESS_FILE_NAME, LocaleCompleteness},
    qt::{ToolError, Toolchain},
    xliff::{XliffDocument, same_locale},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Scan,
    Score,
    Filter,
    WriteManifest,
    MergeEach,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStage::Scan => write!(f, "scan"),
            ImportStage::Score => write!(f, "score"),
            ImportStage::Filter => write!(f, "filter"),
            ImportStage::WriteManifest => write!(f, "write-manifest"),
            ImportStage::MergeEach => write!(f, "merge"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error during {stage} on {}: {source}", .path.display())]
    Io {
        stage: ImportStage,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Reference locale '{locale}' is unavailable ({}): {reason}", .path.display())]
    ReferenceUnavailable {
        locale: String,
        path: PathBuf,
        reason: String,
    },
    #[error("Merging locale '{locale}' failed: {source}")]
    Merge {
        locale: String,
        #[source]
        source: ToolError,
    },
}

/// Which locales make it into the build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InclusionPolicy {
    /// Only locales at or above the threshold (and the reference locale).
    Production { threshold: f64 },
    /// Every locale that could be read.
    All,
}

impl InclusionPolicy {
    pub fn retains(&self, completeness: &LocaleCompleteness, is_reference: bool) -> bool {
        match self {
            _ if is_reference => true,
            InclusionPolicy::Production { threshold } => completeness.meets(*threshold),
            InclusionPolicy::All => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub i18n_root: PathBuf,
    /// XLIFF file name inside each locale directory.
    pub xliff_file: String,
    pub reference_locale: String,
    pub policy: InclusionPolicy,
    pub output_dir: PathBuf,
    /// `.ts` files are named `<ts_prefix>_<locale>.ts`.
    pub ts_prefix: String,
    /// Manifest file name inside `output_dir`.
    pub manifest_file: String,
    /// Also compile every `.ts` into a `.qm`.
    pub release: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocaleOutcome {
    Retained { ts_file: PathBuf },
    BelowThreshold,
    Unreadable { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleReport {
    pub locale: String,
    pub completeness: Option<f64>,
    pub outcome: LocaleOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub locales: Vec<LocaleReport>,
    pub manifest: PathBuf,
    pub completeness_file: PathBuf,
}

impl ImportReport {
    pub fn retained(&self) -> impl Iterator<Item = &LocaleReport> {
        self.locales
            .iter()
            .filter(|l| matches!(l.outcome, LocaleOutcome::Retained { .. }))
    }
}

/// A locale directory found during the scan.
struct Candidate {
    locale: String,
    xliff: PathBuf,
}

/// A candidate after scoring.
struct Scored {
    candidate: Candidate,
    result: Result<LocaleCompleteness, String>,
}

pub struct Importer<'a, T: Toolchain> {
    options: &'a ImportOptions,
    toolchain: &'a T,
}

impl<'a, T: Toolchain> Importer<'a, T> {
    pub fn new(options: &'a ImportOptions, toolchain: &'a T) -> Self {
        Self { options, toolchain }
    }

    pub fn run(&self) -> Result<ImportReport, ImportError> {
        let candidates = self.scan()?;
        let scored = self.score(candidates);
        let locales = self.filter(scored)?;
        let (manifest, completeness_file) = self.write_manifest(&locales)?;
        self.merge_each(&locales)?;

        Ok(ImportReport {
            locales: locales.into_iter().map(|(report, _)| report).collect(),
            manifest,
            completeness_file,
        })
    }

    fn scan(&self) -> Result<Vec<Candidate>, ImportError> {
        let _span = info_span!("scan").entered();
        let root = &self.options.i18n_root;
        let entries = fs::read_dir(root).map_err(|source| ImportError::Io {
            stage: ImportStage::Scan,
            path: root.clone(),
            source,
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ImportError::Io {
                stage: ImportStage::Scan,
                path: root.clone(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') || !entry.path().is_dir() {
                continue;
            }
            candidates.push(Candidate {
                xliff: entry.path().join(&self.options.xliff_file),
                locale: name,
            });
        }
        candidates.sort_by(|a, b| a.locale.cmp(&b.locale));

        debug!(count = candidates.len(), "Found locale directories");
        Ok(candidates)
    }

    fn score(&self, candidates: Vec<Candidate>) -> Vec<Scored> {
        let _span = info_span!("score").entered();
        candidates
            .into_iter()
            .map(|candidate| {
                let result = if candidate.xliff.is_file() {
                    XliffDocument::from_path(&candidate.xliff)
                        .map(|doc| {
                            completeness::score(
                                &doc,
                                &candidate.locale,
                                &self.options.reference_locale,
                            )
                        })
                        .map_err(|e| e.to_string())
                } else {
                    Err(format!("{} not found", candidate.xliff.display()))
                };
                Scored { candidate, result }
            })
            .collect()
    }

    fn filter(&self, scored: Vec<Scored>) -> Result<Vec<(LocaleReport, PathBuf)>, ImportError> {
        let _span = info_span!("filter").entered();
        let reference = &self.options.reference_locale;

        match scored
            .iter()
            .find(|s| same_locale(&s.candidate.locale, reference))
        {
            None => {
                return Err(ImportError::ReferenceUnavailable {
                    locale: reference.clone(),
                    path: self.options.i18n_root.join(reference),
                    reason: "no locale directory".to_string(),
                });
            }
            Some(Scored {
                candidate,
                result: Err(reason),
            }) => {
                return Err(ImportError::ReferenceUnavailable {
                    locale: reference.clone(),
                    path: candidate.xliff.clone(),
                    reason: reason.clone(),
                });
            }
            Some(_) => {}
        }

        let mut locales = Vec::new();
        for Scored { candidate, result } in scored {
            let report = match result {
                Err(reason) => {
                    warn!(locale = %candidate.locale, %reason, "Skipping locale");
                    LocaleReport {
                        locale: candidate.locale,
                        completeness: None,
                        outcome: LocaleOutcome::Unreadable { reason },
                    }
                }
                Ok(completeness) => {
                    let is_reference = same_locale(&candidate.locale, reference);
                    let outcome = if self.options.policy.retains(&completeness, is_reference) {
                        LocaleOutcome::Retained {
                            ts_file: self.ts_file(&candidate.locale),
                        }
                    } else {
                        info!(
                            locale = %candidate.locale,
                            completeness = completeness.ratio,
                            "Locale excluded: below threshold"
                        );
                        LocaleOutcome::BelowThreshold
                    };
                    LocaleReport {
                        locale: candidate.locale,
                        completeness: Some(completeness.ratio),
                        outcome,
                    }
                }
            };
            locales.push((report, candidate.xliff));
        }
        Ok(locales)
    }

    fn write_manifest(
        &self,
        locales: &[(LocaleReport, PathBuf)],
    ) -> Result<(PathBuf, PathBuf), ImportError> {
        let _span = info_span!("write_manifest").entered();
        let output_dir = &self.options.output_dir;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| ImportError::Io {
                stage: ImportStage::WriteManifest,
                path,
                source,
            }
        };

        fs::create_dir_all(output_dir).map_err(io_err(output_dir))?;

        let retained: Vec<&LocaleReport> = locales
            .iter()
            .map(|(report, _)| report)
            .filter(|r| matches!(r.outcome, LocaleOutcome::Retained { .. }))
            .collect();

        let ts_names: Vec<String> = retained
            .iter()
            .map(|r| self.ts_file_name(&r.locale))
            .collect();
        let manifest = output_dir.join(&self.options.manifest_file);
        fs::write(&manifest, render_manifest(&ts_names)).map_err(io_err(&manifest))?;

        let entries: Vec<LocaleCompleteness> = retained
            .iter()
            .map(|r| LocaleCompleteness::new(r.locale.clone(), r.completeness.unwrap_or(0.0)))
            .collect();
        let completeness_file = output_dir.join(COMPLETENESS_FILE_NAME);
        fs::write(&completeness_file, completeness::render_completeness(&entries))
            .map_err(io_err(&completeness_file))?;

        info!(manifest = %manifest.display(), locales = retained.len(), "Wrote manifest");
        Ok((manifest, completeness_file))
    }

    fn merge_each(&self, locales: &[(LocaleReport, PathBuf)]) -> Result<(), ImportError> {
        let _span = info_span!("merge").entered();
        for (report, xliff) in locales {
            let LocaleOutcome::Retained { ts_file } = &report.outcome else {
                continue;
            };
            let merge_err = |source| ImportError::Merge {
                locale: report.locale.clone(),
                source,
            };

            debug!(locale = %report.locale, ts = %ts_file.display(), "Merging");
            self.toolchain
                .xliff_to_ts(xliff, ts_file, false)
                .map_err(merge_err)?;
            if self.options.release {
                self.toolchain.release(ts_file).map_err(merge_err)?;
            }
        }
        Ok(())
    }

    fn ts_file_name(&self, locale: &str) -> String {
        format!("{}_{}.ts", self.options.ts_prefix, locale)
    }

    fn ts_file(&self, locale: &str) -> PathBuf {
        self.options.output_dir.join(self.ts_file_name(locale))
    }
}

/// Render the qmake `.pri` manifest listing the translation files.
///
/// Paths are relative to the manifest (`$$PWD`).
pub fn render_manifest(ts_files: &[String]) -> String {
    let mut out = String::from("TRANSLATIONS += \\\n");
    for (i, name) in ts_files.iter().enumerate() {
        let continuation = if i + 1 < ts_files.len() { " \\" } else { "" };
        out.push_str(&format!("    $$PWD/{}{}\n", name, continuation));
    }
    out
}
