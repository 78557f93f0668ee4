use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, info_span, warn};

use super::{
    AddonError,
    extract,
    manifest::{AddonManifest, AddonType},
    ts,
};
use crate::{
    completeness::{self, COMPLETENESS_FILE_NAME, LocaleCompleteness},
    qt::{ToolError, Toolchain},
    strings::{ExtractError, StringTable, manifests::read_json},
    xliff::XliffDocument,
};

/// Per-locale translation file inside `<i18n>/<locale>/addons/<addon id>/`.
const ADDON_XLIFF: &str = "strings.xliff";
/// Scratch directory inside `<dest>/i18n`, removed after a successful run.
const WORK_DIR: &str = ".work";

/// Locale -> fallback locales, most preferred first.
pub type Fallbacks = BTreeMap<String, Vec<String>>;

pub fn load_fallbacks(path: &Path) -> Result<Fallbacks, AddonError> {
    let content = fs::read_to_string(path).map_err(|source| AddonError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AddonError::Fallbacks {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct AddonOptions {
    pub manifest: PathBuf,
    pub dest: PathBuf,
    pub i18n_root: Option<PathBuf>,
    pub reference_locale: String,
    pub fallbacks: Fallbacks,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddonReport {
    pub id: String,
    pub translatable: bool,
    pub strings: usize,
    pub template: Option<PathBuf>,
    pub locales: Vec<LocaleCompleteness>,
    pub completeness_file: Option<PathBuf>,
}

/// Rewrites shared-string translations into the ids the addon uses.
struct SharedStrings<'a> {
    table: &'a StringTable,
    short_version: &'a str,
}

impl SharedStrings<'_> {
    fn transform(&self, input: &Path, output: &Path) -> Result<(), AddonError> {
        let document = XliffDocument::from_path(input)?;
        let filtered = document.filter_units(
            |id| self.table.get(id).and_then(|unit| unit.legacy_id.clone()),
            |text| text.replace("%1", self.short_version),
        );
        write_file(output, &filtered.to_xml())
    }
}

pub struct AddonBuilder<'a, T: Toolchain> {
    options: &'a AddonOptions,
    toolchain: &'a T,
}

impl<'a, T: Toolchain> AddonBuilder<'a, T> {
    pub fn new(options: &'a AddonOptions, toolchain: &'a T) -> Self {
        Self { options, toolchain }
    }

    pub fn run(&self) -> Result<AddonReport, AddonError> {
        let path = &self.options.manifest;
        let manifest: AddonManifest = read_json(path)?;
        let table = extract::extract(&manifest, path)?;

        let mut report = AddonReport {
            id: manifest.id.clone(),
            translatable: manifest.translatable,
            strings: table.len(),
            template: None,
            locales: Vec::new(),
            completeness_file: None,
        };
        if !manifest.translatable {
            info!(addon = %manifest.id, "Addon not translatable");
            return Ok(report);
        }

        let shared = self.shared_strings(&manifest, &table)?;
        let i18n_dir = self.options.dest.join("i18n");
        let work_dir = i18n_dir.join(WORK_DIR);
        create_dir(&i18n_dir)?;

        let template = self.write_template(&manifest, &table, &i18n_dir)?;
        report.template = Some(template);

        if let Some(root) = &self.options.i18n_root {
            for locale in locale_dirs(root)? {
                let _span = info_span!("locale", %locale).entered();
                let Some(xliff) = self.locale_xliff(root, &locale, &manifest, shared.as_ref(), &work_dir)?
                else {
                    debug!("No translation for this addon");
                    continue;
                };

                let ts_file = i18n_dir.join(format!("locale_{}.ts", locale));
                self.build_locale(root, &locale, &xliff, &ts_file, &manifest, shared.as_ref(), &work_dir)?;
                report
                    .locales
                    .push(completeness::score_file(&xliff, &locale, &self.options.reference_locale)?);
            }
        }

        if report.locales.is_empty() {
            report
                .locales
                .push(LocaleCompleteness::new(self.options.reference_locale.clone(), 1.0));
        }
        let completeness_file = i18n_dir.join(COMPLETENESS_FILE_NAME);
        write_file(&completeness_file, &completeness::render_completeness(&report.locales))?;
        report.completeness_file = Some(completeness_file);

        if work_dir.exists() {
            fs::remove_dir_all(&work_dir).map_err(|source| AddonError::Io {
                path: work_dir.clone(),
                source,
            })?;
        }

        info!(addon = %manifest.id, locales = report.locales.len(), "Built addon translations");
        Ok(report)
    }

    fn shared_strings<'t>(
        &self,
        manifest: &'t AddonManifest,
        table: &'t StringTable,
    ) -> Result<Option<SharedStrings<'t>>, AddonError> {
        if manifest.kind != AddonType::Message || !manifest.uses_shared_strings() {
            return Ok(None);
        }
        let short_version = manifest
            .short_version()
            .ok_or_else(|| ExtractError::MissingShortVersion {
                path: self.options.manifest.clone(),
            })?;
        if let Some(unit) = table.iter().find(|unit| unit.legacy_id.is_none()) {
            return Err(ExtractError::MissingLegacyId {
                id: unit.string_id.clone(),
            }
            .into());
        }
        Ok(Some(SharedStrings {
            table,
            short_version,
        }))
    }

    /// Write `<dest>/<id>.ts` and the English and default `.qm` sources.
    fn write_template(
        &self,
        manifest: &AddonManifest,
        table: &StringTable,
        i18n_dir: &Path,
    ) -> Result<PathBuf, AddonError> {
        let reference = &self.options.reference_locale;
        let template = self.options.dest.join(format!("{}.ts", manifest.id));
        write_file(&template, &ts::render_template(table, reference))?;

        for name in [format!("locale_{}.ts", reference), "locale.ts".to_string()] {
            let target = i18n_dir.join(name);
            fs::copy(&template, &target).map_err(|source| AddonError::Io {
                path: target.clone(),
                source,
            })?;
            self.toolchain
                .release(&target)
                .map_err(|source| AddonError::Tool {
                    locale: reference.clone(),
                    source,
                })?;
        }
        Ok(template)
    }

    /// The XLIFF file holding `locale`'s translations of this addon.
    ///
    /// With shared strings it is derived from the locale's shared translation
    /// file; `None` when the locale has nothing for the addon.
    fn locale_xliff(
        &self,
        root: &Path,
        locale: &str,
        manifest: &AddonManifest,
        shared: Option<&SharedStrings<'_>>,
        work_dir: &Path,
    ) -> Result<Option<PathBuf>, AddonError> {
        let addons = root.join(locale).join("addons");
        match shared {
            None => {
                let path = addons.join(&manifest.id).join(ADDON_XLIFF);
                Ok(path.is_file().then_some(path))
            }
            Some(shared) => {
                let input = addons.join(ADDON_XLIFF);
                if !input.is_file() {
                    return Ok(None);
                }
                let output = work_dir.join(locale).join(ADDON_XLIFF);
                shared.transform(&input, &output)?;
                Ok(Some(output))
            }
        }
    }

    /// Produce and compile `ts_file` for `locale`.
    ///
    /// Locales with fallbacks are layered as reference, then fallbacks, then
    /// the locale itself, keeping only translated units of the upper layers.
    #[allow(clippy::too_many_arguments)]
    fn build_locale(
        &self,
        root: &Path,
        locale: &str,
        xliff: &Path,
        ts_file: &Path,
        manifest: &AddonManifest,
        shared: Option<&SharedStrings<'_>>,
        work_dir: &Path,
    ) -> Result<(), AddonError> {
        let Some(fallbacks) = self.options.fallbacks.get(locale) else {
            self.toolchain
                .xliff_to_ts(xliff, ts_file, false)
                .map_err(|source| tool_error(locale, source))?;
            return self
                .toolchain
                .release(ts_file)
                .map_err(|source| tool_error(locale, source));
        };

        let layer_dir = work_dir.join("layers").join(locale);
        create_dir(&layer_dir)?;
        let mut layers = Vec::new();

        let reference = &self.options.reference_locale;
        match self.locale_xliff(root, reference, manifest, shared, work_dir)? {
            Some(reference_xliff) => {
                let ts = layer_dir.join(format!("locale_{}_fallback.ts", reference));
                self.toolchain
                    .xliff_to_ts(&reference_xliff, &ts, false)
                    .map_err(|source| tool_error(locale, source))?;
                layers.push(ts);
            }
            None => warn!("No reference translation to fall back to"),
        }

        for fallback in fallbacks {
            let Some(fallback_xliff) = self.locale_xliff(root, fallback, manifest, shared, work_dir)?
            else {
                debug!(%fallback, "Fallback locale has no translation");
                continue;
            };
            let ts = layer_dir.join(format!("locale_{}.ts", fallback));
            self.toolchain
                .xliff_to_ts(&fallback_xliff, &ts, true)
                .map_err(|source| tool_error(locale, source))?;
            layers.push(ts);
        }

        self.toolchain
            .xliff_to_ts(xliff, ts_file, true)
            .map_err(|source| tool_error(locale, source))?;
        layers.push(ts_file.to_path_buf());
        self.toolchain
            .merge_ts(&layers, ts_file)
            .map_err(|source| tool_error(locale, source))?;
        self.toolchain
            .release(ts_file)
            .map_err(|source| tool_error(locale, source))
    }
}

fn tool_error(locale: &str, source: ToolError) -> AddonError {
    AddonError::Tool {
        locale: locale.to_string(),
        source,
    }
}

/// Visible locale directories under `root`, sorted.
fn locale_dirs(root: &Path) -> Result<Vec<String>, AddonError> {
    let io_err = |source| AddonError::Io {
        path: root.to_path_buf(),
        source,
    };
    let mut locales = Vec::new();
    for entry in fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with('.') && entry.path().is_dir() {
            locales.push(name);
        }
    }
    locales.sort();
    Ok(locales)
}

fn create_dir(path: &Path) -> Result<(), AddonError> {
    fs::create_dir_all(path).map_err(|source| AddonError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), AddonError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(path, content).map_err(|source| AddonError::Io {
        path: path.to_path_buf(),
        source,
    })
}
