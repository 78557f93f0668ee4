use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".l10nrc.json";

/// Minimum completeness a locale needs to ship in a production build.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_i18n_root")]
    pub i18n_root: String,
    #[serde(default = "default_reference_locale")]
    pub reference_locale: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_xliff_file")]
    pub xliff_file: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_ts_prefix")]
    pub ts_prefix: String,
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    #[serde(default = "default_strings_file")]
    pub strings_file: String,
    #[serde(default = "default_guides_dir")]
    pub guides_dir: String,
    #[serde(default = "default_tutorials_dir")]
    pub tutorials_dir: String,
    #[serde(default = "default_generated_dir")]
    pub generated_dir: String,
    #[serde(default)]
    pub qt_paths: Vec<String>,
}

fn default_i18n_root() -> String {
    "./i18n".to_string()
}

fn default_reference_locale() -> String {
    "en".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_xliff_file() -> String {
    "mozillavpn.xliff".to_string()
}

fn default_output_dir() -> String {
    "./translations/generated".to_string()
}

fn default_ts_prefix() -> String {
    "mozillavpn".to_string()
}

fn default_manifest_file() -> String {
    "translations.pri".to_string()
}

fn default_strings_file() -> String {
    "./translations/strings.yaml".to_string()
}

fn default_guides_dir() -> String {
    "./src/ui/guides".to_string()
}

fn default_tutorials_dir() -> String {
    "./src/ui/tutorials".to_string()
}

fn default_generated_dir() -> String {
    "./translations/generated".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            i18n_root: default_i18n_root(),
            reference_locale: default_reference_locale(),
            threshold: default_threshold(),
            xliff_file: default_xliff_file(),
            output_dir: default_output_dir(),
            ts_prefix: default_ts_prefix(),
            manifest_file: default_manifest_file(),
            strings_file: default_strings_file(),
            guides_dir: default_guides_dir(),
            tutorials_dir: default_tutorials_dir(),
            generated_dir: default_generated_dir(),
            qt_paths: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the threshold is not a ratio or a required name is empty.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!(
                "Invalid 'threshold': {} (expected a value between 0.0 and 1.0)",
                self.threshold
            );
        }
        if self.reference_locale.trim().is_empty() {
            bail!("Invalid 'referenceLocale': must not be empty");
        }
        if self.xliff_file.trim().is_empty() {
            bail!("Invalid 'xliffFile': must not be empty");
        }
        if self.ts_prefix.trim().is_empty() {
            bail!("Invalid 'tsPrefix': must not be empty");
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative paths in the config are resolved against.
    pub root: PathBuf,
}

impl ConfigLoadResult {
    /// Resolve a configured path against the project root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                root,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            root: start_dir.to_path_buf(),
        }),
    }
}
