use std::{env, path::PathBuf};

use anyhow::{Context, Result, bail};

use super::super::args::CommonArgs;
use crate::config::{ConfigLoadResult, load_config};

/// Load the configuration found from the current directory upwards.
pub fn load_project_config() -> Result<ConfigLoadResult> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    load_config(&cwd)
}

/// Reference locale from the command line, else from the configuration.
pub fn reference_locale(common: &CommonArgs, loaded: &ConfigLoadResult) -> String {
    common
        .reference_locale
        .clone()
        .unwrap_or_else(|| loaded.config.reference_locale.clone())
}

/// Threshold from the command line, else from the configuration.
pub fn threshold(cli: Option<f64>, loaded: &ConfigLoadResult) -> Result<f64> {
    let threshold = cli.unwrap_or(loaded.config.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        bail!(
            "Invalid threshold: {} (expected a value between 0.0 and 1.0)",
            threshold
        );
    }
    Ok(threshold)
}

/// Qt binary directories from the command line, else from the configuration.
pub fn qt_paths(cli: &[PathBuf], loaded: &ConfigLoadResult) -> Vec<PathBuf> {
    if !cli.is_empty() {
        return cli.to_vec();
    }
    loaded
        .config
        .qt_paths
        .iter()
        .map(|p| loaded.resolve(p))
        .collect()
}
