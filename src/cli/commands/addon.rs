use anyhow::{Context, Result, bail};

use super::super::args::AddonCommand;
use super::{
    CommandResult, CommandSummary,
    helper::{load_project_config, qt_paths, reference_locale},
};
use crate::{
    addon::{AddonBuilder, AddonOptions, Fallbacks, load_fallbacks},
    qt::QtTools,
};

pub fn addon(cmd: AddonCommand) -> Result<CommandResult> {
    if !cmd.manifest.is_file() {
        bail!("`{}` is not a file", cmd.manifest.display());
    }
    if !cmd.dest.is_dir() {
        bail!("`{}` is not a directory", cmd.dest.display());
    }

    let loaded = load_project_config()?;
    let fallbacks = match &cmd.fallbacks {
        Some(path) => load_fallbacks(path)?,
        None => Fallbacks::new(),
    };
    let options = AddonOptions {
        reference_locale: reference_locale(&cmd.common, &loaded),
        manifest: cmd.manifest,
        dest: cmd.dest,
        i18n_root: cmd.i18n,
        fallbacks,
    };

    let toolchain = QtTools::locate(&qt_paths(&cmd.qt_paths, &loaded))?;
    let report = AddonBuilder::new(&options, &toolchain)
        .run()
        .with_context(|| format!("Failed to build addon {}", options.manifest.display()))?;

    Ok(CommandResult::new(CommandSummary::Addon(report)))
}
