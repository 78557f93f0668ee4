use anyhow::{Context, Result};

use super::super::args::ImportCommand;
use super::{
    CommandResult, CommandSummary, ImportSummary,
    helper::{load_project_config, qt_paths, reference_locale, threshold},
};
use crate::{
    import::{ImportOptions, Importer, InclusionPolicy},
    qt::QtTools,
};

pub fn import(cmd: ImportCommand) -> Result<CommandResult> {
    let loaded = load_project_config()?;
    let config = &loaded.config;

    let threshold = threshold(cmd.threshold, &loaded)?;
    let policy = if cmd.prod {
        InclusionPolicy::Production { threshold }
    } else {
        InclusionPolicy::All
    };

    let options = ImportOptions {
        i18n_root: cmd.i18n.unwrap_or_else(|| loaded.resolve(&config.i18n_root)),
        xliff_file: config.xliff_file.clone(),
        reference_locale: reference_locale(&cmd.common, &loaded),
        policy,
        output_dir: cmd.output.unwrap_or_else(|| loaded.resolve(&config.output_dir)),
        ts_prefix: config.ts_prefix.clone(),
        manifest_file: config.manifest_file.clone(),
        release: cmd.release,
    };

    let toolchain = QtTools::locate(&qt_paths(&cmd.qt_paths, &loaded))?;
    let report = Importer::new(&options, &toolchain)
        .run()
        .with_context(|| format!("Import from {} failed", options.i18n_root.display()))?;

    Ok(CommandResult::new(CommandSummary::Import(ImportSummary {
        report,
        threshold: cmd.prod.then_some(threshold),
    })))
}
