use anyhow::{Context, Result};
use tracing::info;

use super::super::args::GenerateCommand;
use super::{CommandResult, CommandSummary, GenerateSummary, helper::load_project_config};
use crate::strings::{
    self, StringSources,
    codegen::{self, HEADER_FILE_NAME, TABLE_FILE_NAME},
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let loaded = load_project_config()?;
    let config = &loaded.config;

    let sources = StringSources {
        strings_file: cmd
            .strings
            .unwrap_or_else(|| loaded.resolve(&config.strings_file)),
        guides_dir: Some(cmd.guides.unwrap_or_else(|| loaded.resolve(&config.guides_dir))),
        tutorials_dir: Some(
            cmd.tutorials
                .unwrap_or_else(|| loaded.resolve(&config.tutorials_dir)),
        ),
    };
    let output_dir = cmd
        .output
        .unwrap_or_else(|| loaded.resolve(&config.generated_dir));

    // Every source is validated before anything is written.
    let table = strings::collect(&sources)?;
    info!(strings = table.len(), "Collected strings");

    let outputs = [
        (HEADER_FILE_NAME, codegen::render_header(&table)),
        (TABLE_FILE_NAME, codegen::render_table(&table)),
    ];
    let mut files = Vec::new();
    for (name, content) in outputs {
        let path = output_dir.join(name);
        let written = codegen::write_if_changed(&path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        files.push((path, written));
    }

    Ok(CommandResult::new(CommandSummary::Generate(GenerateSummary {
        string_count: table.len(),
        files,
    })))
}
