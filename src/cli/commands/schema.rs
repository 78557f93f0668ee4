use std::fs;

use anyhow::{Context, Result};

use super::super::args::SchemaCommand;
use super::{CommandResult, CommandSummary, SchemaSummary};
use crate::addon::AddonManifest;

pub fn schema(cmd: SchemaCommand) -> Result<CommandResult> {
    let schema = schemars::schema_for!(AddonManifest);
    let mut json =
        serde_json::to_string_pretty(&schema).context("Failed to serialize the manifest schema")?;
    json.push('\n');

    let summary = match cmd.output {
        Some(path) => {
            fs::write(&path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
            SchemaSummary {
                schema: None,
                written: Some(path),
            }
        }
        None => SchemaSummary {
            schema: Some(json),
            written: None,
        },
    };
    Ok(CommandResult::new(CommandSummary::Schema(summary)))
}
