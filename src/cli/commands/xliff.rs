use std::{fmt::Write, fs};

use anyhow::{Context, Result};

use super::super::args::XliffCommand;
use super::{
    CommandResult, CommandSummary, XliffSummary,
    helper::{load_project_config, reference_locale, threshold},
};
use crate::{completeness, language::LocaleStrings, xliff::XliffDocument};

pub fn xliff(cmd: XliffCommand) -> Result<CommandResult> {
    let loaded = load_project_config()?;
    let document = XliffDocument::from_path(&cmd.source)?;
    let locale = match &cmd.locale {
        Some(locale) => locale.clone(),
        None => document.guess_locale().with_context(|| {
            format!(
                "Cannot guess the locale of {}, use --locale",
                cmd.source.display()
            )
        })?,
    };
    let strings = LocaleStrings::from_document(&document, &locale);
    let completeness =
        completeness::score(&document, &locale, &reference_locale(&cmd.common, &loaded)).ratio;

    let mut out = String::new();
    let mut queries: Vec<Option<&str>> = Vec::new();
    if cmd.dump {
        queries.push(None);
    }
    queries.extend(cmd.get.iter().map(|q| Some(q.as_str())));
    for query in queries {
        for id in strings.select(query) {
            if let Some(line) = strings.render(id, cmd.format, cmd.strip) {
                let _ = writeln!(out, "{}", line);
            }
        }
    }

    if let Some(template) = &cmd.xform {
        let text = fs::read_to_string(template)
            .with_context(|| format!("Failed to read {}", template.display()))?;
        out.push_str(&strings.transform(&text));
    }

    let mut stdout = match &cmd.output {
        Some(path) => {
            fs::write(path, &out).with_context(|| format!("Failed to write {}", path.display()))?;
            String::new()
        }
        None => out,
    };
    if cmd.completeness {
        let _ = writeln!(stdout, "{:?}", completeness);
    }

    let check = if cmd.check {
        let threshold = threshold(cmd.threshold, &loaded)?;
        Some((threshold, completeness >= threshold))
    } else {
        None
    };

    let mut result = CommandResult::new(CommandSummary::Xliff(XliffSummary {
        source: cmd.source,
        locale: strings.locale().to_string(),
        completeness,
        output: stdout,
        check,
    }));
    if check.is_some_and(|(_, passed)| !passed) {
        result.error_count = 1;
    }
    Ok(result)
}
