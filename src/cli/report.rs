//! Report formatting and printing utilities.
//!
//! Separate from the pipelines so l10nctl can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, GenerateSummary, ImportSummary, InitSummary, SchemaSummary,
    XliffSummary,
};
use crate::{
    addon::AddonReport,
    import::{LocaleOutcome, LocaleReport},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Import(summary) => print_import_to(summary, &mut stdout),
        CommandSummary::Generate(summary) => print_generate_to(summary, &mut stdout),
        CommandSummary::Xliff(summary) => {
            if verbose {
                print_xliff_verbose_to(summary, &mut io::stderr().lock());
            }
            print_xliff_to(summary, &mut stdout);
        }
        CommandSummary::Addon(report) => print_addon_to(report, &mut stdout),
        CommandSummary::Schema(summary) => print_schema_to(summary, &mut stdout),
        CommandSummary::Init(summary) => print_init_to(summary, &mut stdout),
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Print the per-locale table and the import summary.
pub fn print_import_to<W: Write>(summary: &ImportSummary, writer: &mut W) {
    let width = summary
        .report
        .locales
        .iter()
        .map(|l| l.locale.len())
        .max()
        .unwrap_or(0);

    for locale in &summary.report.locales {
        print_locale_row(locale, width, writer);
    }

    let retained = summary.report.retained().count();
    let policy = match summary.threshold {
        Some(threshold) => format!(" (threshold {})", percent(threshold)),
        None => String::new(),
    };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Imported {} of {} {}{} into {}",
            retained,
            summary.report.locales.len(),
            if summary.report.locales.len() == 1 {
                "locale"
            } else {
                "locales"
            },
            policy,
            summary.report.manifest.display()
        )
        .green()
    );
}

fn print_locale_row<W: Write>(locale: &LocaleReport, width: usize, writer: &mut W) {
    let completeness = locale
        .completeness
        .map(percent)
        .unwrap_or_else(|| "-".to_string());
    let (mark, status) = match &locale.outcome {
        LocaleOutcome::Retained { .. } => (SUCCESS_MARK.green(), "retained".green()),
        LocaleOutcome::BelowThreshold => (FAILURE_MARK.yellow(), "below threshold".yellow()),
        LocaleOutcome::Unreadable { .. } => (FAILURE_MARK.red(), "unreadable".red()),
    };
    let _ = writeln!(
        writer,
        "  {} {:<width$}  {:>6}  {}",
        mark,
        locale.locale,
        completeness,
        status,
        width = width
    );
}

pub fn print_generate_to<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    for (path, written) in &summary.files {
        let state = if *written {
            "written".green()
        } else {
            "unchanged".dimmed()
        };
        let _ = writeln!(writer, "  {} ({})", path.display(), state);
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Generated {} {}",
            summary.string_count,
            if summary.string_count == 1 {
                "string"
            } else {
                "strings"
            }
        )
        .green()
    );
}

pub fn print_xliff_to<W: Write>(summary: &XliffSummary, writer: &mut W) {
    let _ = write!(writer, "{}", summary.output);
}

/// Completeness line for `--verbose`, and the result of `--check`.
pub fn print_xliff_verbose_to<W: Write>(summary: &XliffSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{:6.2}  {:6}  {}",
        summary.completeness * 100.0,
        summary.locale,
        summary.source.display()
    );
    if let Some((threshold, passed)) = summary.check {
        let mark = if passed {
            SUCCESS_MARK.green()
        } else {
            FAILURE_MARK.red()
        };
        let _ = writeln!(
            writer,
            "{} {} completeness {} (threshold {})",
            mark,
            summary.locale,
            percent(summary.completeness),
            percent(threshold)
        );
    }
}

pub fn print_addon_to<W: Write>(report: &AddonReport, writer: &mut W) {
    if !report.translatable {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Addon {} is not translatable", report.id).green()
        );
        return;
    }

    for locale in &report.locales {
        let _ = writeln!(writer, "  {:<8} {:>6}", locale.locale, percent(locale.ratio));
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Built addon {}: {} {}, {} {}",
            report.id,
            report.strings,
            if report.strings == 1 { "string" } else { "strings" },
            report.locales.len(),
            if report.locales.len() == 1 {
                "locale"
            } else {
                "locales"
            }
        )
        .green()
    );
}

pub fn print_schema_to<W: Write>(summary: &SchemaSummary, writer: &mut W) {
    if let Some(schema) = &summary.schema {
        let _ = write!(writer, "{}", schema);
    }
    if let Some(path) = &summary.written {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Wrote {}", path.display()).green()
        );
    }
}

pub fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}
