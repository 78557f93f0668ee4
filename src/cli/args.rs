//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `import`: Score the locales of an i18n checkout and import the complete ones
//! - `generate`: Generate the C++ string tables from the string sources
//! - `xliff`: Query a single XLIFF file
//! - `addon`: Build the translations of an addon
//! - `schema`: Print the JSON Schema of addon manifests
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::language::RenderFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Import(cmd)) => cmd.common.verbose,
            Some(Command::Generate(cmd)) => cmd.common.verbose,
            Some(Command::Xliff(cmd)) => cmd.common.verbose,
            Some(Command::Addon(cmd)) => cmd.common.verbose,
            Some(Command::Schema(_)) | Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the pipeline commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Reference locale (overrides config file)
    #[arg(long)]
    pub reference_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ImportCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Production build: drop locales below the completeness threshold
    #[arg(short, long)]
    pub prod: bool,

    /// Completeness threshold for production builds (overrides config file)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Internationalization checkout (overrides config file)
    #[arg(short, long)]
    pub i18n: Option<PathBuf>,

    /// Directory for the generated .ts files and manifest (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also compile each .ts file into a .qm file
    #[arg(long)]
    pub release: bool,

    /// Qt binary directory, can be given multiple times
    #[arg(short = 'q', long = "qt-path")]
    pub qt_paths: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// YAML string definitions (overrides config file)
    #[arg(long)]
    pub strings: Option<PathBuf>,

    /// Guide manifests directory (overrides config file)
    #[arg(long)]
    pub guides: Option<PathBuf>,

    /// Tutorial manifests directory (overrides config file)
    #[arg(long)]
    pub tutorials: Option<PathBuf>,

    /// Directory for the generated sources (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct XliffCommand {
    /// The XLIFF file to read
    pub source: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Fail when the completeness is below the threshold
    #[arg(short, long)]
    pub check: bool,

    /// Print the completeness ratio
    #[arg(short = 'C', long)]
    pub completeness: bool,

    /// Completeness threshold (overrides config file)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Locale to read (default: guessed from the file)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format of strings
    #[arg(short, long, value_enum, default_value_t = RenderFormat::Text)]
    pub format: RenderFormat,

    /// Print a string by id, or every string under an id prefix
    #[arg(short, long = "get", value_name = "TRID")]
    pub get: Vec<String>,

    /// Print every string
    #[arg(short, long)]
    pub dump: bool,

    /// Replace @ID@, ${ID} and qtTrId("ID") placeholders in a file
    #[arg(short = 'x', long, value_name = "FILE")]
    pub xform: Option<PathBuf>,

    /// Remove leading id segments before rendering
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub strip: usize,
}

#[derive(Debug, Args)]
pub struct AddonCommand {
    /// The addon manifest
    pub manifest: PathBuf,

    /// The destination directory
    pub dest: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Internationalization checkout
    #[arg(short, long)]
    pub i18n: Option<PathBuf>,

    /// JSON file mapping locales to their fallback locales
    #[arg(long, value_name = "FILE")]
    pub fallbacks: Option<PathBuf>,

    /// Qt binary directory, can be given multiple times
    #[arg(short = 'q', long = "qt-path")]
    pub qt_paths: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SchemaCommand {
    /// Write the schema to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score every locale, keep the complete ones and convert them to .ts files
    Import(ImportCommand),
    /// Generate the C++ string tables from YAML definitions and manifests
    Generate(GenerateCommand),
    /// Query an XLIFF file: completeness, strings and placeholder substitution
    Xliff(XliffCommand),
    /// Build the translations of an addon
    Addon(AddonCommand),
    /// Print the JSON Schema of addon manifests
    Schema(SchemaCommand),
    /// Initialize a new .l10nrc.json configuration file
    Init,
}
