//! l10nctl - localization tooling for the VPN client
//!
//! l10nctl is a CLI tool and library that drives the client's translation
//! pipelines: it scores XLIFF translations, imports the locales that are
//! complete enough into Qt `.ts` files, generates the C++ string tables from
//! the YAML and JSON string sources, and builds the translations of addons.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `xliff`: XLIFF 1.2 reading and writing
//! - `language`: Per-locale string lookup and rendering
//! - `completeness`: Completeness scoring
//! - `import`: Locale import pipeline
//! - `strings`: String extraction and C++ table generation
//! - `addon`: Addon string pipeline
//! - `qt`: Qt localization tools
//! - `logging`: Diagnostic logging setup

pub mod addon;
pub mod cli;
pub mod completeness;
pub mod config;
pub mod import;
pub mod language;
pub mod logging;
pub mod qt;
pub mod strings;
pub mod xliff;
