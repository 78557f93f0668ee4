//! Qt localization tools (`lconvert`, `lrelease`).
//!
//! The pipelines never touch `.ts`/`.qm` internals themselves: they hand the
//! work to Qt's binaries through the [`Toolchain`] trait.

use std::{
    env,
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::Command,
};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unable to locate {tool} (searched: {searched})")]
    NotFound { tool: &'static str, searched: String },
    #[error("Failed to run {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} exited with {status}: {stderr}", .program.display())]
    Failed {
        program: PathBuf,
        status: String,
        stderr: String,
    },
}

/// Operations the pipelines need from the Qt localization toolchain.
pub trait Toolchain {
    /// Convert an XLIFF file into a `.ts` file.
    ///
    /// With `drop_untranslated`, units without a translation are omitted.
    fn xliff_to_ts(&self, xliff: &Path, ts: &Path, drop_untranslated: bool)
    -> Result<(), ToolError>;

    /// Merge `.ts` files into `output`; later inputs win.
    fn merge_ts(&self, inputs: &[PathBuf], output: &Path) -> Result<(), ToolError>;

    /// Compile a `.ts` file into a `.qm` file next to it.
    fn release(&self, ts: &Path) -> Result<(), ToolError>;
}

/// The real Qt binaries.
#[derive(Debug, Clone)]
pub struct QtTools {
    pub lconvert: PathBuf,
    pub lrelease: Option<PathBuf>,
}

impl QtTools {
    /// Locate the tools.
    ///
    /// Without explicit `qt_paths`, the install directories reported by
    /// `qmake`/`qmake6` are searched. `PATH` is always searched last.
    pub fn locate(qt_paths: &[PathBuf]) -> Result<Self, ToolError> {
        let mut search: Vec<PathBuf> = qt_paths.to_vec();
        if search.is_empty() {
            for qmake in ["qmake", "qmake6"] {
                for var in ["QT_INSTALL_BINS", "QT_INSTALL_LIBEXECS"] {
                    if let Some(dir) = qt_query(Path::new(qmake), var) {
                        search.push(dir);
                    }
                }
            }
        } else if let Some(qmake) = find_executable("qmake", qt_paths)
            && let Some(dir) = qt_query(&qmake, "QT_INSTALL_LIBEXECS")
        {
            search.push(dir);
        }
        search.extend(env::var_os("PATH").iter().flat_map(env::split_paths));

        let lconvert =
            find_executable("lconvert", &search).ok_or_else(|| ToolError::NotFound {
                tool: "lconvert",
                searched: describe(&search),
            })?;
        let lrelease = find_executable("lrelease", &search);
        if lrelease.is_none() {
            warn!("Unable to locate lrelease; compiling .qm files will fail");
        }

        debug!(lconvert = %lconvert.display(), "Located Qt tools");
        Ok(Self { lconvert, lrelease })
    }
}

impl Toolchain for QtTools {
    fn xliff_to_ts(
        &self,
        xliff: &Path,
        ts: &Path,
        drop_untranslated: bool,
    ) -> Result<(), ToolError> {
        let mut args: Vec<OsString> = vec!["-if".into(), "xlf".into(), "-i".into(), xliff.into()];
        if drop_untranslated {
            args.push("-no-untranslated".into());
        }
        args.extend(["-o".into(), ts.into()]);
        run(&self.lconvert, &args)
    }

    fn merge_ts(&self, inputs: &[PathBuf], output: &Path) -> Result<(), ToolError> {
        let mut args: Vec<OsString> = vec!["-i".into()];
        args.extend(inputs.iter().map(OsString::from));
        args.extend(["-o".into(), output.into()]);
        run(&self.lconvert, &args)
    }

    fn release(&self, ts: &Path) -> Result<(), ToolError> {
        let lrelease = self.lrelease.as_ref().ok_or_else(|| ToolError::NotFound {
            tool: "lrelease",
            searched: "Qt install directories and PATH".to_string(),
        })?;
        run(lrelease, &["-idbased".into(), ts.into()])
    }
}

fn run(program: &Path, args: &[OsString]) -> Result<(), ToolError> {
    debug!(program = %program.display(), ?args, "Running");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| ToolError::Spawn {
            program: program.to_path_buf(),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }
    Err(ToolError::Failed {
        program: program.to_path_buf(),
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

/// Ask qmake for one of its install variables.
fn qt_query(qmake: &Path, var: &str) -> Option<PathBuf> {
    let output = Command::new(qmake).args(["-query", var]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then(|| PathBuf::from(value))
}

/// First `dir/name` (with the platform executable suffix) that is a file.
pub fn find_executable(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let file_name = format!("{}{}", name, env::consts::EXE_SUFFIX);
    dirs.iter()
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

fn describe(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "no directories".to_string();
    }
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
