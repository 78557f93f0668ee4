use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod addon;
mod generate;
mod import;
mod init;
mod schema;
mod xliff;

const BIN_NAME: &str = "l10nctl";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop the config lookup at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    /// Install stand-ins for `lconvert` and `lrelease` under `qt/`.
    ///
    /// Both log their arguments to `qt/calls.log`; `lconvert` creates the
    /// file given with `-o`.
    #[cfg(unix)]
    pub fn fake_qt(&self) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let dir = self.project_dir.join("qt");
        fs::create_dir_all(&dir)?;
        let log = dir.join("calls.log");
        let lconvert = format!(
            r#"#!/bin/sh
echo "lconvert $*" >> "{log}"
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; fi
  shift
done
if [ -n "$out" ]; then : > "$out"; fi
"#,
            log = log.display()
        );
        let lrelease = format!(
            "#!/bin/sh\necho \"lrelease $*\" >> \"{}\"\n",
            log.display()
        );

        for (name, script) in [("lconvert", lconvert), ("lrelease", lrelease)] {
            let path = dir.join(name);
            fs::write(&path, script)?;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        }
        Ok(dir)
    }
}

pub fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// An XLIFF document with one `<file>` for `locale`.
pub fn xliff(locale: &str, units: &[(&str, &str, Option<&str>)]) -> String {
    let units: String = units
        .iter()
        .map(|(id, source, target)| {
            let target = target
                .map(|t| format!("<target>{t}</target>"))
                .unwrap_or_default();
            format!("      <trans-unit id=\"{id}\"><source>{source}</source>{target}</trans-unit>\n")
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <file original="mozillavpn.ts" source-language="en" target-language="{locale}" datatype="plaintext">
    <body>
{units}    </body>
  </file>
</xliff>
"#
    )
}
