use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["i18nRoot", "referenceLocale", "threshold", "xliffFile", "tsPrefix"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["referenceLocale"], "en");
    assert_eq!(parsed["threshold"], 0.7);

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .l10nrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".l10nrc.json").exists());
    let content = test.read_file(".l10nrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".l10nrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .l10nrc.json already exists
    ");

    assert_eq!(test.read_file(".l10nrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
    let test = CliTest::with_file(".l10nrc.json", r#"{"threshold": 1.5}"#)?;
    test.write_file("translations/strings.yaml", "")?;

    let output = test.command().arg("generate").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(crate::stderr(&output).contains("Invalid 'threshold': 1.5"));

    Ok(())
}
