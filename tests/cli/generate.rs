use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const STRINGS: &str = r#"
menu:
  about_us: About us
  help:
    value: [Get help, now]
    comment: Help menu entry
"#;

const GUIDE: &str = r#"{
    "id": "dns",
    "title": "Using DNS",
    "blocks": [{"id": "c_1", "type": "text", "content": "Why?"}]
}"#;

#[test]
fn test_generate_writes_tables() -> Result<()> {
    let test = CliTest::with_file("translations/strings.yaml", STRINGS)?;
    test.write_file("src/ui/guides/dns.json", GUIDE)?;

    let output = test.command().arg("generate").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("l18nstrings.h (written)"));
    assert!(out.contains("l18nstrings_p.cpp (written)"));
    assert!(out.contains("Generated 4 strings"));

    let header = test.read_file("translations/generated/l18nstrings.h")?;
    let enum_ids: Vec<&str> = header
        .lines()
        .map(str::trim)
        .skip_while(|l| *l != "Empty,")
        .take_while(|l| *l != "__Last,")
        .collect();
    assert_eq!(
        enum_ids,
        vec![
            "Empty,",
            "MenuAboutUs,",
            "MenuHelp,",
            "GuideDnsTitle,",
            "GuideDnsBlockC1,"
        ]
    );

    let table = test.read_file("translations/generated/l18nstrings_p.cpp")?;
    assert!(table.contains("    //% \"Get help\\nnow\"\n    //: Help menu entry\n    QT_TRID_NOOP(\"vpn.menu.help\"),"));
    assert!(table.contains("QT_TRID_NOOP(\"guide.dns.block.c_1\")"));

    Ok(())
}

#[test]
fn test_generate_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("translations/strings.yaml", STRINGS)?;

    test.command().arg("generate").output()?;
    let header = test.read_file("translations/generated/l18nstrings.h")?;

    let output = test.command().arg("generate").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("l18nstrings.h (unchanged)"));
    assert_eq!(test.read_file("translations/generated/l18nstrings.h")?, header);

    Ok(())
}

#[test]
fn test_generate_honors_overrides() -> Result<()> {
    let test = CliTest::with_file("defs/app.yaml", STRINGS)?;

    let output = test
        .command()
        .args(["generate", "--strings", "defs/app.yaml", "-o", "gen"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("gen/l18nstrings.h").is_file());
    assert!(test.root().join("gen/l18nstrings_p.cpp").is_file());

    Ok(())
}

#[test]
fn test_generate_writes_nothing_on_invalid_source() -> Result<()> {
    let test = CliTest::with_file("translations/strings.yaml", STRINGS)?;
    test.write_file("src/ui/guides/broken.json", r#"{"id": "x", "title": "X"}"#)?;

    let output = test.command().arg("generate").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("broken.json"));
    assert!(!test.root().join("translations/generated").exists());

    Ok(())
}

#[test]
fn test_generate_without_strings_file_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("generate").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error: "));

    Ok(())
}
