use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout, xliff};

const GUIDE_MANIFEST: &str = r#"{
    "id": "dns_guide",
    "type": "guide",
    "guide": {
        "id": "dns",
        "title": "Custom DNS",
        "blocks": [{"id": "c_1", "type": "text", "content": "Pick a resolver"}]
    }
}"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file("addons/dns_guide/manifest.json", GUIDE_MANIFEST)?;
    test.write_file("out/.keep", "")?;
    Ok(test)
}

#[cfg(unix)]
#[test]
fn test_addon_without_translations() -> Result<()> {
    let test = project()?;
    test.fake_qt()?;

    let output = test
        .command()
        .args(["addon", "addons/dns_guide/manifest.json", "out", "-q", "qt"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Built addon dns_guide: 2 strings, 1 locale"));

    let template = test.read_file("out/dns_guide.ts")?;
    assert!(template.contains("<message id=\"guide.dns.title\">"));
    assert!(template.contains("<source>Pick a resolver</source>"));
    assert_eq!(test.read_file("out/i18n/locale.ts")?, template);
    assert_eq!(test.read_file("out/i18n/translations.completeness")?, "en:1.0\n");

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_addon_with_translations() -> Result<()> {
    let test = project()?;
    test.fake_qt()?;
    let units = |locale: &str, title: Option<&'static str>| {
        xliff(
            locale,
            &[
                ("guide.dns.title", "Custom DNS", title),
                ("guide.dns.block.c_1", "Pick a resolver", None),
            ],
        )
    };
    test.write_file("i18n/en/addons/dns_guide/strings.xliff", &units("en", None))?;
    test.write_file(
        "i18n/it/addons/dns_guide/strings.xliff",
        &units("it", Some("DNS personalizzato")),
    )?;

    let output = test
        .command()
        .args(["addon", "addons/dns_guide/manifest.json", "out", "-i", "i18n", "-q", "qt"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Built addon dns_guide: 2 strings, 2 locales"));

    assert_eq!(
        test.read_file("out/i18n/translations.completeness")?,
        "en:1.0\nit:0.5\n"
    );
    assert!(test.root().join("out/i18n/locale_it.ts").is_file());
    assert!(!test.root().join("out/i18n/.work").exists());

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_untranslatable_addon() -> Result<()> {
    let test = CliTest::with_file(
        "addons/replacer/manifest.json",
        r#"{"id": "replacer", "type": "replacer", "translatable": false}"#,
    )?;
    test.write_file("out/.keep", "")?;
    test.fake_qt()?;

    let output = test
        .command()
        .args(["addon", "addons/replacer/manifest.json", "out", "-q", "qt"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Addon replacer is not translatable"));
    assert!(!test.root().join("out/i18n").exists());

    Ok(())
}

#[test]
fn test_destination_must_be_directory() -> Result<()> {
    let test = project()?;

    let output = test
        .command()
        .args(["addon", "addons/dns_guide/manifest.json", "missing"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("`missing` is not a directory"));

    Ok(())
}

#[test]
fn test_manifest_must_be_file() -> Result<()> {
    let test = project()?;

    let output = test
        .command()
        .args(["addon", "addons/dns_guide", "out"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("`addons/dns_guide` is not a file"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_invalid_manifest() -> Result<()> {
    let test = CliTest::with_file("addons/bad/manifest.json", r#"{"id": "bad", "type": "guide"}"#)?;
    test.write_file("out/.keep", "")?;
    test.fake_qt()?;

    let output = test
        .command()
        .args(["addon", "addons/bad/manifest.json", "out", "-q", "qt"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error: Failed to build addon addons/bad/manifest.json"));
    assert!(!test.root().join("out/i18n").exists());

    Ok(())
}
