use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout, xliff};

fn project() -> Result<CliTest> {
    let units = |translated: usize| -> Vec<(&'static str, &'static str, Option<&'static str>)> {
        [("vpn.a.one", "One"), ("vpn.a.two", "Two"), ("vpn.a.three", "Three"), ("vpn.a.four", "Four")]
            .iter()
            .enumerate()
            .map(|(i, (id, source))| (*id, *source, (i < translated).then_some(*source)))
            .collect()
    };

    let test = CliTest::with_file("i18n/en/mozillavpn.xliff", &xliff("en", &units(0)))?;
    test.write_file("i18n/fr/mozillavpn.xliff", &xliff("fr", &units(4)))?;
    test.write_file("i18n/it/mozillavpn.xliff", &xliff("it", &units(2)))?;
    test.write_file("i18n/.github/mozillavpn.xliff", "not a locale")?;
    test.write_file("i18n/de/README.md", "no translations yet")?;
    Ok(test)
}

#[cfg(unix)]
#[test]
fn test_production_import() -> Result<()> {
    let test = project()?;
    test.fake_qt()?;

    let output = test
        .command()
        .args(["import", "-p", "-q", "qt", "--release"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("de       -  unreadable"));
    assert!(out.contains("en  100.0%  retained"));
    assert!(out.contains("fr  100.0%  retained"));
    assert!(out.contains("it   50.0%  below threshold"));
    assert!(out.contains("Imported 2 of 4 locales (threshold 70.0%)"));

    assert_eq!(
        test.read_file("translations/generated/translations.pri")?,
        "TRANSLATIONS += \\\n    $$PWD/mozillavpn_en.ts \\\n    $$PWD/mozillavpn_fr.ts\n"
    );
    assert_eq!(
        test.read_file("translations/generated/translations.completeness")?,
        "en:1.0\nfr:1.0\n"
    );
    assert!(test.root().join("translations/generated/mozillavpn_fr.ts").is_file());
    assert!(!test.root().join("translations/generated/mozillavpn_it.ts").exists());

    let calls = test.read_file("qt/calls.log")?;
    let calls: Vec<&str> = calls.lines().collect();
    assert_eq!(calls.len(), 4);
    assert!(calls[0].starts_with("lconvert -if xlf -i "));
    assert!(calls[0].ends_with("translations/generated/mozillavpn_en.ts"));
    assert!(calls[1].starts_with("lrelease -idbased "));
    assert!(calls[3].ends_with("mozillavpn_fr.ts"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_development_import_keeps_every_readable_locale() -> Result<()> {
    let test = project()?;
    test.fake_qt()?;

    let output = test
        .command()
        .args(["import", "-q", "qt", "-o", "out"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Imported 3 of 4 locales into"));

    assert_eq!(
        test.read_file("out/translations.completeness")?,
        "en:1.0\nfr:1.0\nit:0.5\n"
    );
    assert!(!test.read_file("qt/calls.log")?.contains("lrelease"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_missing_reference_locale_aborts() -> Result<()> {
    let test = project()?;
    test.fake_qt()?;

    let output = test
        .command()
        .args(["import", "-q", "qt", "--reference-locale", "es"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Reference locale 'es' is unavailable"));
    assert!(!test.root().join("translations/generated/translations.pri").exists());

    Ok(())
}

#[test]
fn test_missing_qt_tools() -> Result<()> {
    let test = project()?;

    let output = test
        .command()
        .args(["import", "-q", "no-such-dir"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unable to locate lconvert"));

    Ok(())
}

#[test]
fn test_invalid_threshold() -> Result<()> {
    let test = project()?;

    let output = test.command().args(["import", "-p", "-t", "2"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid threshold: 2"));

    Ok(())
}
