use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout, xliff};

fn italian() -> String {
    xliff(
        "it",
        &[
            ("vpn.main.title", "Mozilla VPN", Some("VPN di Mozilla")),
            ("vpn.main.subtitle", "Say \"hi\"", None),
            ("vpn.settings.dns", "DNS", Some("DNS personalizzato")),
            ("vpn.settings.about", "About", None),
        ],
    )
}

#[test]
fn test_completeness() -> Result<()> {
    let test = CliTest::with_file("it.xliff", &italian())?;

    let output = test.command().args(["xliff", "it.xliff", "-C"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "0.5\n");

    Ok(())
}

#[test]
fn test_reference_locale_is_complete() -> Result<()> {
    let english = xliff(
        "en",
        &[("vpn.main.title", "Mozilla VPN", Some("Mozilla VPN")), ("vpn.main.subtitle", "Hi", None)],
    );
    let test = CliTest::with_file("en.xliff", &english)?;

    let output = test
        .command()
        .args(["xliff", "en.xliff", "-C", "--locale", "en"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "1.0\n");

    let output = test
        .command()
        .args(["xliff", "en.xliff", "-C", "--reference-locale", "fr", "--check", "-t", "0.7"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "0.5\n");

    Ok(())
}

#[test]
fn test_dump_every_string() -> Result<()> {
    let test = CliTest::with_file("it.xliff", &italian())?;

    let output = test.command().args(["xliff", "it.xliff", "-d"]).output()?;
    assert_eq!(
        stdout(&output),
        "vpn.main.title: VPN di Mozilla\n\
         vpn.main.subtitle: Say \"hi\"\n\
         vpn.settings.dns: DNS personalizzato\n\
         vpn.settings.about: About\n"
    );

    Ok(())
}

#[test]
fn test_get_by_prefix_in_env_format() -> Result<()> {
    let test = CliTest::with_file("it.xliff", &italian())?;

    let output = test
        .command()
        .args(["xliff", "it.xliff", "-g", "vpn.main", "-f", "env", "--strip", "1"])
        .output()?;
    assert_eq!(
        stdout(&output),
        "MAIN_TITLE=\"VPN di Mozilla\"\nMAIN_SUBTITLE=\"Say \\\"hi\\\"\"\n"
    );

    Ok(())
}

#[test]
fn test_get_exact_id_raw() -> Result<()> {
    let test = CliTest::with_file("it.xliff", &italian())?;

    let output = test
        .command()
        .args(["xliff", "it.xliff", "-g", "vpn.settings.dns", "-f", "raw"])
        .output()?;
    assert_eq!(stdout(&output), "DNS personalizzato\n");

    Ok(())
}

#[test]
fn test_transform_template() -> Result<()> {
    let test = CliTest::with_file("it.xliff", &italian())?;
    test.write_file(
        "template.txt",
        "title=@vpn.main.title@ dns=${VPN_SETTINGS_DNS} qml=qtTrId(\"vpn.settings.about\") keep=@unknown@\n",
    )?;

    let output = test
        .command()
        .args(["xliff", "it.xliff", "-x", "template.txt", "-o", "out.txt", "-C"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "0.5\n");
    assert_eq!(
        test.read_file("out.txt")?,
        "title=VPN di Mozilla dns=DNS personalizzato qml=About keep=@unknown@\n"
    );

    Ok(())
}

#[test]
fn test_check_below_threshold_fails() -> Result<()> {
    let test = CliTest::with_file("it.xliff", &italian())?;

    let output = test
        .command()
        .args(["xliff", "it.xliff", "--check", "-t", "0.7"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let output = test
        .command()
        .args(["xliff", "it.xliff", "--check", "-t", "0.5"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_check_uses_configured_threshold() -> Result<()> {
    let test = CliTest::with_file("it.xliff", &italian())?;
    test.write_file(".l10nrc.json", r#"{"threshold": 0.4}"#)?;

    let output = test
        .command()
        .args(["xliff", "it.xliff", "--check", "-v"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("it completeness 50.0% (threshold 40.0%)"));

    Ok(())
}

#[test]
fn test_locale_cannot_be_guessed() -> Result<()> {
    let test = CliTest::with_file(
        "bare.xliff",
        r#"<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2"><file original="a.ts"><body></body></file></xliff>"#,
    )?;

    let output = test.command().args(["xliff", "bare.xliff"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Cannot guess the locale of bare.xliff, use --locale"));

    Ok(())
}

#[test]
fn test_missing_file_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["xliff", "missing.xliff"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error: "));

    Ok(())
}
