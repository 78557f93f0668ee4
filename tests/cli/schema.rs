use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stdout};

#[test]
fn test_schema_to_stdout() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("schema").output()?;
    assert!(output.status.success());

    let schema: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(schema["title"], "AddonManifest");
    let properties = &schema["properties"];
    for field in ["id", "type", "translatable", "guide", "tutorial", "message"] {
        assert!(properties.get(field).is_some(), "missing property '{}'", field);
    }

    Ok(())
}

#[test]
fn test_schema_to_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["schema", "-o", "manifest.schema.json"])
        .output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Wrote manifest.schema.json"));

    let schema: Value = serde_json::from_str(&test.read_file("manifest.schema.json")?)?;
    assert!(schema.get("properties").is_some());

    Ok(())
}
