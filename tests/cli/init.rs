use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

#[test]
fn init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());

    assert!(test.root().join(".transcanrc.json").exists());

    let content = test.read_file(".transcanrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert!(parsed.get("markupExtensions").is_some());
    assert!(parsed.get("sourceExtensions").is_some());
    assert!(parsed.get("languageCode").is_some());
    assert!(parsed.get("batchSize").is_some());

    Ok(())
}

#[test]
fn init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".transcanrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert!(!output.status.success());
    assert_eq!(test.read_file(".transcanrc.json")?, "{}");

    Ok(())
}
