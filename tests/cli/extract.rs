use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

#[test]
fn extract_markup_file_json() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "templates/index.html",
        "{% trans \"Hello\" group \"public\" %}\n\
         {% blocktrans trimmed %}  Hi {{ user }}  {% endblocktrans %}",
    )?;

    let output = test
        .command()
        .args(["extract", "templates/index.html", "--json"])
        .output()?;
    assert!(output.status.success());

    let entries: Value = serde_json::from_slice(&output.stdout)?;
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["text"], "Hello");
    assert_eq!(entries[0]["group"], "public");
    assert_eq!(entries[0]["origin"], "inline");

    assert_eq!(entries[1]["text"], "Hi %(user)s");
    assert_eq!(entries[1]["group"], "website");
    assert_eq!(entries[1]["origin"], "block");

    Ok(())
}

#[test]
fn extract_source_file_json() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "app/views.py",
        "_('Hello', group='public')\n_('Bye')\nngettext('item', 'items', 2)\n",
    )?;

    let output = test
        .command()
        .args(["extract", "app/views.py", "--json"])
        .output()?;
    assert!(output.status.success());

    let entries: Value = serde_json::from_slice(&output.stdout)?;
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["text"], "Hello");
    assert_eq!(entries[0]["group"], "public");
    assert_eq!(entries[1]["text"], "Bye");
    assert_eq!(entries[1]["group"], "website");
    assert_eq!(entries[2]["text"], "item");
    assert_eq!(entries[2]["plural_text"], "items");

    Ok(())
}

#[test]
fn extract_missing_file_errors() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["extract", "nope.html"]).output()?;
    assert!(!output.status.success());

    Ok(())
}
