use std::fs;

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use lingo::catalog::{Catalog, Occurrence, parse};
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr};

const INFO_SOURCE: &str = r#"import { _ } from "../i18n";

/**
 * Bot information.
 */
@localizable
export class InfoCommands {
  uptime(name: string) {
    return _("Hello {name}", { guild: true }); // greeting
  }

  ping() {
    return _("Pong!");
  }

  again(name: string) {
    return _("Hello {name}");
  }
}
"#;

fn read_catalog(test: &CliTest, path: &str, locale: &str) -> Result<Catalog> {
    Ok(parse(&test.read_file(path)?, locale))
}

#[test]
fn test_extract_writes_catalog_per_locale() -> Result<()> {
    let test = CliTest::with_file("bot/info.ts", INFO_SOURCE)?;

    assert_cmd_snapshot!(test.extract_command().args(["bot/info.ts", "-l", "zh-CN,ja"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ bot/locales: 3 messages written to 2 catalogs (zh-CN, ja)
    ✓ Scanned 1 source file

    ----- stderr -----
    ");

    let catalog = read_catalog(&test, "bot/locales/zh-CN.po", "zh-CN")?;
    assert_eq!(catalog.len(), 3);

    let hello = catalog.get("Hello {name}").unwrap();
    assert!(hello.is_format_string);
    assert_eq!(hello.comments, vec!["greeting"]);
    assert_eq!(
        hello.occurrences,
        vec![Occurrence::new("info.ts", 9), Occurrence::new("info.ts", 17)]
    );

    let doc = catalog.get("Bot information.").unwrap();
    assert!(doc.is_docstring);

    assert!(test.root().join("bot/locales/ja.po").exists());
    assert!(!test.root().join("bot/locales/fr.po").exists());

    Ok(())
}

#[test]
fn test_extract_preserves_translations() -> Result<()> {
    let test = CliTest::with_file("bot/info.ts", INFO_SOURCE)?;
    test.write_file(
        "bot/locales/zh-CN.po",
        "#: info.ts:1\nmsgid \"Pong!\"\nmsgstr \"乓！\"\n\nmsgid \"Removed\"\nmsgstr \"已移除\"\n",
    )?;

    assert_cmd_snapshot!(test.extract_command().args(["bot", "-l", "zh-CN"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ bot/locales: 3 messages written to 1 catalog (zh-CN)
    ✓ Scanned 1 source file

    ----- stderr -----
    ");

    let catalog = read_catalog(&test, "bot/locales/zh-CN.po", "zh-CN")?;
    let pong = catalog.get("Pong!").unwrap();
    assert_eq!(pong.translation, "乓！");
    assert_eq!(pong.occurrences, vec![Occurrence::new("info.ts", 13)]);
    assert!(catalog.get("Removed").is_none());

    Ok(())
}

#[test]
fn test_extract_overwrite_discards_translations() -> Result<()> {
    let test = CliTest::with_file("bot/info.ts", INFO_SOURCE)?;
    test.write_file(
        "bot/locales/ja.po",
        "msgid \"Pong!\"\nmsgstr \"ポン！\"\n",
    )?;

    assert_cmd_snapshot!(test.extract_command().args(["bot", "-l", "ja", "--overwrite"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ bot/locales: 3 messages written to 1 catalog (ja)
    ✓ Scanned 1 source file

    ----- stderr -----
    ");

    let catalog = read_catalog(&test, "bot/locales/ja.po", "ja")?;
    assert_eq!(catalog.get("Pong!").unwrap().translation, "");

    Ok(())
}

#[test]
fn test_bad_call_shape_is_reported_without_failing() -> Result<()> {
    let test = CliTest::with_file("bot/clear.ts", "_(\"Cleared\");\n_(\"a\", \"b\");\n")?;

    assert_cmd_snapshot!(test.extract_command().args(["bot/clear.ts", "-l", "fr"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ bot/locales: 1 message written to 1 catalog (fr)
    ✓ Scanned 1 source file, 1 call skipped

    ----- stderr -----
    warning: expected exactly one positional argument, found 2
      --> bot/clear.ts:2
       | _("a", "b")
    "#);

    let catalog = read_catalog(&test, "bot/locales/fr.po", "fr")?;
    assert_eq!(catalog.len(), 1);

    Ok(())
}

#[test]
fn test_unparsable_file_fails_with_status_one() -> Result<()> {
    let test = CliTest::with_file("bot/ok.ts", "_(\"Fine\");\n")?;
    test.write_file("bot/broken.ts", "const = ;\n")?;

    insta::with_settings!({
        filters => vec![(r"Failed to parse bot/broken.ts: .*", "Failed to parse bot/broken.ts: [parse error]")]
    }, {
        assert_cmd_snapshot!(test.extract_command().args(["bot", "-l", "de"]), @r"
        success: false
        exit_code: 1
        ----- stdout -----
        ✓ bot/locales: 1 message written to 1 catalog (de)
        ✘ Scanned 1 source file, 1 file failed

        ----- stderr -----
        error: bot/broken.ts: Failed to parse bot/broken.ts: [parse error]
        ");
    });
    assert!(test.root().join("bot/locales/de.po").exists());

    Ok(())
}

#[test]
fn test_invalid_locale_is_fatal() -> Result<()> {
    let test = CliTest::with_file("bot/info.ts", INFO_SOURCE)?;

    assert_cmd_snapshot!(test.extract_command().args(["bot", "-l", "zh-CN,xx"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid --locales: locale "xx" is not a recognized locale tag
    "#);
    assert!(!test.root().join("bot/locales").exists());

    Ok(())
}

#[test]
fn test_recursive_and_exclude() -> Result<()> {
    let test = CliTest::with_file("bot/cogs/util/info.ts", "_(\"Uptime\");\n")?;
    test.write_file("bot/cogs/admin/clear.ts", "_(\"Cleared\");\n")?;
    test.write_file("bot/main.ts", "_(\"Ready\");\n")?;

    let output = test
        .extract_command()
        .args(["bot", "-l", "ko"])
        .output()?;
    assert!(output.status.success());
    assert!(test.root().join("bot/locales/ko.po").exists());
    assert!(!test.root().join("bot/cogs/util/locales").exists());

    assert_cmd_snapshot!(test.extract_command().args(["bot", "-r", "-l", "ko", "-e", "**/admin/**"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ bot/cogs/util/locales: 1 message written to 1 catalog (ko)
    ✓ bot/locales: 1 message written to 1 catalog (ko)
    ✓ Scanned 2 source files

    ----- stderr -----
    ");
    assert!(test.root().join("bot/cogs/util/locales/ko.po").exists());
    assert!(!test.root().join("bot/cogs/admin/locales").exists());

    Ok(())
}

#[test]
fn test_config_file_supplies_defaults() -> Result<()> {
    let test = CliTest::with_file(
        ".lingorc.json",
        r#"{
            "includes": ["src"],
            "recursive": true,
            "locales": ["en-US"],
            "catalogDir": "i18n",
            "entryPoints": ["t"]
        }"#,
    )?;
    test.write_file("src/commands/help.ts", "t(\"Help\");\n_(\"Ignored\");\n")?;

    assert_cmd_snapshot!(test.extract_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ src/commands/i18n: 1 message written to 1 catalog (en-US)
    ✓ Scanned 1 source file

    ----- stderr -----
    ");

    let catalog = read_catalog(&test, "src/commands/i18n/en-US.po", "en-US")?;
    assert_eq!(catalog.len(), 1);
    assert!(catalog.get("Help").is_some());

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file(".lingorc.json", r#"{ "locales": ["klingon"] }"#)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".lingorc.json"));

    Ok(())
}

#[test]
fn test_missing_path_fails_with_status_one() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .extract_command()
        .args(["nowhere", "-l", "it"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("nowhere"));

    Ok(())
}

#[test]
fn test_unreadable_catalog_fails_but_writes_the_rest() -> Result<()> {
    let test = CliTest::with_file("bot/ping.ts", "_(\"Pong!\");\n")?;
    fs::create_dir_all(test.root().join("bot/locales"))?;
    fs::write(test.root().join("bot/locales/fr.po"), [0xFF, 0xFE])?;

    assert_cmd_snapshot!(test.extract_command().args(["bot/ping.ts", "-l", "fr,ja"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✓ bot/locales: 1 message written to 1 catalog (ja)
    ✘ Scanned 1 source file, 1 file failed

    ----- stderr -----
    error: bot/locales/fr.po: Failed to read catalog: bot/locales/fr.po: stream did not contain valid UTF-8
    ");

    assert_eq!(fs::read(test.root().join("bot/locales/fr.po"))?, vec![0xFF, 0xFE]);
    let catalog = read_catalog(&test, "bot/locales/ja.po", "ja")?;
    assert!(catalog.get("Pong!").is_some());

    Ok(())
}
