//! Reader and writer for the catalog text format.
//!
//! The format is a subset of GNU gettext PO files:
//!
//! ```text
//! #. comment extracted from the source
//! #: src/commands/info.ts:12
//! #, brace-format
//! msgid "Uptime: {uptime}"
//! msgstr "運作時間：{uptime}"
//! ```
//!
//! Plural forms, message contexts and obsolete entries are not supported;
//! their lines are skipped on read and never written.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::entry::{CatalogEntry, Occurrence};
use super::store::Catalog;
use crate::error::Error;

/// Flag marking a message that contains `{placeholder}` fields.
pub const FORMAT_FLAG: &str = "brace-format";

/// Flag marking a message taken from a declaration's documentation comment.
pub const DOCSTRING_FLAG: &str = "docstring";

const MSGID: &str = "msgid ";
const MSGSTR: &str = "msgstr ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseStep {
    None,
    MsgId,
    MsgStr,
}

/// Parse catalog text into a [`Catalog`] for `locale`.
///
/// Malformed lines (a quoted continuation or `msgstr` with no preceding
/// `msgid`) are skipped. The header entry (empty `msgid`) is dropped.
/// Entries with an empty `msgstr` are kept; [`Catalog::translations`]
/// leaves them out of runtime lookups.
pub fn parse(content: &str, locale: &str) -> Catalog {
    let mut catalog = Catalog::new(locale);
    let mut step = ParseStep::None;
    let mut pending = CatalogEntry::default();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(meta) = line.strip_prefix('#') {
            if step == ParseStep::MsgStr {
                catalog.insert(std::mem::take(&mut pending));
                step = ParseStep::None;
            }
            apply_metadata(meta, &mut pending);
        } else if let Some(rest) = line.strip_prefix(MSGID) {
            match step {
                ParseStep::MsgStr => catalog.insert(std::mem::take(&mut pending)),
                // An id without a string is abandoned along with its metadata.
                ParseStep::MsgId => pending = CatalogEntry::default(),
                ParseStep::None => {}
            }
            match unquote(rest) {
                Some(value) => {
                    pending.key = value;
                    step = ParseStep::MsgId;
                }
                None => {
                    malformed(index + 1, "unterminated msgid string");
                    pending = CatalogEntry::default();
                    step = ParseStep::None;
                }
            }
        } else if let Some(rest) = line.strip_prefix(MSGSTR) {
            if step != ParseStep::MsgId {
                malformed(index + 1, "msgstr without a preceding msgid");
                continue;
            }
            match unquote(rest) {
                Some(value) => {
                    pending.translation = value;
                    step = ParseStep::MsgStr;
                }
                None => malformed(index + 1, "unterminated msgstr string"),
            }
        } else if line.starts_with('"') {
            let Some(value) = unquote(line) else {
                malformed(index + 1, "unterminated string");
                continue;
            };
            match step {
                ParseStep::MsgId => pending.key.push_str(&value),
                ParseStep::MsgStr => pending.translation.push_str(&value),
                ParseStep::None => malformed(index + 1, "string before any msgid"),
            }
        } else {
            tracing::debug!(line = index + 1, "skipping unsupported catalog line");
        }
    }

    if step == ParseStep::MsgStr {
        catalog.insert(pending);
    }

    catalog
}

fn malformed(line: usize, reason: &'static str) {
    let error = Error::MalformedCatalogLine { line, reason };
    tracing::debug!(%error, "ignoring malformed catalog line");
}

fn apply_metadata(meta: &str, entry: &mut CatalogEntry) {
    if let Some(references) = meta.strip_prefix(':') {
        for occurrence in parse_references(references) {
            entry.add_occurrence(occurrence);
        }
    } else if let Some(comment) = meta.strip_prefix('.') {
        entry.add_comments([comment.trim()]);
    } else if let Some(flags) = meta.strip_prefix(',') {
        for flag in flags.split(',').map(str::trim) {
            match flag {
                FORMAT_FLAG => entry.is_format_string = true,
                DOCSTRING_FLAG => entry.is_docstring = true,
                _ => {}
            }
        }
    }
}

/// Split a `#:` line into occurrences.
///
/// Several references may share a line. A token without a `:line` suffix
/// belongs to the path of the next token, so paths with spaces survive.
fn parse_references(references: &str) -> Vec<Occurrence> {
    let mut found = Vec::new();
    let mut path = String::new();
    for token in references.split_whitespace() {
        if !path.is_empty() {
            path.push(' ');
        }
        path.push_str(token);
        if let Some(occurrence) = Occurrence::parse(&path) {
            found.push(occurrence);
            path.clear();
        }
    }
    found
}

/// Strip the surrounding quotes of a PO string and decode its escapes.
fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.trim().strip_prefix('"')?.strip_suffix('"')?;
    Some(unescape(inner))
}

/// Decode `\\`, `\t`, `\r`, `\n` and `\"` in a single pass.
///
/// Unknown escapes are kept verbatim.
pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => result.push('\\'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('n') => result.push('\n'),
            Some('"') => result.push('"'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\n' => result.push_str("\\n"),
            '"' => result.push_str("\\\""),
            _ => result.push(c),
        }
    }
    result
}

/// Render a catalog to text, one block per entry in file order.
pub fn render(catalog: &Catalog) -> String {
    let blocks: Vec<String> = catalog.sorted_entries().into_iter().map(render_entry).collect();
    blocks.join("\n")
}

fn render_entry(entry: &CatalogEntry) -> String {
    let mut out = String::new();
    for line in entry.comments.iter().flat_map(|c| c.lines()) {
        let _ = writeln!(out, "#. {}", line.trim());
    }
    for occurrence in entry.sorted_occurrences() {
        let _ = writeln!(out, "#: {}", occurrence);
    }
    let flags: Vec<&str> = [
        (entry.is_format_string, FORMAT_FLAG),
        (entry.is_docstring, DOCSTRING_FLAG),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();
    if !flags.is_empty() {
        let _ = writeln!(out, "#, {}", flags.join(", "));
    }
    write_string(&mut out, MSGID, &entry.key);
    write_string(&mut out, MSGSTR, &entry.translation);
    out
}

/// Multi-line values are written gettext style: an empty first string
/// followed by one quoted line per `\n` terminated segment.
fn write_string(out: &mut String, keyword: &str, value: &str) {
    let segments: Vec<&str> = value.split_inclusive('\n').collect();
    if segments.len() <= 1 {
        let _ = writeln!(out, "{}\"{}\"", keyword, escape(value));
        return;
    }
    let _ = writeln!(out, "{}\"\"", keyword);
    for segment in segments {
        let _ = writeln!(out, "\"{}\"", escape(segment));
    }
}

/// Read and parse the catalog at `path`.
pub fn read_catalog(path: &Path, locale: &str) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    Ok(parse(&content, locale))
}

/// Write `catalog` to `path`, replacing any previous file.
///
/// An empty catalog is not written and `Ok(false)` is returned. The content
/// is staged in a sibling temporary file and renamed over `path`, so a
/// failed write leaves the previous file untouched.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<bool> {
    if catalog.is_empty() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let staging = staging_path(path);
    fs::write(&staging, render(catalog))
        .with_context(|| format!("Failed to write catalog: {}", staging.display()))?;
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e).with_context(|| format!("Failed to replace catalog: {}", path.display()));
    }
    Ok(true)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use crate::catalog::codec::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new("zh-CN");
        catalog.add_entry(
            "Hello {name}",
            &["shown on join".to_string()],
            Occurrence::new("src/greet.ts", 7),
            true,
            false,
        );
        catalog.add_entry("Hello {name}", &[], Occurrence::new("src/greet.ts", 3), true, false);
        catalog.add_entry("Bye", &[], Occurrence::new("src/bye.ts", 1), false, false);
        catalog.insert(CatalogEntry {
            translation: "再見".to_string(),
            occurrences: vec![Occurrence::new("src/bye.ts", 1)],
            ..CatalogEntry::new("Bye")
        });
        catalog
    }

    #[test]
    fn test_parse_simple_entries() {
        let content = r#"
msgid "Hello"
msgstr "你好"

msgid "Goodbye"
msgstr "再見"
"#;
        let catalog = parse(content, "zh-TW");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Hello").unwrap().translation, "你好");
        assert_eq!(catalog.get("Goodbye").unwrap().translation, "再見");
    }

    #[test]
    fn test_parse_multiline_concatenation() {
        let content = r#"msgid ""
"first line\n"
"second line"
msgstr "第一行\n"
"第二行"
"#;
        let catalog = parse(content, "zh-TW");
        let entry = catalog.get("first line\nsecond line").unwrap();
        assert_eq!(entry.translation, "第一行\n第二行");
    }

    #[test]
    fn test_parse_drops_header_and_keeps_untranslated() {
        let content = r#"msgid ""
msgstr "Content-Type: text/plain; charset=UTF-8\n"

msgid "Pending"
msgstr ""
"#;
        let catalog = parse(content, "ja");
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.get("Pending").unwrap().is_translated());
        assert!(catalog.translations().is_empty());
    }

    #[test]
    fn test_parse_ignores_malformed_lines() {
        let content = r#""orphan continuation"
msgstr "orphan string"
msgid "Key"
msgstr "Value"
"#;
        let catalog = parse(content, "fr");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Key").unwrap().translation, "Value");
    }

    #[test]
    fn test_parse_metadata() {
        let content = r#"#. greeting
#: a.ts:3
#: a.ts:1
#, brace-format, docstring
msgid "Hi {user}"
msgstr ""
#: b.ts:9
msgid "Other"
msgstr "Autre"
"#;
        let catalog = parse(content, "fr");
        let entry = catalog.get("Hi {user}").unwrap();
        assert_eq!(entry.comments, vec!["greeting"]);
        assert_eq!(
            entry.occurrences,
            vec![Occurrence::new("a.ts", 3), Occurrence::new("a.ts", 1)]
        );
        assert!(entry.is_format_string);
        assert!(entry.is_docstring);

        let other = catalog.get("Other").unwrap();
        assert_eq!(other.occurrences, vec![Occurrence::new("b.ts", 9)]);
        assert!(other.comments.is_empty());
    }

    #[test]
    fn test_references_with_spaces() {
        let content = "#: my cmd.ts:3\n#: a.ts:1 b.ts:2\nmsgid \"Hi\"\nmsgstr \"\"\n";
        let catalog = parse(content, "fr");
        assert_eq!(
            catalog.get("Hi").unwrap().occurrences,
            vec![
                Occurrence::new("my cmd.ts", 3),
                Occurrence::new("a.ts", 1),
                Occurrence::new("b.ts", 2)
            ]
        );

        let mut catalog = Catalog::new("fr");
        catalog.add_entry("Hi", &[], Occurrence::new("my cmd.ts", 3), false, false);
        let parsed = parse(&render(&catalog), "fr");
        assert_eq!(
            parsed.get("Hi").unwrap().occurrences,
            vec![Occurrence::new("my cmd.ts", 3)]
        );
    }

    #[test]
    fn test_multiline_comment_stays_in_comment_lines() {
        let mut catalog = Catalog::new("fr");
        catalog.add_entry(
            "Hi",
            &["first\nmsgstr \"evil\"".to_string()],
            Occurrence::new("x.ts", 1),
            false,
            false,
        );

        let rendered = render(&catalog);
        assert_eq!(
            rendered,
            "#. first\n#. msgstr \"evil\"\n#: x.ts:1\nmsgid \"Hi\"\nmsgstr \"\"\n"
        );

        let parsed = parse(&rendered, "fr");
        assert_eq!(parsed.len(), 1);
        let entry = parsed.get("Hi").unwrap();
        assert_eq!(entry.translation, "");
        assert_eq!(entry.comments, vec!["first", "msgstr \"evil\""]);
    }

    #[test]
    fn test_escape_fidelity() {
        let tricky = "back\\slash\ttab\rcr\nlf \"quoted\"";
        assert_eq!(unescape(&escape(tricky)), tricky);

        let mut catalog = Catalog::new("de");
        catalog.insert(CatalogEntry {
            translation: tricky.to_string(),
            occurrences: vec![Occurrence::new("x.ts", 1)],
            ..CatalogEntry::new(tricky)
        });
        let parsed = parse(&render(&catalog), "de");
        assert_eq!(parsed.get(tricky).unwrap().translation, tricky);
    }

    #[test]
    fn test_unescape_keeps_unknown_sequences() {
        assert_eq!(unescape(r"\x\"), "\\x\\");
        assert_eq!(unescape(r"\\n"), "\\n");
    }

    #[test]
    fn test_render_output() {
        insta::assert_snapshot!(render(&sample_catalog()), @r#"
        #: src/bye.ts:1
        msgid "Bye"
        msgstr "再見"

        #. shown on join
        #: src/greet.ts:3
        #: src/greet.ts:7
        #, brace-format
        msgid "Hello {name}"
        msgstr ""
        "#);
    }

    #[test]
    fn test_round_trip() {
        let catalog = sample_catalog();
        let parsed = parse(&render(&catalog), "zh-CN");

        assert_eq!(parsed.len(), catalog.len());
        for entry in catalog.entries() {
            let other = parsed.get(&entry.key).unwrap();
            assert_eq!(other.translation, entry.translation);
            assert_eq!(other.sorted_occurrences(), entry.sorted_occurrences());
            assert_eq!(other.is_format_string, entry.is_format_string);
        }
    }

    #[test]
    fn test_write_catalog_skips_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locales").join("en-US.po");

        assert!(!write_catalog(&Catalog::new("en-US"), &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_and_read_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locales").join("zh-CN.po");

        assert!(write_catalog(&sample_catalog(), &path).unwrap());
        assert!(!dir.path().join("locales").join(".zh-CN.po.tmp").exists());

        let catalog = read_catalog(&path, "zh-CN").unwrap();
        assert_eq!(catalog.locale, "zh-CN");
        assert_eq!(catalog.get("Bye").unwrap().translation, "再見");
    }
}
