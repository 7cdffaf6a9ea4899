//! Normalization of extracted literals.

use std::sync::LazyLock;

use regex::Regex;

/// A brace placeholder: `{}`, `{0}`, `{name}`, `{user.name}`, `{items[0]}`,
/// `{name!r}`, `{value:>8}`.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?:[A-Za-z_]\w*|\d+)?(?:\.[A-Za-z_]\w*|\[[^\]{}]*\])*(?:![rsa])?(?::[^{}]*)?\}")
        .unwrap()
});

/// Whether `text` contains a placeholder once `{{` and `}}` escapes are
/// removed.
pub fn is_format_string(text: &str) -> bool {
    let unescaped = text.replace("{{", "").replace("}}", "");
    PLACEHOLDER_REGEX.is_match(&unescaped)
}

/// Remove the whitespace margin shared by every non-blank line.
///
/// Whitespace-only lines become empty and do not count toward the margin,
/// so an indented multi-line literal compares equal to its flush form.
pub fn dedent(text: &str) -> String {
    let margin = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .reduce(common_prefix)
        .unwrap_or("");

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

/// Turn the text of a `/** ... */` comment into a message.
///
/// The `*` gutter is removed, blank lines at either end are dropped, and
/// the remaining block is de-indented.
pub fn clean_doc_comment(text: &str) -> String {
    let body = text.strip_prefix('*').unwrap_or(text);
    let lines: Vec<&str> = body
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            let trimmed = line.trim_start();
            match trimmed.strip_prefix('*') {
                Some(rest) if index > 0 => rest,
                _ => line,
            }
        })
        .map(|line| line.trim_end())
        .collect();

    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => dedent(&lines[start..=end].join("\n")),
        _ => String::new(),
    }
}
