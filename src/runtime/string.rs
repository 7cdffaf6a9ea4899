use std::{collections::BTreeMap, fmt};

use crate::locale::RECOGNIZED_LOCALES;

/// A resolved message together with every locale's variant of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedString {
    text: String,
    localizations: BTreeMap<String, String>,
}

impl TranslatedString {
    pub fn new(text: impl Into<String>, localizations: BTreeMap<String, String>) -> Self {
        Self {
            text: text.into(),
            localizations,
        }
    }

    /// Wrap text that has no translations; every locale maps to it.
    pub fn untranslated(text: impl Into<String>) -> Self {
        let text = text.into();
        let localizations = RECOGNIZED_LOCALES
            .iter()
            .map(|locale| (locale.to_string(), text.clone()))
            .collect();
        Self {
            text,
            localizations,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn localizations(&self) -> &BTreeMap<String, String> {
        &self.localizations
    }

    pub fn into_localizations(self) -> BTreeMap<String, String> {
        self.localizations
    }

    /// Substitute `{name}` placeholders in the resolved text.
    pub fn format<I, K, V>(&self, args: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: fmt::Display,
    {
        let args: Vec<(K, String)> = args
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect();
        format_named(&self.text, |name| {
            args.iter()
                .find(|(key, _)| key.as_ref() == name)
                .map(|(_, value)| value.as_str())
        })
    }
}

impl fmt::Display for TranslatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for TranslatedString {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<TranslatedString> for String {
    fn from(value: TranslatedString) -> Self {
        value.text
    }
}

/// Replace `{name}` fields using `lookup`; `{{` and `}}` are literal braces.
///
/// Fields `lookup` does not know are left untouched so a missing argument
/// shows up in the output instead of vanishing.
pub fn format_named<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('{')
            && let Some(end) = tail.find('}')
        {
            let name = &tail[1..end];
            match lookup(name) {
                Some(value) => out.push_str(value),
                None => out.push_str(&tail[..=end]),
            }
            rest = &tail[end + 1..];
            continue;
        }
        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}
