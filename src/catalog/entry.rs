use std::fmt;

/// Where a key was found during extraction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    pub path: String,
    pub line: usize,
}

impl Occurrence {
    pub fn new(path: impl Into<String>, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Parse a `path:line` reference as written in `#:` lines.
    ///
    /// The line number is split off the last `:` so Windows drive prefixes
    /// survive.
    pub fn parse(reference: &str) -> Option<Self> {
        let (path, line) = reference.rsplit_once(':')?;
        let line = line.parse().ok()?;
        if path.is_empty() {
            return None;
        }
        Some(Self::new(path, line))
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// One translatable message in a single-locale catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Untranslated source text, de-indented. Never empty.
    pub key: String,
    /// Empty until a translator fills it in.
    pub translation: String,
    /// Insertion ordered, no duplicates.
    pub occurrences: Vec<Occurrence>,
    /// Extracted translator comments, sorted and deduplicated.
    pub comments: Vec<String>,
    pub is_format_string: bool,
    pub is_docstring: bool,
}

impl CatalogEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty()
    }

    pub fn add_occurrence(&mut self, occurrence: Occurrence) {
        if !self.occurrences.contains(&occurrence) {
            self.occurrences.push(occurrence);
        }
    }

    pub fn add_comments<I, S>(&mut self, comments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments.extend(comments.into_iter().map(Into::into));
        self.comments.sort();
        self.comments.dedup();
    }

    /// Occurrences in (path, line) order, used when serializing.
    pub fn sorted_occurrences(&self) -> Vec<&Occurrence> {
        let mut sorted: Vec<_> = self.occurrences.iter().collect();
        sorted.sort();
        sorted
    }

    /// Smallest occurrence, which decides the entry's position in the file.
    pub fn first_occurrence(&self) -> Option<&Occurrence> {
        self.occurrences.iter().min()
    }
}
