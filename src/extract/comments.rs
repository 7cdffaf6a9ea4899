//! Line index of a file's comments.
//!
//! Built once per file from the comments swc collected while parsing, then
//! consulted by the scanner to attach translator comments to messages and
//! to find the documentation block of a decorated class.

use std::collections::HashMap;

use swc_common::{SourceMap, comments::CommentKind};

use crate::extract::parser::ExtractedComments;

/// A `/** ... */` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    pub start_line: usize,
    /// Comment text without the `/*` and `*/` delimiters.
    pub text: String,
}

#[derive(Debug, Default)]
pub struct LineComments {
    /// Ordinary comments keyed by the line they start on.
    by_line: HashMap<usize, Vec<String>>,
    /// Documentation blocks keyed by the line they end on.
    docs: HashMap<usize, DocBlock>,
}

impl LineComments {
    pub fn collect(comments: &ExtractedComments, source_map: &SourceMap) -> Self {
        let mut index = Self::default();

        for comment in comments.iter() {
            let start_line = source_map.lookup_char_pos(comment.span.lo).line;
            let is_doc = matches!(comment.kind, CommentKind::Block)
                && comment.text.starts_with('*')
                && !comment.text.starts_with("**");

            if is_doc {
                let end_line = source_map.lookup_char_pos(comment.span.hi).line;
                index.docs.insert(
                    end_line,
                    DocBlock {
                        start_line,
                        text: comment.text.to_string(),
                    },
                );
                continue;
            }

            // Block comments spanning lines become one line of text.
            let text = comment.text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                index.by_line.entry(start_line).or_default().push(text);
            }
        }

        index
    }

    /// Comments found on any of `lines`, deduplicated and sorted.
    pub fn on_lines(&self, lines: &[usize]) -> Vec<String> {
        let mut found: Vec<String> = lines
            .iter()
            .filter_map(|line| self.by_line.get(line))
            .flatten()
            .cloned()
            .collect();
        found.sort();
        found.dedup();
        found
    }

    /// Documentation block ending on `line`.
    pub fn doc_ending_at(&self, line: usize) -> Option<&DocBlock> {
        self.docs.get(&line)
    }
}
