//! AST visitor that finds translatable literals in one source file.
//!
//! Two shapes produce messages:
//!
//! ```ts
//! // call sites of the translation entry point
//! _("Hello {name}");
//! ctx._("Bye", { locale: "en-US" });
//!
//! // classes carrying the localizable marker
//! @localizable({ name: "info", description: "Bot information" })
//! class InfoCommands {}
//!
//! /** Uptime commands. */
//! @localizable
//! class UptimeCommands {}
//! ```
//!
//! A call site with any other argument shape is reported as a [`ScanIssue`]
//! and skipped; scanning continues with the rest of the file.

use std::fmt;

use swc_common::{SourceMap, SourceMapper, Span};
use swc_ecma_ast::{
    CallExpr, Callee, Class, Decorator, Expr, ExprOrSpread, Lit, MemberProp, Module, ObjectLit,
    Prop, PropName, PropOrSpread,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::extract::comments::LineComments;
use crate::extract::parser::ParsedSource;
use crate::extract::text::{clean_doc_comment, dedent, is_format_string};

/// Option names accepted in the trailing object of an entry-point call:
/// an explicit locale, "return every locale", and "use the guild locale".
pub const CALL_OPTIONS: &[&str] = &["locale", "all", "guild"];

/// Which identifiers the scanner treats as translation markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRules {
    /// Callee names of the translation entry point (`_`).
    pub entry_points: Vec<String>,
    /// Decorator names marking a localizable class (`localizable`).
    pub markers: Vec<String>,
    /// Marker properties holding translatable text (`name`, `description`).
    pub marker_fields: Vec<String>,
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            entry_points: vec!["_".to_string()],
            markers: vec!["localizable".to_string()],
            marker_fields: vec!["name".to_string(), "description".to_string()],
        }
    }
}

/// A message found in source, before it becomes a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedEntry {
    pub literal: String,
    pub line: usize,
    pub comments: Vec<String>,
    pub is_format: bool,
    pub is_docstring: bool,
}

/// An entry-point call the scanner could not extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanIssue {
    pub file_path: String,
    pub line: usize,
    pub message: String,
    pub snippet: String,
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file_path, self.line, self.message)?;
        if !self.snippet.is_empty() {
            write!(f, "\n    {}", self.snippet)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FileScan {
    pub entries: Vec<ScannedEntry>,
    pub issues: Vec<ScanIssue>,
}

/// Scan a parsed file.
pub fn scan_source(parsed: &ParsedSource, file_path: &str, rules: &ScanRules) -> FileScan {
    let comments = LineComments::collect(&parsed.comments, &parsed.source_map);
    SourceScanner::new(file_path, &parsed.source_map, &comments, rules).scan(&parsed.module)
}

pub struct SourceScanner<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    comments: &'a LineComments,
    rules: &'a ScanRules,
    entries: Vec<ScannedEntry>,
    issues: Vec<ScanIssue>,
}

impl<'a> SourceScanner<'a> {
    pub fn new(
        file_path: &'a str,
        source_map: &'a SourceMap,
        comments: &'a LineComments,
        rules: &'a ScanRules,
    ) -> Self {
        Self {
            file_path,
            source_map,
            comments,
            rules,
            entries: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn scan(mut self, module: &Module) -> FileScan {
        self.visit_module(module);
        FileScan {
            entries: self.entries,
            issues: self.issues,
        }
    }

    fn line_of(&self, span: Span) -> usize {
        self.source_map.lookup_char_pos(span.lo).line
    }

    fn report(&mut self, span: Span, message: impl Into<String>) {
        let snippet = self.source_map.span_to_snippet(span).unwrap_or_default();
        self.issues.push(ScanIssue {
            file_path: self.file_path.to_string(),
            line: self.line_of(span),
            message: message.into(),
            snippet,
        });
    }

    fn record(&mut self, literal: &str, line: usize, comment_lines: &[usize], is_docstring: bool) {
        let literal = if is_docstring {
            clean_doc_comment(literal)
        } else {
            dedent(literal)
        };
        if literal.is_empty() {
            return;
        }
        self.entries.push(ScannedEntry {
            is_format: is_format_string(&literal),
            comments: self.comments.on_lines(comment_lines),
            literal,
            line,
            is_docstring,
        });
    }

    fn is_entry_callee(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Ident(ident) => self.rules.entry_points.iter().any(|e| *e == *ident.sym),
            Expr::Member(member) => match &member.prop {
                MemberProp::Ident(prop) => self.rules.entry_points.iter().any(|e| *e == *prop.sym),
                _ => false,
            },
            _ => false,
        }
    }

    fn is_marker(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Ident(ident) => self.rules.markers.iter().any(|m| *m == *ident.sym),
            Expr::Member(member) => match &member.prop {
                MemberProp::Ident(prop) => self.rules.markers.iter().any(|m| *m == *prop.sym),
                _ => false,
            },
            _ => false,
        }
    }

    /// Validate the argument shape of an entry-point call and record its
    /// literal.
    fn check_call(&mut self, call: &CallExpr) {
        if call.args.iter().any(|arg| arg.spread.is_some()) {
            self.report(call.span, "spread arguments cannot be extracted");
            return;
        }

        let trailing_options = match call.args.as_slice() {
            [_, second] => match &*second.expr {
                Expr::Object(options) => Some(options),
                _ => None,
            },
            _ => None,
        };

        let (first, options) = match (call.args.as_slice(), trailing_options) {
            ([first], _) => (first, None),
            ([first, _], Some(options)) => (first, Some(options)),
            (args, _) => {
                let positional = args
                    .iter()
                    .filter(|arg| !matches!(&*arg.expr, Expr::Object(_)))
                    .count();
                self.report(
                    call.span,
                    format!(
                        "expected exactly one positional argument, found {}",
                        positional
                    ),
                );
                return;
            }
        };

        if let Some(options) = options
            && let Some(message) = self.check_options(options)
        {
            self.report(call.span, message);
            return;
        }

        let Some((literal, literal_span)) = string_literal(&first.expr) else {
            self.report(call.span, "the positional argument must be a string literal");
            return;
        };

        let call_line = self.line_of(call.span);
        let literal_line = self.line_of(literal_span);
        self.record(&literal, call_line, &[call_line, literal_line], false);
    }

    /// Returns a message for the first option that is not recognized.
    fn check_options(&self, options: &ObjectLit) -> Option<String> {
        for prop in &options.props {
            let name = match prop {
                PropOrSpread::Spread(_) => {
                    return Some("spread in options cannot be checked".to_string());
                }
                PropOrSpread::Prop(prop) => match &**prop {
                    Prop::KeyValue(kv) => prop_name(&kv.key),
                    Prop::Shorthand(ident) => Some(ident.sym.to_string()),
                    _ => None,
                },
            };
            match name {
                Some(name) if CALL_OPTIONS.contains(&name.as_str()) => {}
                Some(name) => return Some(format!("unexpected keyword argument `{}`", name)),
                None => return Some("unsupported property in options".to_string()),
            }
        }
        None
    }

    /// Extract the marker's named fields, or the class documentation when
    /// the marker names none.
    fn check_class(&mut self, class: &Class) {
        let Some(decorator) = class.decorators.iter().find(|d| self.marker_args(d).is_some()) else {
            return;
        };

        let mut found = false;
        if let Some(Some(ExprOrSpread { expr, .. })) = self.marker_args(decorator).map(|a| a.first())
            && let Expr::Object(fields) = &**expr
        {
            for prop in &fields.props {
                let PropOrSpread::Prop(prop) = prop else {
                    continue;
                };
                let Prop::KeyValue(kv) = &**prop else {
                    continue;
                };
                let Some(name) = prop_name(&kv.key) else {
                    continue;
                };
                if !self.rules.marker_fields.contains(&name) {
                    continue;
                }
                if let Some((literal, span)) = string_literal(&kv.value) {
                    let line = self.line_of(span);
                    self.record(&literal, line, &[line], false);
                    found = true;
                }
            }
        }

        if found {
            return;
        }

        let start_line = class
            .decorators
            .iter()
            .map(|d| self.line_of(d.span))
            .chain([self.line_of(class.span)])
            .min()
            .unwrap_or_default();
        let doc = self
            .comments
            .doc_ending_at(start_line.saturating_sub(1))
            .or_else(|| self.comments.doc_ending_at(start_line))
            .cloned();
        if let Some(doc) = doc {
            self.record(&doc.text, doc.start_line, &[], true);
        }
    }

    /// Arguments of a marker decorator: empty for the bare form, `None` when
    /// the decorator is not a marker.
    fn marker_args<'d>(&self, decorator: &'d Decorator) -> Option<&'d [ExprOrSpread]> {
        match &*decorator.expr {
            Expr::Call(CallExpr {
                callee: Callee::Expr(callee),
                args,
                ..
            }) if self.is_marker(callee) => Some(args.as_slice()),
            expr if self.is_marker(expr) => Some(&[]),
            _ => None,
        }
    }
}

impl Visit for SourceScanner<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && self.is_entry_callee(callee)
        {
            self.check_call(node);
        }
        node.visit_children_with(self);
    }

    fn visit_class(&mut self, node: &Class) {
        self.check_class(node);
        node.visit_children_with(self);
    }
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(str::to_string),
        _ => None,
    }
}

/// A plain string or a template literal without substitutions.
fn string_literal(expr: &Expr) -> Option<(String, Span)> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|v| (v.to_string(), s.span)),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
            let quasi = tpl.quasis.first()?;
            let cooked = quasi.cooked.as_ref()?.as_str()?;
            Some((cooked.to_string(), tpl.span))
        }
        Expr::Paren(paren) => string_literal(&paren.expr),
        _ => None,
    }
}
