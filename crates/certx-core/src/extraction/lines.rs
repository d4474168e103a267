//! Line-by-line label heuristics.
//!
//! Each [`LineRule`] names a label, how the label is recognized on a line and
//! where the value is taken from. Rules are tried in table order; the first
//! rule whose label matches a line owns that line, whether or not it accepts
//! a value.

use std::collections::HashMap;

use tracing::trace;

use super::{FieldExtractor, FieldMap, FieldSet};
use crate::pdf::DocumentText;

/// Digit runs shorter than this are never taken from a label line.
pub const LABEL_LINE_MIN_DIGITS: usize = 6;

/// How a label is recognized on a trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    /// Label appears anywhere on the line.
    Contains,
    /// Line starts with the label, followed by whitespace or end of line.
    StartsWith,
}

/// Acceptance test for a lookahead candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// Take the line as is.
    Any,
    /// Reject empty lines and lines containing any of these tokens
    /// (case-insensitive).
    NonEmptyWithout(&'static [&'static str]),
    /// Line must be all digits, exactly `exact` of them when set. Otherwise
    /// the label line itself is scanned for a digit run.
    Digits { exact: Option<usize> },
}

/// Where the value of a recognized label comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// The line `offset` lines below the label.
    NextLine { offset: usize, accept: Accept },
    /// The rest of the label line, unless it is one of the placeholders.
    SameLine { placeholders: &'static [&'static str] },
}

/// One row of the heuristic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRule {
    pub field: &'static str,
    pub label: &'static str,
    pub matcher: LabelMatch,
    pub capture: Capture,
}

impl LineRule {
    /// Label anywhere on the line, value on the next line.
    pub const fn next_line(field: &'static str, label: &'static str, accept: Accept) -> Self {
        Self {
            field,
            label,
            matcher: LabelMatch::Contains,
            capture: Capture::NextLine { offset: 1, accept },
        }
    }

    /// Line starts with the label, value is the rest of that line.
    pub const fn same_line(
        field: &'static str,
        label: &'static str,
        placeholders: &'static [&'static str],
    ) -> Self {
        Self {
            field,
            label,
            matcher: LabelMatch::StartsWith,
            capture: Capture::SameLine { placeholders },
        }
    }

    /// Whether this rule's label is on the (trimmed) line.
    pub fn matches(&self, line: &str) -> bool {
        match self.matcher {
            LabelMatch::Contains => line.contains(self.label),
            LabelMatch::StartsWith => line
                .strip_prefix(self.label)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace)),
        }
    }

    /// Value for a label found on `lines[index]`, if the rule accepts one.
    pub fn capture(&self, lines: &[String], index: usize) -> Option<String> {
        let line = lines[index].trim();

        match self.capture {
            Capture::SameLine { placeholders } => {
                let rest = line
                    .find(self.label)
                    .map(|pos| line[pos + self.label.len()..].trim())?;

                if rest.is_empty() || placeholders.iter().any(|p| p.eq_ignore_ascii_case(rest)) {
                    None
                } else {
                    Some(rest.to_string())
                }
            }
            Capture::NextLine { offset, accept } => {
                let candidate = lines.get(index + offset).map(|l| l.trim());

                match accept {
                    Accept::Any => candidate.map(str::to_string),
                    Accept::NonEmptyWithout(tokens) => candidate
                        .filter(|c| !c.is_empty())
                        .filter(|c| {
                            let lower = c.to_lowercase();
                            !tokens.iter().any(|t| lower.contains(t))
                        })
                        .map(str::to_string),
                    Accept::Digits { exact } => candidate
                        .filter(|c| is_digit_value(c, exact))
                        .map(str::to_string)
                        .or_else(|| digit_run(line, exact)),
                }
            }
        }
    }
}

fn is_digit_value(candidate: &str, exact: Option<usize>) -> bool {
    !candidate.is_empty()
        && candidate.chars().all(|c| c.is_ascii_digit())
        && exact.is_none_or(|n| candidate.len() == n)
}

/// First run of at least [`LABEL_LINE_MIN_DIGITS`] digits (exactly `exact`
/// when set) on a line.
fn digit_run(line: &str, exact: Option<usize>) -> Option<String> {
    line.split(|c: char| !c.is_ascii_digit())
        .filter(|run| run.len() >= LABEL_LINE_MIN_DIGITS)
        .find(|run| exact.is_none_or(|n| run.len() == n))
        .map(str::to_string)
}

/// Runs a rule table over the lines of a document.
pub struct LineHeuristicExtractor<'a> {
    rules: &'a [LineRule],
}

impl<'a> LineHeuristicExtractor<'a> {
    pub fn new(field_set: &'a FieldSet) -> Self {
        Self::with_rules(field_set.line_rules())
    }

    pub fn with_rules(rules: &'a [LineRule]) -> Self {
        Self { rules }
    }

    /// Map of field name to value for every label found and accepted.
    /// When a field is found more than once, the last accepted value wins.
    pub fn extract_lines(&self, lines: &[String]) -> FieldMap {
        let mut found = HashMap::new();

        for (index, line) in lines.iter().enumerate() {
            let line = line.trim();
            let Some(rule) = self.rules.iter().find(|r| r.matches(line)) else {
                continue;
            };

            match rule.capture(lines, index) {
                Some(value) => {
                    trace!("Line {}: {} -> '{}'", index + 1, rule.field, value);
                    found.insert(rule.field.to_string(), value);
                }
                None => trace!("Line {}: {} label without a usable value", index + 1, rule.field),
            }
        }

        found
    }
}

impl FieldExtractor for LineHeuristicExtractor<'_> {
    fn extract(&self, text: &DocumentText) -> FieldMap {
        self.extract_lines(text.lines())
    }
}
