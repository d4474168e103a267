//! Field definitions and versioned field sets.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::lines::LineRule;
use super::sets;
use crate::error::ExtractionError;

/// Field set variants. Each version fixes its fields, patterns, regex mode
/// and heuristic rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSetVersion {
    /// First/Middle/Last Name, Office Number written as "Contact Details".
    #[default]
    V1,
    /// V1 plus a free-text Name field, with Contact Number.
    V2,
}

impl FieldSetVersion {
    pub const ALL: [FieldSetVersion; 2] = [FieldSetVersion::V1, FieldSetVersion::V2];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldSetVersion::V1 => "v1",
            FieldSetVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for FieldSetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldSetVersion {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" | "1" => Ok(FieldSetVersion::V1),
            "v2" | "2" => Ok(FieldSetVersion::V2),
            other => Err(ExtractionError::UnknownFieldSet(other.to_string())),
        }
    }
}

/// How a field set's patterns treat line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// `.` matches newlines, so captures may span wrapped lines.
    DotAll,
    /// `^`/`$` match at line boundaries, `.` stops at newlines.
    LineAnchored,
}

/// Uncompiled description of one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Canonical field name, also the label heuristics key on.
    pub name: &'static str,
    /// Output column name.
    pub column: &'static str,
    /// Patterns in priority order, each with exactly one capture group.
    pub patterns: &'static [&'static str],
    /// Normalized values that mean "nothing was filled in" (case-insensitive).
    pub discard: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(name: &'static str, patterns: &'static [&'static str]) -> Self {
        Self {
            name,
            column: name,
            patterns,
            discard: &[],
        }
    }

    /// Write this field under a different column name.
    pub const fn column(mut self, column: &'static str) -> Self {
        self.column = column;
        self
    }

    pub const fn discard(mut self, values: &'static [&'static str]) -> Self {
        self.discard = values;
        self
    }
}

/// Uncompiled description of a field set.
#[derive(Debug, Clone, Copy)]
pub struct FieldSetSpec {
    pub version: FieldSetVersion,
    pub mode: MatchMode,
    pub fields: &'static [FieldSpec],
    pub line_rules: &'static [LineRule],
}

/// A compiled field: name, column and ordered patterns.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    name: &'static str,
    column: &'static str,
    patterns: Vec<Regex>,
    discard: &'static [&'static str],
}

impl FieldDefinition {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    /// Patterns in the order they are tried.
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// Whether a normalized value is a known "not filled in" placeholder.
    pub fn is_discarded(&self, value: &str) -> bool {
        self.discard.iter().any(|d| d.eq_ignore_ascii_case(value))
    }
}

/// A compiled, immutable field set.
#[derive(Debug, Clone)]
pub struct FieldSet {
    version: FieldSetVersion,
    mode: MatchMode,
    fields: Vec<FieldDefinition>,
    line_rules: Vec<LineRule>,
}

lazy_static! {
    static ref V1_FIELDS: FieldSet =
        FieldSet::compile(&sets::V1).expect("built-in v1 field set must compile");
    static ref V2_FIELDS: FieldSet =
        FieldSet::compile(&sets::V2).expect("built-in v2 field set must compile");
}

impl FieldSet {
    /// Shared built-in field set for a version.
    pub fn builtin(version: FieldSetVersion) -> &'static FieldSet {
        match version {
            FieldSetVersion::V1 => &V1_FIELDS,
            FieldSetVersion::V2 => &V2_FIELDS,
        }
    }

    /// Compile a field set, applying its match mode to every pattern.
    pub fn compile(spec: &FieldSetSpec) -> Result<Self, ExtractionError> {
        let mut fields = Vec::with_capacity(spec.fields.len());

        for field in spec.fields {
            let mut patterns = Vec::with_capacity(field.patterns.len());
            for pattern in field.patterns {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .dot_matches_new_line(spec.mode == MatchMode::DotAll)
                    .multi_line(spec.mode == MatchMode::LineAnchored)
                    .build()
                    .map_err(|e| ExtractionError::InvalidPattern {
                        field: field.name.to_string(),
                        reason: e.to_string(),
                    })?;

                // captures_len counts the implicit whole-match group
                let groups = regex.captures_len() - 1;
                if groups != 1 {
                    return Err(ExtractionError::CaptureGroups {
                        field: field.name.to_string(),
                        found: groups,
                    });
                }
                patterns.push(regex);
            }

            fields.push(FieldDefinition {
                name: field.name,
                column: field.column,
                patterns,
                discard: field.discard,
            });
        }

        for rule in spec.line_rules {
            if !fields.iter().any(|f| f.name == rule.field) {
                return Err(ExtractionError::UnknownField(rule.field.to_string()));
            }
        }

        Ok(Self {
            version: spec.version,
            mode: spec.mode,
            fields,
            line_rules: spec.line_rules.to_vec(),
        })
    }

    pub fn version(&self) -> FieldSetVersion {
        self.version
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Fields in output order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Heuristic rules in the order they are tried against each line.
    pub fn line_rules(&self) -> &[LineRule] {
        &self.line_rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::lines::Accept;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_sets_compile() {
        for version in FieldSetVersion::ALL {
            let set = FieldSet::builtin(version);
            assert_eq!(set.version(), version);
            assert!(set.field("Pin Code").is_some());
        }
    }

    #[test]
    fn test_builtin_columns() {
        let v1: Vec<_> = FieldSet::builtin(FieldSetVersion::V1)
            .fields()
            .iter()
            .map(|f| f.column())
            .collect();
        assert_eq!(
            v1,
            vec![
                "First Name", "Middle Name", "Last Name", "House Number", "Building Name",
                "Street Name", "Locality", "Landmark", "State/UT", "Division", "District",
                "Taluka", "Village", "Pin Code", "Contact Details", "Website",
            ]
        );

        let v2 = FieldSet::builtin(FieldSetVersion::V2);
        assert_eq!(v2.fields()[0].name(), "Name");
        assert_eq!(v2.field("Contact Number").map(|f| f.column()), Some("Contact Number"));
        assert_eq!(v2.mode(), MatchMode::LineAnchored);
    }

    #[test]
    fn test_version_from_str() {
        assert_eq!("V2".parse::<FieldSetVersion>().unwrap(), FieldSetVersion::V2);
        assert_eq!("1".parse::<FieldSetVersion>().unwrap(), FieldSetVersion::V1);
        assert!(matches!(
            "v9".parse::<FieldSetVersion>(),
            Err(ExtractionError::UnknownFieldSet(name)) if name == "v9"
        ));
    }

    #[test]
    fn test_compile_rejects_extra_groups() {
        static FIELDS: [FieldSpec; 1] = [FieldSpec::new("Pin Code", &[r"(Pin) Code\s+(\d{6})"])];
        let spec = FieldSetSpec {
            version: FieldSetVersion::V1,
            mode: MatchMode::DotAll,
            fields: &FIELDS,
            line_rules: &[],
        };

        assert!(matches!(
            FieldSet::compile(&spec),
            Err(ExtractionError::CaptureGroups { found: 2, .. })
        ));
    }

    #[test]
    fn test_compile_rejects_bad_regex() {
        static FIELDS: [FieldSpec; 1] = [FieldSpec::new("District", &[r"District\s+([^\n]+"])];
        let spec = FieldSetSpec {
            version: FieldSetVersion::V1,
            mode: MatchMode::DotAll,
            fields: &FIELDS,
            line_rules: &[],
        };

        assert!(matches!(
            FieldSet::compile(&spec),
            Err(ExtractionError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_rule_for_unknown_field() {
        static FIELDS: [FieldSpec; 1] = [FieldSpec::new("District", &[r"District\s+([^\n]+)"])];
        static RULES: [LineRule; 1] = [LineRule::next_line("Taluka", "Taluka", Accept::Any)];
        let spec = FieldSetSpec {
            version: FieldSetVersion::V1,
            mode: MatchMode::DotAll,
            fields: &FIELDS,
            line_rules: &RULES,
        };

        assert!(matches!(
            FieldSet::compile(&spec),
            Err(ExtractionError::UnknownField(name)) if name == "Taluka"
        ));
    }
}
