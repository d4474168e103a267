//! Built-in field set tables.
//!
//! Pattern order is priority order: patterns anchored on the next label come
//! before catch-all patterns, which would otherwise run into the next field.

use super::fields::{FieldSetSpec, FieldSetVersion, FieldSpec, MatchMode};
use super::lines::{Accept, LineRule};

const FIRST_NAME_GUARD: &[&str] = &["middle", "last", "name"];
const MIDDLE_NAME_GUARD: &[&str] = &["first", "last", "name"];
const LAST_NAME_GUARD: &[&str] = &["name", "any criminal"];

const PIN_CODE: Accept = Accept::Digits { exact: Some(6) };
const PHONE: Accept = Accept::Digits { exact: None };

const NAME_PLACEHOLDERS: &[&str] = &["uploaded document"];

// Catch-all name patterns pick up the next label when labels share a row
const FIRST_NAME_LABEL_WORDS: &[&str] = &["middle", "last"];
const MIDDLE_NAME_LABEL_WORDS: &[&str] = &["last"];

static V1_FIELDS: [FieldSpec; 16] = [
    FieldSpec::new(
        "First Name",
        &[
            r"First Name\s+([A-Z]+)\s+Middle Name",
            r"First Name\s+([A-Z]+)\s+Last Name",
            r"First Name[ \t]*:?[ \t]*\b([A-Z]+)",
        ],
    )
    .discard(FIRST_NAME_LABEL_WORDS),
    FieldSpec::new(
        "Middle Name",
        &[
            r"Middle Name\s+([A-Z]+)\s+Last Name",
            r"Middle Name[ \t]*:?[ \t]*\b([A-Z]+)",
        ],
    )
    .discard(MIDDLE_NAME_LABEL_WORDS),
    FieldSpec::new(
        "Last Name",
        &[
            r"Last Name\s+([A-Z]+)\s+Any",
            r"Last Name[ \t]*:?[ \t]*\b([A-Z]+)",
        ],
    ),
    FieldSpec::new(
        "House Number",
        &[
            r"House Number\s+(.+?)\s+Building Name",
            r"House Number[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new(
        "Building Name",
        &[
            r"Building Name\s+(.+?)\s+Street Name",
            r"Building Name[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new(
        "Street Name",
        &[
            r"Street Name\s+(.+?)\s+Locality",
            r"Street Name[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new(
        "Locality",
        &[
            r"Locality\s+(.+?)\s+Landmark",
            r"Locality[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new(
        "Landmark",
        &[
            r"Landmark\s+(.+?)\s+State/UT",
            r"Landmark[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new(
        "State/UT",
        &[
            r"State/UT\s+(.+?)\s+Division",
            r"State/UT[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new(
        "Division",
        &[
            r"Division\s+(.+?)\s+District",
            r"Division[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new(
        "District",
        &[
            r"District\s+(.+?)\s+Taluka",
            r"District[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new(
        "Taluka",
        &[
            r"Taluka\s+(.+?)\s+Village",
            r"Taluka[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new(
        "Village",
        &[
            r"Village\s+(.+?)\s+Pin Code",
            r"Village[ \t]+([^\n]+)",
        ],
    ),
    FieldSpec::new("Pin Code", &[r"Pin Code\s*:?\s*([0-9]{6})\b"]),
    FieldSpec::new(
        "Office Number",
        &[
            r"Office\s*Mobile\s*Number\s*[:\-]?\s*([0-9]{10})\b",
            r"Office Number\s*[:\-]?\s*([0-9]+)",
        ],
    )
    .column("Contact Details"),
    FieldSpec::new(
        "Website URL",
        &[
            r"Website URL\s+((?:https?://|www\.)\S+)",
            r"Website URL[ \t]+(\S+)",
        ],
    )
    .column("Website"),
];

static V1_RULES: [LineRule; 16] = [
    LineRule::next_line("First Name", "First Name", Accept::NonEmptyWithout(FIRST_NAME_GUARD)),
    LineRule::next_line("Middle Name", "Middle Name", Accept::NonEmptyWithout(MIDDLE_NAME_GUARD)),
    LineRule::next_line("Last Name", "Last Name", Accept::NonEmptyWithout(LAST_NAME_GUARD)),
    LineRule::next_line("House Number", "House Number", Accept::Any),
    LineRule::next_line("Building Name", "Building Name", Accept::Any),
    LineRule::next_line("Street Name", "Street Name", Accept::Any),
    LineRule::next_line("Locality", "Locality", Accept::Any),
    LineRule::next_line("Landmark", "Landmark", Accept::Any),
    LineRule::next_line("State/UT", "State/UT", Accept::Any),
    LineRule::next_line("Division", "Division", Accept::Any),
    LineRule::next_line("District", "District", Accept::Any),
    LineRule::next_line("Taluka", "Taluka", Accept::Any),
    LineRule::next_line("Village", "Village", Accept::Any),
    LineRule::next_line("Pin Code", "Pin Code", PIN_CODE),
    LineRule::next_line("Office Number", "Office Number", PHONE),
    LineRule::next_line("Website URL", "Website URL", Accept::Any),
];

/// First/Middle/Last Name layout. Values may wrap across lines.
pub static V1: FieldSetSpec = FieldSetSpec {
    version: FieldSetVersion::V1,
    mode: MatchMode::DotAll,
    fields: &V1_FIELDS,
    line_rules: &V1_RULES,
};

static V2_FIELDS: [FieldSpec; 17] = [
    FieldSpec::new("Name", &[r"^[ \t]*Name[ \t]+(.+)$"]).discard(NAME_PLACEHOLDERS),
    FieldSpec::new(
        "First Name",
        &[
            r"First Name\s+([A-Z]+)\s+Middle Name",
            r"^[ \t]*First Name[ \t]*:?[ \t]*\b([A-Z]+)[ \t]*$",
        ],
    )
    .discard(FIRST_NAME_LABEL_WORDS),
    FieldSpec::new(
        "Middle Name",
        &[
            r"Middle Name\s+([A-Z]+)\s+Last Name",
            r"^[ \t]*Middle Name[ \t]*:?[ \t]*\b([A-Z]+)[ \t]*$",
        ],
    )
    .discard(MIDDLE_NAME_LABEL_WORDS),
    FieldSpec::new(
        "Last Name",
        &[
            r"Last Name\s+([A-Z]+)\s+Any",
            r"^[ \t]*Last Name[ \t]*:?[ \t]*\b([A-Z]+)[ \t]*$",
        ],
    ),
    FieldSpec::new(
        "House Number",
        &[
            r"House Number[ \t]*:?[ \t]*(.+?)[ \t]+Building Name",
            r"House Number[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new(
        "Building Name",
        &[
            r"Building Name[ \t]*:?[ \t]*(.+?)[ \t]+Street Name",
            r"Building Name[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new(
        "Street Name",
        &[
            r"Street Name[ \t]*:?[ \t]*(.+?)[ \t]+Locality",
            r"Street Name[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new(
        "Locality",
        &[
            r"Locality[ \t]*:?[ \t]*(.+?)[ \t]+Landmark",
            r"Locality[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new(
        "Landmark",
        &[
            r"Landmark[ \t]*:?[ \t]*(.+?)[ \t]+State/UT",
            r"Landmark[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new(
        "State/UT",
        &[
            r"State/UT[ \t]*:?[ \t]*(.+?)[ \t]+Division",
            r"State/UT[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new(
        "Division",
        &[
            r"Division[ \t]*:?[ \t]*(.+?)[ \t]+District",
            r"Division[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new(
        "District",
        &[
            r"District[ \t]*:?[ \t]*(.+?)[ \t]+Taluka",
            r"District[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new(
        "Taluka",
        &[
            r"Taluka[ \t]*:?[ \t]*(.+?)[ \t]+Village",
            r"Taluka[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new(
        "Village",
        &[
            r"Village[ \t]*:?[ \t]*(.+?)[ \t]+Pin Code",
            r"Village[ \t]*:?[ \t]+(.+)$",
        ],
    ),
    FieldSpec::new("Pin Code", &[r"Pin Code\s*:?\s*([0-9]{6})\b"]),
    FieldSpec::new(
        "Contact Number",
        &[
            r"Contact Number[ \t]*[:\-]?[ \t]*([0-9]{10})\b",
            r"Contact Number[ \t]*[:\-]?[ \t]*([0-9]+)",
            r"Mobile\s*Number[ \t]*[:\-]?[ \t]*([0-9]{10})\b",
        ],
    ),
    FieldSpec::new(
        "Website URL",
        &[
            r"Website URL\s+((?:https?://|www\.)\S+)",
            r"^[ \t]*Website URL[ \t]+(\S+)",
        ],
    )
    .column("Website"),
];

static V2_RULES: [LineRule; 17] = [
    LineRule::same_line("Name", "Name", NAME_PLACEHOLDERS),
    LineRule::next_line("First Name", "First Name", Accept::NonEmptyWithout(FIRST_NAME_GUARD)),
    LineRule::next_line("Middle Name", "Middle Name", Accept::NonEmptyWithout(MIDDLE_NAME_GUARD)),
    LineRule::next_line("Last Name", "Last Name", Accept::NonEmptyWithout(LAST_NAME_GUARD)),
    LineRule::next_line("House Number", "House Number", Accept::Any),
    LineRule::next_line("Building Name", "Building Name", Accept::Any),
    LineRule::next_line("Street Name", "Street Name", Accept::Any),
    LineRule::next_line("Locality", "Locality", Accept::Any),
    LineRule::next_line("Landmark", "Landmark", Accept::Any),
    LineRule::next_line("State/UT", "State/UT", Accept::Any),
    LineRule::next_line("Division", "Division", Accept::Any),
    LineRule::next_line("District", "District", Accept::Any),
    LineRule::next_line("Taluka", "Taluka", Accept::Any),
    LineRule::next_line("Village", "Village", Accept::Any),
    LineRule::next_line("Pin Code", "Pin Code", PIN_CODE),
    LineRule::next_line("Contact Number", "Contact Number", PHONE),
    LineRule::next_line("Website URL", "Website URL", Accept::Any),
];

/// V1 plus a free-text Name line; values are expected on their label's line.
pub static V2: FieldSetSpec = FieldSetSpec {
    version: FieldSetVersion::V2,
    mode: MatchMode::LineAnchored,
    fields: &V2_FIELDS,
    line_rules: &V2_RULES,
};
