//! Validation passes. Pure logic, no I/O.
//!
//! A submission is checked by two independent passes:
//!
//! 1. [`validate_required`] walks the fields that must pass. Email and phone
//!    fields get their format check directly (an empty value is `Invalid`,
//!    not `Blank`); every other field only needs to be non-blank.
//! 2. [`validate_catalogue`] walks the whole catalogue and applies the type
//!    rule to every field that carries a non-blank value, required or not.
//!    Only `string`, `date` and `integer` react here. Dates are normalized in
//!    place.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

use super::rules::{ErrorKind, FieldErrors, ValidationContext};
use crate::catalogue::{FieldCatalogue, FieldType};
use crate::types::{is_blank, FieldValues};

// ASCII-only classes (`-u`): `\w`, `\d` and case folding never match
// non-ASCII letters or digits.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)\A[\w+\-.]+@[a-z\d\-]+(\.[a-z\d\-]+)*\.[a-z]+\z").expect("valid regex")
});

/// Canonical stored form of a parsed date.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-first formats come before month-name ones; the first match wins.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

// ---------------------------------------------------------------------------
// Type rules
// ---------------------------------------------------------------------------

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Parse a calendar date from the accepted input forms.
///
/// Years outside `0..=9999` are rejected so the canonical form always
/// parses back to the same date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    let date = parse_compact_date(value)
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))?;

    (0..=9999).contains(&date.year()).then_some(date)
}

/// `YYYYMMDD` with no separators.
fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Strict integer syntax: optional sign, then digits. Surrounding whitespace
/// and single `_` separators between digits are tolerated; decimals and
/// trailing characters are not.
pub fn is_integer(value: &str) -> bool {
    let value = value.trim();
    let digits = value
        .strip_prefix(['+', '-'])
        .unwrap_or(value);

    !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c.is_ascii_digit() || c == '_')
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

/// Required-field pass over `validatable`.
///
/// A field counts as email/phone when the catalogue declares it so or when it
/// is literally named `email`/`phone`. An absent field is treated as blank.
pub fn validate_required(
    validatable: &[String],
    values: &FieldValues,
    catalogue: &FieldCatalogue,
    ctx: &ValidationContext<'_>,
    errors: &mut FieldErrors,
) {
    for field in validatable {
        let value = values.get(field).map(String::as_str).unwrap_or_default();

        match required_rule(field, catalogue) {
            FieldType::Email => {
                if !is_valid_email(value) {
                    ctx.reject(errors, field, ErrorKind::Invalid);
                }
            }
            FieldType::Phone => {
                if !ctx.phone.is_valid(value) {
                    ctx.reject(errors, field, ErrorKind::Invalid);
                }
            }
            FieldType::String | FieldType::Date | FieldType::Integer => {
                if is_blank(value) {
                    ctx.reject(errors, field, ErrorKind::Blank);
                }
            }
        }
    }
}

/// Rule a field is checked with in the required pass. Also drives the
/// input hint, so a field validated as a phone is hinted as one.
pub fn required_rule(field: &str, catalogue: &FieldCatalogue) -> FieldType {
    match (field, catalogue.field_type(field)) {
        (_, Some(FieldType::Email)) | ("email", _) => FieldType::Email,
        (_, Some(FieldType::Phone)) | ("phone", _) => FieldType::Phone,
        (_, Some(other)) => other,
        (_, None) => FieldType::String,
    }
}

/// Catalogue pass: type rules for every catalogue field that holds a
/// non-blank value. Blank optional fields are skipped silently.
pub fn validate_catalogue(
    values: &mut FieldValues,
    catalogue: &FieldCatalogue,
    ctx: &ValidationContext<'_>,
    errors: &mut FieldErrors,
) {
    for spec in catalogue.specs() {
        let present = values.get(&spec.name).is_some_and(|v| !is_blank(v));
        if present {
            validate_field_with(&spec.name, spec.field_type, values, ctx, errors);
        }
    }
}

/// Apply the catalogue-pass rule for `field_type` to one stored value.
///
/// Successfully parsed dates are rewritten in canonical form. Email and phone
/// are checked by the required-field pass only.
pub fn validate_field_with(
    name: &str,
    field_type: FieldType,
    values: &mut FieldValues,
    ctx: &ValidationContext<'_>,
    errors: &mut FieldErrors,
) {
    let Some(value) = values.get_mut(name) else {
        return;
    };

    match field_type {
        FieldType::String | FieldType::Email | FieldType::Phone => {}
        FieldType::Date => match parse_date(value) {
            Some(date) => *value = date.format(CANONICAL_DATE_FORMAT).to_string(),
            None => ctx.reject(errors, name, ErrorKind::Invalid),
        },
        FieldType::Integer => {
            if !is_integer(value) {
                ctx.reject(errors, name, ErrorKind::Invalid);
            }
        }
    }
}
