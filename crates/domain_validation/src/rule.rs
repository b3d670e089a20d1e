//! Rule descriptors
//!
//! A [`Rule`] is plain data: the field it inspects, what kind of check it
//! performs, the message reported on failure, and an optional condition on
//! a sibling field. Rules deserialize from JSON so a rule set can live in
//! configuration as easily as in code.
//!
//! Only `required` rules look at absent values. Every other kind skips a
//! field that is missing, `null`, or blank after trimming; a field that must
//! be present carries its own `required` rule.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::gate::Violation;

static EN_IN_MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((\+?91)|0)?[6-9][0-9]{9}$").expect("en-IN mobile pattern"));

static EN_US_MOBILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((\+1|1)?( |-)?)?(\([2-9][0-9]{2}\)|[2-9][0-9]{2})( |-)?([2-9][0-9]{2}( |-)?[0-9]{4})$")
        .expect("en-US mobile pattern")
});

/// A compiled regular expression that serializes as its source text
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles a pattern
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    /// Wraps an already compiled regex
    pub fn from_regex(regex: Regex) -> Self {
        Self(regex)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl TryFrom<String> for Pattern {
    type Error = regex::Error;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Self::new(&source)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> String {
        pattern.0.as_str().to_string()
    }
}

impl Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::try_from(source).map_err(serde::de::Error::custom)
    }
}

/// Locale used by the phone-number format check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneLocale {
    #[serde(rename = "en-IN")]
    EnIn,
    #[serde(rename = "en-US")]
    EnUs,
}

impl PhoneLocale {
    /// Returns true if `text` is a mobile number in this locale
    pub fn matches(&self, text: &str) -> bool {
        match self {
            PhoneLocale::EnIn => EN_IN_MOBILE.is_match(text),
            PhoneLocale::EnUs => EN_US_MOBILE.is_match(text),
        }
    }
}

impl fmt::Display for PhoneLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneLocale::EnIn => write!(f, "en-IN"),
            PhoneLocale::EnUs => write!(f, "en-US"),
        }
    }
}

/// The check a rule performs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    /// Present and non-empty after trimming
    Required,
    /// Trimmed value matches a regular expression
    Pattern { regex: Pattern },
    /// Trimmed value is a mobile number in the given locale
    Phone { locale: PhoneLocale },
    /// Trimmed value is an ISO-8601 date or date-time, with or without offset
    IsoDate,
    /// Character count within inclusive bounds
    Length {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
    },
    /// Numeric value within inclusive bounds
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    /// Trimmed value is one of a closed set
    OneOf { values: Vec<String> },
}

/// Activates a rule only when a sibling field has a given value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub equals: String,
}

impl Condition {
    fn holds(&self, payload: &Map<String, Value>) -> bool {
        scalar_text(payload.get(&self.field)).as_deref() == Some(self.equals.as_str())
    }
}

/// A field-level constraint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub field: String,
    pub kind: RuleKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<Condition>,
}

impl Rule {
    pub fn new(field: impl Into<String>, kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
            when: None,
        }
    }

    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Required, message)
    }

    pub fn pattern(field: impl Into<String>, regex: Pattern, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Pattern { regex }, message)
    }

    pub fn phone(field: impl Into<String>, locale: PhoneLocale, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Phone { locale }, message)
    }

    pub fn iso_date(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::IsoDate, message)
    }

    pub fn length(field: impl Into<String>, min: usize, max: usize, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Length { min: Some(min), max: Some(max) }, message)
    }

    pub fn max_length(field: impl Into<String>, max: usize, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Length { min: None, max: Some(max) }, message)
    }

    pub fn range(field: impl Into<String>, min: f64, max: f64, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Range { min: Some(min), max: Some(max) }, message)
    }

    pub fn one_of<I, S>(field: impl Into<String>, values: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(field, RuleKind::OneOf { values }, message)
    }

    /// Restricts the rule to payloads where `field` equals `equals`
    pub fn when(mut self, field: impl Into<String>, equals: impl Into<String>) -> Self {
        self.when = Some(Condition {
            field: field.into(),
            equals: equals.into(),
        });
        self
    }

    /// Evaluates the rule against a payload object
    pub fn check(&self, payload: &Map<String, Value>) -> Option<Violation> {
        if let Some(condition) = &self.when {
            if !condition.holds(payload) {
                return None;
            }
        }

        let value = payload.get(&self.field);

        if matches!(self.kind, RuleKind::Required) {
            return is_blank(value).then(|| self.violation());
        }

        if is_blank(value) {
            return None;
        }

        // arrays and objects never satisfy a format rule
        let Some(text) = scalar_text(value) else {
            return Some(self.violation());
        };

        let passed = match &self.kind {
            RuleKind::Required => true,
            RuleKind::Pattern { regex } => regex.is_match(&text),
            RuleKind::Phone { locale } => locale.matches(&text),
            RuleKind::IsoDate => is_iso_date(&text),
            RuleKind::Length { min, max } => {
                let len = text.chars().count();
                min.map_or(true, |min| len >= min) && max.map_or(true, |max| len <= max)
            }
            RuleKind::Range { min, max } => match text.parse::<f64>() {
                Ok(n) if n.is_finite() => {
                    min.map_or(true, |min| n >= min) && max.map_or(true, |max| n <= max)
                }
                _ => false,
            },
            RuleKind::OneOf { values } => values.iter().any(|v| v == &text),
        };

        (!passed).then(|| self.violation())
    }

    fn violation(&self) -> Violation {
        Violation::new(&self.field, &self.message)
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Trimmed text of a scalar value; `None` for null, arrays and objects
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

const LOCAL_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

fn is_iso_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || is_basic_date(text)
        || DateTime::parse_from_rfc3339(text).is_ok()
        || LOCAL_DATE_TIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
}

/// Basic calendar form `YYYYMMDD`
fn is_basic_date(text: &str) -> bool {
    text.len() == 8
        && text.bytes().all(|b| b.is_ascii_digit())
        && NaiveDate::parse_from_str(
            &format!("{}-{}-{}", &text[..4], &text[4..6], &text[6..]),
            "%Y-%m-%d",
        )
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_required_trims_whitespace() {
        let rule = Rule::required("name", "Name is required");
        assert!(rule.check(&object(json!({ "name": "   " }))).is_some());
        assert!(rule.check(&object(json!({ "name": null }))).is_some());
        assert!(rule.check(&object(json!({}))).is_some());
        assert!(rule.check(&object(json!({ "name": " x " }))).is_none());
    }

    #[test]
    fn test_format_rules_skip_absent_values() {
        let rule = Rule::iso_date("date", "Invalid date");
        assert!(rule.check(&object(json!({}))).is_none());
        assert!(rule.check(&object(json!({ "date": "" }))).is_none());
    }

    #[test]
    fn test_non_scalar_fails_format_rule() {
        let rule = Rule::max_length("tags", 10, "Too long");
        assert!(rule.check(&object(json!({ "tags": ["a"] }))).is_some());
    }

    #[test]
    fn test_iso_date_accepts_date_and_datetime() {
        let rule = Rule::iso_date("d", "bad");
        assert!(rule.check(&object(json!({ "d": "2024-02-29" }))).is_none());
        assert!(rule.check(&object(json!({ "d": "2024-02-29T10:15:00Z" }))).is_none());
        assert!(rule.check(&object(json!({ "d": "2023-02-29" }))).is_some());
        assert!(rule.check(&object(json!({ "d": "29/02/2024" }))).is_some());
    }

    #[test]
    fn test_iso_date_accepts_local_and_basic_forms() {
        let rule = Rule::iso_date("d", "bad");
        for valid in [
            "2024-02-29T10:15:00",
            "2024-02-29T10:15",
            "2024-02-29T10:15:00.250",
            "2024-02-29T10:15:00.000Z",
            "2024-02-29T10:15:00+05:30",
            "20240229",
        ] {
            assert!(rule.check(&object(json!({ "d": valid }))).is_none(), "{}", valid);
        }
        for invalid in ["20230229", "2024-02-29T25:00", "2024022", "2024-02-29 10:15x"] {
            assert!(rule.check(&object(json!({ "d": invalid }))).is_some(), "{}", invalid);
        }
    }

    #[test]
    fn test_range_is_inclusive_and_numeric() {
        let rule = Rule::range("qty", 1.0, 10.0, "out of range");
        assert!(rule.check(&object(json!({ "qty": 1 }))).is_none());
        assert!(rule.check(&object(json!({ "qty": "10" }))).is_none());
        assert!(rule.check(&object(json!({ "qty": 11 }))).is_some());
        assert!(rule.check(&object(json!({ "qty": "ten" }))).is_some());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let rule = Rule::length("name", 2, 3, "bad length");
        assert!(rule.check(&object(json!({ "name": "आइए" }))).is_none());
    }

    #[test]
    fn test_phone_locales() {
        assert!(PhoneLocale::EnIn.matches("9876543210"));
        assert!(PhoneLocale::EnIn.matches("+919876543210"));
        assert!(PhoneLocale::EnIn.matches("09876543210"));
        assert!(!PhoneLocale::EnIn.matches("1234567890"));
        assert!(!PhoneLocale::EnIn.matches("98765"));
        assert!(PhoneLocale::EnUs.matches("+1 212-555-0123"));
        assert!(!PhoneLocale::EnUs.matches("012-555-0123"));
    }

    #[test]
    fn test_condition_compares_trimmed_text() {
        let rule = Rule::required("reason", "Reason required").when("action", "reject");
        assert!(rule.check(&object(json!({ "action": " reject " }))).is_some());
        assert!(rule.check(&object(json!({ "action": "approve" }))).is_none());
        assert!(rule.check(&object(json!({}))).is_none());
    }

    #[test]
    fn test_pattern_round_trips_through_json() {
        let rule = Rule::pattern("code", Pattern::new("^A[0-9]+$").unwrap(), "bad code");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["kind"]["type"], "pattern");
        assert_eq!(json["kind"]["regex"], "^A[0-9]+$");

        let back: Rule = serde_json::from_value(json).unwrap();
        assert!(back.check(&object(json!({ "code": "A12" }))).is_none());
        assert!(back.check(&object(json!({ "code": "B12" }))).is_some());
    }

    #[test]
    fn test_invalid_pattern_fails_to_deserialize() {
        let json = json!({ "field": "x", "kind": { "type": "pattern", "regex": "(" }, "message": "m" });
        assert!(serde_json::from_value::<Rule>(json).is_err());
    }
}
