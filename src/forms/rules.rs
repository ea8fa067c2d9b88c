//! Declarative per-field validation rules.
//!
//! Each workflow declares an ordered slice of [`Check`]s. Evaluation first
//! normalizes (trims and HTML-escapes) every named field, then runs all
//! checks in declaration order, collecting every failure. There is no
//! short-circuit across fields: a submission with three bad fields reports
//! all three.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{escape_html, FormData};

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty after trimming.
    Required,
    /// At most this many characters after trimming.
    MaxLen(usize),
    /// Alphanumeric characters only, checked on the escaped value.
    Alphanumeric,
    /// Parses as an ISO-8601 date (`YYYY-MM-DD`). Empty input is skipped.
    IsoDate,
    /// Sanitize-only marker: the field is normalized but never fails.
    Escape,
}

/// A (field, rule, message) triple.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub field: &'static str,
    pub rule: Rule,
    pub message: &'static str,
}

/// A validation failure tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFailure {
    pub field: String,
    pub message: String,
}

/// Normalized form values: trimmed, HTML-escaped, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct NormalizedForm {
    values: HashMap<&'static str, String>,
}

impl NormalizedForm {
    /// Normalized value for a field; empty string if the field was absent.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Normalized value parsed as a date. `None` when absent, empty or
    /// unparseable.
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.value(field), "%Y-%m-%d").ok()
    }
}

/// Run every check against the form. Returns the normalized values together
/// with the ordered list of failures; an empty list means the submission is
/// valid.
pub fn run(form: &FormData, checks: &[Check]) -> (NormalizedForm, Vec<FieldFailure>) {
    let mut norm = NormalizedForm::default();
    for check in checks {
        norm.values
            .entry(check.field)
            .or_insert_with(|| escape_html(form.first(check.field).unwrap_or("").trim()));
    }

    let mut failures = Vec::new();
    for check in checks {
        let value = norm.value(check.field);
        let ok = match check.rule {
            Rule::Required => !value.is_empty(),
            Rule::MaxLen(max) => value.chars().count() <= max,
            Rule::Alphanumeric => value.chars().all(char::is_alphanumeric),
            Rule::IsoDate => {
                value.is_empty() || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
            }
            Rule::Escape => true,
        };
        if !ok {
            failures.push(FieldFailure {
                field: check.field.to_string(),
                message: check.message.to_string(),
            });
        }
    }

    (norm, failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(body: &str) -> FormData {
        FormData::parse(body.as_bytes()).unwrap()
    }

    const CHECKS: &[Check] = &[
        Check {
            field: "first_name",
            rule: Rule::Required,
            message: "First name must be specified.",
        },
        Check {
            field: "first_name",
            rule: Rule::MaxLen(100),
            message: "First name must not exceed 100 characters.",
        },
        Check {
            field: "first_name",
            rule: Rule::Alphanumeric,
            message: "First name has non-alphanumeric characters.",
        },
        Check {
            field: "date_of_birth",
            rule: Rule::IsoDate,
            message: "Invalid date of birth.",
        },
    ];

    #[test]
    fn test_valid_submission_has_no_failures() {
        let (norm, failures) = run(&form("first_name=Ursula&date_of_birth=1929-10-21"), CHECKS);
        assert!(failures.is_empty());
        assert_eq!(norm.value("first_name"), "Ursula");
        assert_eq!(
            norm.date("date_of_birth"),
            NaiveDate::from_ymd_opt(1929, 10, 21)
        );
    }

    #[test]
    fn test_required_fails_on_absent_field() {
        let (_, failures) = run(&form("date_of_birth=1929-10-21"), CHECKS);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "first_name");
        assert_eq!(failures[0].message, "First name must be specified.");
    }

    #[test]
    fn test_required_fails_on_whitespace_only() {
        let (_, failures) = run(&form("first_name=%20%20%20"), CHECKS);
        assert!(failures.iter().any(|f| f.field == "first_name"));
    }

    #[test]
    fn test_max_len() {
        let long = "a".repeat(101);
        let (_, failures) = run(&form(&format!("first_name={}", long)), CHECKS);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message, "First name must not exceed 100 characters.");
    }

    #[test]
    fn test_alphanumeric_rejects_punctuation() {
        let (_, failures) = run(&form("first_name=Jean-Paul"), CHECKS);
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].message,
            "First name has non-alphanumeric characters."
        );
    }

    #[test]
    fn test_alphanumeric_runs_on_escaped_value() {
        // The apostrophe is escaped to an entity before the check runs,
        // so it fails on the entity's punctuation.
        let (norm, failures) = run(&form("first_name=O%27Neil"), CHECKS);
        assert_eq!(norm.value("first_name"), "O&#x27;Neil");
        assert!(failures.iter().any(|f| f.field == "first_name"));
    }

    #[test]
    fn test_empty_date_is_skipped() {
        let (norm, failures) = run(&form("first_name=Ursula&date_of_birth="), CHECKS);
        assert!(failures.is_empty());
        assert_eq!(norm.date("date_of_birth"), None);
    }

    #[test]
    fn test_invalid_date_is_tagged_to_its_field() {
        let (_, failures) = run(&form("first_name=Ursula&date_of_birth=not-a-date"), CHECKS);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "date_of_birth");
        assert_eq!(failures[0].message, "Invalid date of birth.");
    }

    #[test]
    fn test_all_fields_are_checked_in_order() {
        let (_, failures) = run(&form("first_name=x%21&date_of_birth=nope"), CHECKS);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].field, "first_name");
        assert_eq!(failures[1].field, "date_of_birth");
    }

    #[test]
    fn test_escape_rule_never_fails() {
        let checks = &[Check {
            field: "status",
            rule: Rule::Escape,
            message: "",
        }];
        let (norm, failures) = run(&form("status=%3Cweird%3E"), checks);
        assert!(failures.is_empty());
        assert_eq!(norm.value("status"), "&lt;weird&gt;");
    }
}
