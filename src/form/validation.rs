//! Validation engine: evaluates a schema's rules against form values.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::schema::{FieldDescriptor, FieldKind, FormSchema, Rule};
use super::values::FormValues;

/// Shown when a descriptor has no message for a failing error code.
pub const UNDEFINED_MESSAGE: &str = "undefined";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid hardcoded regex"));

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCode {
    Required,
    Format,
    MinLength,
    MaxLength,
    Mismatch,
    InvalidChoice,
}

impl ErrorCode {
    /// Stable key for the code.
    pub fn key(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Format => "format",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Mismatch => "mismatch",
            Self::InvalidChoice => "invalid_choice",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// First failing error code per field. Empty when the values are valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    errors: BTreeMap<String, ErrorCode>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error code recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<ErrorCode> {
        self.errors.get(field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ErrorCode)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn record(&mut self, field: &str, code: ErrorCode) {
        self.errors.entry(field.to_string()).or_insert(code);
    }
}

/// Evaluates every rule of `schema` against `values`.
///
/// Rules run in declaration order and the first failure per field is kept.
/// Select fields additionally reject values that are not among their options.
pub fn validate(schema: &FormSchema, values: &FormValues) -> ValidationReport {
    let mut report = ValidationReport::default();

    for bound in schema.rules() {
        if report.get(&bound.field).is_some() {
            continue;
        }
        if let Some(code) = check(&bound.rule, values.get(&bound.field), values) {
            report.record(&bound.field, code);
        }
    }

    for field in schema.fields() {
        if let FieldKind::Select { options } = &field.kind {
            let value = values.get(&field.name);
            if !value.is_empty() && !options.iter().any(|o| o.value == value) {
                report.record(&field.name, ErrorCode::InvalidChoice);
            }
        }
    }

    report
}

fn check(rule: &Rule, value: &str, values: &FormValues) -> Option<ErrorCode> {
    let present = !value.trim().is_empty();
    match rule {
        Rule::Required => (!present).then_some(ErrorCode::Required),
        Rule::Email => (present && !EMAIL_RE.is_match(value.trim())).then_some(ErrorCode::Format),
        Rule::MinLength(min) => {
            (present && value.chars().count() < *min).then_some(ErrorCode::MinLength)
        }
        Rule::MaxLength(max) => (value.chars().count() > *max).then_some(ErrorCode::MaxLength),
        Rule::Pattern(re, code) => (present && !re.is_match(value)).then_some(*code),
        Rule::Matches { other } => (value != values.get(other)).then_some(ErrorCode::Mismatch),
    }
}

/// Message for `code` on `field`, or [`UNDEFINED_MESSAGE`] when unmapped.
pub fn message_for(field: &FieldDescriptor, code: ErrorCode) -> &str {
    field
        .messages
        .get(&code)
        .map(String::as_str)
        .unwrap_or(UNDEFINED_MESSAGE)
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::form::schema::{InputType, SelectOption};

    fn email_schema() -> FormSchema {
        FormSchema::builder("login")
            .field(
                FieldDescriptor::input("email", "Email", InputType::Email)
                    .message(ErrorCode::Required, "Email is required")
                    .message(ErrorCode::Format, "Please enter a valid email address"),
            )
            .rule("email", Rule::Required)
            .rule("email", Rule::Email)
            .build()
            .unwrap()
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().copied().collect()
    }

    mod email {
        use super::*;

        #[test]
        fn malformed_address_reports_format() {
            let schema = email_schema();
            let report = validate(&schema, &values(&[("email", "not-an-email")]));
            assert_eq!(report.get("email"), Some(ErrorCode::Format));
            let field = schema.field("email").unwrap();
            assert_eq!(
                message_for(field, ErrorCode::Format),
                "Please enter a valid email address"
            );
        }

        #[test]
        fn empty_reports_required_not_format() {
            let report = validate(&email_schema(), &values(&[("email", "")]));
            assert_eq!(report.get("email"), Some(ErrorCode::Required));
            assert_eq!(report.len(), 1);
        }

        #[test]
        fn valid_address_passes() {
            let report = validate(&email_schema(), &values(&[("email", "ann@example.org")]));
            assert!(report.is_empty());
        }

        #[quickcheck]
        fn address_with_whitespace_never_passes(local: String) -> bool {
            let addr = format!("a b{local}@example.org");
            validate(&email_schema(), &values(&[("email", addr.as_str())])).get("email")
                == Some(ErrorCode::Format)
        }
    }

    mod lengths {
        use super::*;

        fn schema() -> FormSchema {
            FormSchema::builder("len")
                .field(FieldDescriptor::input("pw", "Password", InputType::Password))
                .rule("pw", Rule::MinLength(8))
                .rule("pw", Rule::MaxLength(12))
                .build()
                .unwrap()
        }

        #[test]
        fn short_reports_min_length() {
            let report = validate(&schema(), &values(&[("pw", "abc")]));
            assert_eq!(report.get("pw"), Some(ErrorCode::MinLength));
        }

        #[test]
        fn long_reports_max_length() {
            let report = validate(&schema(), &values(&[("pw", "abcdefghijklm")]));
            assert_eq!(report.get("pw"), Some(ErrorCode::MaxLength));
        }

        #[test]
        fn empty_optional_passes() {
            assert!(validate(&schema(), &values(&[("pw", "")])).is_empty());
        }
    }

    mod cross_field {
        use super::*;

        fn schema() -> FormSchema {
            FormSchema::builder("reg")
                .field(FieldDescriptor::input("password", "Password", InputType::Password))
                .field(FieldDescriptor::input("confirm", "Confirm", InputType::Password))
                .rule(
                    "confirm",
                    Rule::Matches {
                        other: "password".into(),
                    },
                )
                .build()
                .unwrap()
        }

        #[test]
        fn mismatch_is_reported_on_confirmation() {
            let report = validate(
                &schema(),
                &values(&[("password", "hunter22"), ("confirm", "hunter23")]),
            );
            assert_eq!(report.get("confirm"), Some(ErrorCode::Mismatch));
            assert_eq!(report.get("password"), None);
        }

        #[test]
        fn equal_values_pass() {
            let report = validate(
                &schema(),
                &values(&[("password", "hunter22"), ("confirm", "hunter22")]),
            );
            assert!(report.is_empty());
        }
    }

    mod choices {
        use super::*;

        fn schema() -> FormSchema {
            FormSchema::builder("sel")
                .field(FieldDescriptor::select(
                    "format",
                    "Format",
                    vec![SelectOption::new("json", "JSON")],
                ))
                .build()
                .unwrap()
        }

        #[test]
        fn unknown_choice_is_rejected() {
            let report = validate(&schema(), &values(&[("format", "xml")]));
            assert_eq!(report.get("format"), Some(ErrorCode::InvalidChoice));
        }

        #[test]
        fn known_choice_passes() {
            assert!(validate(&schema(), &values(&[("format", "json")])).is_empty());
        }
    }

    #[test]
    fn first_failure_per_field_wins() {
        let schema = FormSchema::builder("order")
            .field(FieldDescriptor::input("code", "Code", InputType::Text))
            .rule(
                "code",
                Rule::Pattern(Regex::new("^[A-Z]+$").unwrap(), ErrorCode::Format),
            )
            .rule("code", Rule::MinLength(5))
            .build()
            .unwrap();
        let report = validate(&schema, &values(&[("code", "ab")]));
        assert_eq!(report.get("code"), Some(ErrorCode::Format));
    }

    mod pattern {
        use super::*;

        fn schema(code: ErrorCode) -> FormSchema {
            FormSchema::builder("pattern")
                .field(FieldDescriptor::input("zip", "Zip", InputType::Text))
                .rule("zip", Rule::Pattern(Regex::new(r"^\d{5}$").unwrap(), code))
                .build()
                .unwrap()
        }

        #[test]
        fn mismatch_reports_the_rule_code() {
            let report = validate(&schema(ErrorCode::InvalidChoice), &values(&[("zip", "abc")]));
            assert_eq!(report.get("zip"), Some(ErrorCode::InvalidChoice));
        }

        #[test]
        fn match_passes() {
            assert!(validate(&schema(ErrorCode::Format), &values(&[("zip", "12345")])).is_empty());
        }

        #[test]
        fn absent_value_is_not_checked() {
            assert!(validate(&schema(ErrorCode::Format), &values(&[("zip", "")])).is_empty());
        }
    }

    #[test]
    fn unmapped_code_falls_back_to_undefined() {
        let schema = email_schema();
        let field = schema.field("email").unwrap();
        assert_eq!(message_for(field, ErrorCode::Mismatch), UNDEFINED_MESSAGE);
    }

    #[quickcheck]
    fn required_passes_for_any_non_blank_value(s: String) -> bool {
        let schema = FormSchema::builder("req")
            .field(FieldDescriptor::input("a", "A", InputType::Text))
            .rule("a", Rule::Required)
            .build()
            .unwrap();
        let report = validate(&schema, &values(&[("a", s.as_str())]));
        report.is_empty() == !s.trim().is_empty()
    }

    #[test]
    fn error_code_keys() {
        assert_eq!(ErrorCode::MinLength.to_string(), "min_length");
        assert_eq!(ErrorCode::InvalidChoice.key(), "invalid_choice");
    }
}
