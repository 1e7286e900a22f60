//! Form schemas for each use case.
//!
//! Schemas are static; per-instance data such as the owning project ID is
//! supplied through the initial [`FormValues`](crate::form::FormValues).

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::form::{
    Checkbox, ErrorCode, FieldDescriptor, FormSchema, InputType, Rule, SelectOption,
};
use crate::model::QuestionKind;
use crate::storage::ExportFormat;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid hardcoded regex"));

const REQUIRED: &str = "This field is required";

/// Operator profile registration with password confirmation.
pub fn registration() -> FormSchema {
    FormSchema::builder("registration")
        .field(
            FieldDescriptor::input("display_name", "Display name", InputType::Text)
                .placeholder("Ann Example")
                .message(ErrorCode::Required, "Please enter your name"),
        )
        .field(
            FieldDescriptor::input("email", "Email", InputType::Email)
                .placeholder("you@example.org")
                .message(ErrorCode::Required, "Please enter your email address")
                .message(ErrorCode::Format, "Please enter a valid email address"),
        )
        .field(
            FieldDescriptor::input("password", "Password", InputType::Password)
                .columns(6)
                .message(ErrorCode::Required, "Please choose a password")
                .message(ErrorCode::MinLength, "Use at least 8 characters"),
        )
        .field(
            FieldDescriptor::input("confirm_password", "Confirm password", InputType::Password)
                .columns(6)
                .message(ErrorCode::Mismatch, "Passwords do not match"),
        )
        .rule("display_name", Rule::Required)
        .rule("email", Rule::Required)
        .rule("email", Rule::Email)
        .rule("password", Rule::Required)
        .rule("password", Rule::MinLength(8))
        .rule(
            "confirm_password",
            Rule::Matches {
                other: "password".into(),
            },
        )
        .build()
        .expect("valid hardcoded schema")
}

/// New project.
pub fn project() -> FormSchema {
    FormSchema::builder("project")
        .field(
            FieldDescriptor::input("name", "Project name", InputType::Text)
                .placeholder("Onboarding study")
                .message(ErrorCode::Required, "Please name the project")
                .message(ErrorCode::MaxLength, "Keep the name under 80 characters"),
        )
        .field(
            FieldDescriptor::input("description", "Description", InputType::Text)
                .placeholder("Optional")
                .message(ErrorCode::MaxLength, "Keep the description under 200 characters"),
        )
        .rule("name", Rule::Required)
        .rule("name", Rule::MaxLength(80))
        .rule("description", Rule::MaxLength(200))
        .build()
        .expect("valid hardcoded schema")
}

/// New interview within the project named by the hidden `project_id`.
pub fn interview() -> FormSchema {
    FormSchema::builder("interview")
        .field(FieldDescriptor::hidden("project_id", ""))
        .field(
            FieldDescriptor::input("title", "Title", InputType::Text)
                .message(ErrorCode::Required, REQUIRED),
        )
        .field(
            FieldDescriptor::input("interviewee", "Interviewee", InputType::Text)
                .columns(6)
                .message(ErrorCode::Required, REQUIRED),
        )
        .field(
            FieldDescriptor::input("email", "Email", InputType::Email)
                .columns(6)
                .placeholder("Optional")
                .message(ErrorCode::Format, "Please enter a valid email address"),
        )
        .field(
            FieldDescriptor::input("scheduled_on", "Scheduled on", InputType::Text)
                .columns(6)
                .placeholder("YYYY-MM-DD")
                .message(ErrorCode::Format, "Use the format YYYY-MM-DD"),
        )
        .rule("project_id", Rule::Required)
        .rule("title", Rule::Required)
        .rule("interviewee", Rule::Required)
        .rule("email", Rule::Email)
        .rule(
            "scheduled_on",
            Rule::Pattern(DATE_RE.clone(), ErrorCode::Format),
        )
        .build()
        .expect("valid hardcoded schema")
}

/// New question within the project named by the hidden `project_id`.
pub fn question() -> FormSchema {
    let kinds = QuestionKind::ALL
        .into_iter()
        .map(|k| SelectOption::new(k.as_str(), k.label()))
        .collect();
    FormSchema::builder("question")
        .field(FieldDescriptor::hidden("project_id", ""))
        .field(
            FieldDescriptor::input("prompt", "Prompt", InputType::Text)
                .placeholder("What did you expect to happen?")
                .message(ErrorCode::Required, "Please enter the question"),
        )
        .field(
            FieldDescriptor::select("kind", "Answer type", kinds)
                .columns(8)
                .message(ErrorCode::Required, "Please pick an answer type"),
        )
        .field(FieldDescriptor::component("required", "Required", Arc::new(Checkbox)).columns(4))
        .rule("project_id", Rule::Required)
        .rule("prompt", Rule::Required)
        .rule("kind", Rule::Required)
        .build()
        .expect("valid hardcoded schema")
}

/// Export of the project named by the hidden `project_id`.
pub fn export() -> FormSchema {
    let formats = ExportFormat::ALL
        .into_iter()
        .map(|f| SelectOption::new(f.as_str(), f.label()))
        .collect();
    FormSchema::builder("export")
        .field(FieldDescriptor::hidden("project_id", ""))
        .field(
            FieldDescriptor::select("format", "Format", formats)
                .columns(6)
                .message(ErrorCode::Required, "Please pick a format"),
        )
        .field(
            FieldDescriptor::component("include_questions", "Include questions", Arc::new(Checkbox))
                .columns(6),
        )
        .field(
            FieldDescriptor::input("path", "Destination", InputType::Text)
                .message(ErrorCode::Required, "Please choose where to write the file"),
        )
        .rule("project_id", Rule::Required)
        .rule("format", Rule::Required)
        .rule("path", Rule::Required)
        .build()
        .expect("valid hardcoded schema")
}

/// Keeps the export path's extension in step with the chosen format.
///
/// Installed as the export form's change listener.
pub fn sync_export_extension(values: &mut crate::form::FormValues) {
    let Ok(format) = values.get("format").parse::<ExportFormat>() else {
        return;
    };
    let path = values.get("path");
    let Some((stem, ext)) = path.rsplit_once('.') else {
        return;
    };
    if ext != format.extension() && ExportFormat::ALL.iter().any(|f| f.extension() == ext) {
        let updated = format!("{stem}.{}", format.extension());
        values.set("path", updated);
    }
}
