//! Declarative field and schema definitions.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use regex::Regex;

use super::error::SchemaError;
use super::validation::ErrorCode;

/// Width of the layout grid in columns.
pub const GRID_COLUMNS: u8 = 12;

/// Flavour of a free-text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    /// Rendered masked.
    Password,
    /// Accepts only ASCII digits.
    Number,
}

impl InputType {
    /// Returns `true` if `ch` may be typed into an input of this type.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Self::Number => ch.is_ascii_digit(),
            Self::Text | Self::Email | Self::Password => !ch.is_control(),
        }
    }
}

/// One choice offered by a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value stored in [`FormValues`](super::FormValues).
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A caller-supplied field widget for values no built-in kind covers.
pub trait FieldWidget: fmt::Debug + Send + Sync {
    /// Text shown for the current value.
    fn display(&self, value: &str) -> String;

    /// Applies a key press to `value`. Returns `true` if the key was consumed.
    fn handle_key(&self, value: &mut String, key: KeyEvent) -> bool;
}

/// What kind of field a descriptor renders, with the attributes that kind needs.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Free-text input.
    Input { input_type: InputType },
    /// Choice among fixed options.
    Select { options: Vec<SelectOption> },
    /// Carried in the values but never shown in the grid.
    Hidden { default: String },
    /// Rendered and edited by a custom widget.
    Component(Arc<dyn FieldWidget>),
}

/// Declarative definition of one form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    /// Grid span, 1..=12.
    pub columns: u8,
    pub kind: FieldKind,
    /// Message shown for each validation error code.
    pub messages: BTreeMap<ErrorCode, String>,
}

impl FieldDescriptor {
    fn with_kind(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            placeholder: None,
            columns: GRID_COLUMNS,
            kind,
            messages: BTreeMap::new(),
        }
    }

    /// A free-text input.
    pub fn input(name: impl Into<String>, label: impl Into<String>, input_type: InputType) -> Self {
        Self::with_kind(name, label, FieldKind::Input { input_type })
    }

    /// A select over `options`.
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::with_kind(name, label, FieldKind::Select { options })
    }

    /// A hidden field carrying `default`.
    pub fn hidden(name: impl Into<String>, default: impl Into<String>) -> Self {
        let name = name.into();
        Self::with_kind(
            name.clone(),
            name,
            FieldKind::Hidden {
                default: default.into(),
            },
        )
    }

    /// A field rendered by a custom widget.
    pub fn component(
        name: impl Into<String>,
        label: impl Into<String>,
        widget: Arc<dyn FieldWidget>,
    ) -> Self {
        Self::with_kind(name, label, FieldKind::Component(widget))
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    /// Maps a validation error code to the message shown under the field.
    pub fn message(mut self, code: ErrorCode, text: impl Into<String>) -> Self {
        self.messages.insert(code, text.into());
        self
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.kind, FieldKind::Hidden { .. })
    }
}

/// A structural validation rule applied to one field.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be non-blank.
    Required,
    /// Value, when present, must look like an email address.
    Email,
    /// Value, when present, must have at least this many characters.
    MinLength(usize),
    /// Value must have at most this many characters.
    MaxLength(usize),
    /// Value, when present, must match the pattern; a mismatch reports the
    /// carried code.
    Pattern(Regex, ErrorCode),
    /// Value must equal the value of another field.
    Matches { other: String },
}

/// A [`Rule`] bound to the field it checks.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: String,
    pub rule: Rule,
}

/// Named collection of field descriptors plus their validation rules.
///
/// Immutable once built; use [`FormSchema::builder`].
#[derive(Debug, Clone)]
pub struct FormSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    rules: Vec<FieldRule>,
}

impl FormSchema {
    pub fn builder(name: impl Into<String>) -> FormSchemaBuilder {
        FormSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Descriptors that occupy a grid slot.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_hidden())
    }

    /// Descriptors rendered outside the grid.
    pub fn hidden_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_hidden())
    }

    /// Returns `true` if any rule marks `name` as required.
    pub fn is_required(&self, name: &str) -> bool {
        self.rules
            .iter()
            .any(|r| r.field == name && matches!(r.rule, Rule::Required))
    }
}

/// Builder for [`FormSchema`].
#[derive(Debug)]
pub struct FormSchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    rules: Vec<FieldRule>,
}

impl FormSchemaBuilder {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn rule(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.rules.push(FieldRule {
            field: field.into(),
            rule,
        });
        self
    }

    /// Validates names, spans and rule references.
    pub fn build(self) -> Result<FormSchema, SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if !(1..=GRID_COLUMNS).contains(&field.columns) {
                return Err(SchemaError::InvalidColumns {
                    name: field.name.clone(),
                    columns: field.columns,
                });
            }
        }
        for rule in &self.rules {
            if !seen.contains(rule.field.as_str()) {
                return Err(SchemaError::UnknownField(rule.field.clone()));
            }
            if let Rule::Matches { other } = &rule.rule
                && !seen.contains(other.as_str())
            {
                return Err(SchemaError::UnknownField(other.clone()));
            }
        }
        Ok(FormSchema {
            name: self.name,
            fields: self.fields,
            rules: self.rules,
        })
    }
}
