use std::collections::BTreeMap;

use super::schema::{FieldKind, FormSchema};

/// Current value of every field in a form, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

impl FormValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the initial values for a schema: hidden fields take their
    /// default, everything else starts empty.
    pub fn from_schema(schema: &FormSchema) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|field| {
                let initial = match &field.kind {
                    FieldKind::Hidden { default } => default.clone(),
                    _ => String::new(),
                };
                (field.name.clone(), initial)
            })
            .collect();
        Self { values }
    }

    /// Returns the value for `name`, or an empty string if unset.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Returns the value for `name` if it is set and non-blank.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        let value = self.get(name).trim();
        (!value.is_empty()).then_some(value)
    }

    /// Sets the value for `name`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Returns a mutable handle to the value for `name`, inserting an empty
    /// value if needed.
    pub fn entry_mut(&mut self, name: &str) -> &mut String {
        self.values.entry(name.to_string()).or_default()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields with a value slot.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no field has a value slot.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::schema::{FieldDescriptor, InputType};

    #[test]
    fn from_schema_seeds_hidden_defaults() {
        let schema = FormSchema::builder("t")
            .field(FieldDescriptor::input("name", "Name", InputType::Text))
            .field(FieldDescriptor::hidden("project_id", "p-1"))
            .build()
            .unwrap();
        let values = FormValues::from_schema(&schema);
        assert_eq!(values.get("name"), "");
        assert_eq!(values.get("project_id"), "p-1");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn get_missing_is_empty() {
        assert_eq!(FormValues::new().get("nope"), "");
    }

    #[test]
    fn non_empty_trims_blank() {
        let values: FormValues = [("a", "  "), ("b", " x ")].into_iter().collect();
        assert_eq!(values.non_empty("a"), None);
        assert_eq!(values.non_empty("b"), Some("x"));
        assert_eq!(values.non_empty("c"), None);
    }

    #[test]
    fn set_returns_previous() {
        let mut values = FormValues::new();
        assert_eq!(values.set("a", "1"), None);
        assert_eq!(values.set("a", "2"), Some("1".to_string()));
        assert_eq!(values.get("a"), "2");
    }

    #[test]
    fn entry_mut_inserts_empty() {
        let mut values = FormValues::new();
        values.entry_mut("a").push('x');
        assert_eq!(values.get("a"), "x");
    }
}
