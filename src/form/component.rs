//! Built-in [`FieldWidget`] implementations.

use crossterm::event::{KeyCode, KeyEvent};

use super::schema::FieldWidget;

/// Value stored for a checked [`Checkbox`].
pub const CHECKED: &str = "true";

/// A boolean toggle. Stores [`CHECKED`] when set and an empty string when clear.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkbox;

impl Checkbox {
    pub fn is_checked(value: &str) -> bool {
        value == CHECKED
    }
}

impl FieldWidget for Checkbox {
    fn display(&self, value: &str) -> String {
        if Self::is_checked(value) {
            "[x]".to_string()
        } else {
            "[ ]".to_string()
        }
    }

    fn handle_key(&self, value: &mut String, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(' ') => {
                *value = if Self::is_checked(value) {
                    String::new()
                } else {
                    CHECKED.to_string()
                };
                true
            }
            _ => false,
        }
    }
}
