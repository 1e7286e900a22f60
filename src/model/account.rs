use serde::{Deserialize, Serialize};

use super::error::ModelError;
use crate::form::FormValues;

/// The local operator profile. Passwords are validated by the registration
/// form but never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub display_name: String,
    pub email: String,
}

impl Account {
    pub fn from_values(values: &FormValues) -> Result<Self, ModelError> {
        let display_name = values
            .non_empty("display_name")
            .ok_or(ModelError::MissingField("display name"))?;
        let email = values
            .non_empty("email")
            .ok_or(ModelError::MissingField("email"))?;
        Ok(Self {
            display_name: display_name.to_string(),
            email: email.to_lowercase(),
        })
    }
}
