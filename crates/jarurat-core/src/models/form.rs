//! Creation form input.

use serde::{Deserialize, Serialize};

/// Raw field values of the "add patient" form, exactly as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientForm {
    pub name: String,
    pub age: String,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub notes: String,
}

impl PatientForm {
    /// Form with only a name filled in.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}
