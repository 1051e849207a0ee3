//! Read-only projections of a record for display.

use serde::Serialize;

use super::PatientRecord;

/// Placeholder for an empty email or address.
pub const NOT_PROVIDED: &str = "Not provided";
/// Placeholder for empty notes.
pub const NO_NOTES: &str = "No additional notes";

/// Detail overlay content for the selected record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PatientDetail {
    pub id: u64,
    pub name: String,
    pub age: String,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub notes: String,
}

impl From<&PatientRecord> for PatientDetail {
    fn from(record: &PatientRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            age: format!("{} years", record.age),
            // Contact has no placeholder and renders as-is
            contact: record.contact.clone(),
            email: or_placeholder(&record.email, NOT_PROVIDED),
            address: or_placeholder(&record.address, NOT_PROVIDED),
            notes: or_placeholder(&record.notes, NO_NOTES),
        }
    }
}

/// Summary card shown in the patient grid.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PatientCard {
    pub id: u64,
    pub initials: String,
    pub name: String,
    pub summary: String,
}

impl From<&PatientRecord> for PatientCard {
    fn from(record: &PatientRecord) -> Self {
        Self {
            id: record.id,
            initials: initials(&record.name),
            name: record.name.clone(),
            summary: format!("{} years • {}", record.age, record.contact),
        }
    }
}

/// First letters of the first two space-separated name parts.
///
/// Parts are taken before empty ones are dropped, so a doubled space
/// yields a single letter.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .take(2)
        .filter_map(|part| part.chars().next())
        .collect()
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
