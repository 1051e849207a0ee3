//! Patient record model.

use jarurat_source::SourceUser;
use serde::{Deserialize, Serialize};

/// Lowest age accepted by the creation form.
pub const MIN_AGE: i64 = 0;
/// Highest age accepted by the creation form.
pub const MAX_AGE: i64 = 120;

/// A display-ready patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientRecord {
    /// Stable identity, unique within the store
    pub id: u64,
    /// Full name (never empty)
    pub name: String,
    /// Age in years, 0..=120
    pub age: u32,
    /// Phone number, may be empty
    pub contact: String,
    /// Email address, may be empty
    pub email: String,
    /// Single-line postal address, may be empty
    pub address: String,
    /// Free-text notes, may be empty
    pub notes: String,
}

impl PatientRecord {
    /// Build a record from the source user at position `index` of the payload.
    ///
    /// The source carries no age, so a synthetic one is derived from the
    /// position: `20 + (index * 3) % 60`, always in 20..=79.
    pub fn from_source(index: usize, user: &SourceUser) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            age: synthetic_age(index),
            contact: user.phone.clone(),
            email: user.email.clone(),
            address: user.address.one_line(),
            notes: format!(
                "Patient record for {}. Regular check-ups recommended.",
                user.name
            ),
        }
    }

    /// Case-insensitive substring match against the name.
    pub fn name_matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}

/// Placeholder age for the source record at `index`.
pub fn synthetic_age(index: usize) -> u32 {
    (20 + (index * 3) % 60) as u32
}
