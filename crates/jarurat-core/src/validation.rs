//! Creation form validation.
//!
//! Checks run in a fixed order and the first failure wins:
//! name, age, contact, email.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::{PatientForm, PatientRecord, MAX_AGE, MIN_AGE};
use crate::text::{trim_input, trim_input_start};

// `\x{FEFF}` sits alongside `\s` so the BOM counts as whitespace here too
static CONTACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9\s\x{FEFF}\-+()]+$").expect("contact pattern is valid")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("email pattern is valid")
});

/// Reasons a new patient submission is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please provide a patient name")]
    MissingName,

    #[error("Please provide a valid age (0-120)")]
    InvalidAge,

    #[error("Please provide a valid contact number")]
    InvalidContact,

    #[error("Please provide a valid email address")]
    InvalidEmail,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// A submission that passed validation, with trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPatient {
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub notes: String,
}

impl ValidatedPatient {
    pub fn into_record(self, id: u64) -> PatientRecord {
        PatientRecord {
            id,
            name: self.name,
            age: self.age,
            contact: self.contact,
            email: self.email,
            address: self.address,
            notes: self.notes,
        }
    }
}

/// Validate raw form input.
pub fn validate_form(form: &PatientForm) -> ValidationResult<ValidatedPatient> {
    let name = trim_input(&form.name);
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let age = parse_age(&form.age);
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::InvalidAge);
    }

    let contact = trim_input(&form.contact);
    if !contact.is_empty() && !is_valid_contact(contact) {
        return Err(ValidationError::InvalidContact);
    }

    let email = trim_input(&form.email);
    if !email.is_empty() && !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(ValidatedPatient {
        name: name.to_string(),
        age: age as u32,
        contact: contact.to_string(),
        email: email.to_string(),
        address: trim_input(&form.address).to_string(),
        notes: trim_input(&form.notes).to_string(),
    })
}

/// Parse the leading integer of `raw`.
///
/// Leading whitespace is skipped and an optional sign is honored. A `0x`
/// or `0X` prefix switches to hexadecimal. Parsing stops at the first
/// character that is not a digit of the radix, and input without digits
/// yields 0. Values too large for `i64` saturate, which still fails the
/// range check.
pub fn parse_age(raw: &str) -> i64 {
    let s = trim_input_start(raw);
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    let mut value: i64 = 0;
    for d in digits.chars().map_while(|c| c.to_digit(radix)) {
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(d));
    }

    if negative {
        -value
    } else {
        value
    }
}

pub fn is_valid_contact(contact: &str) -> bool {
    CONTACT_RE.is_match(contact)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
