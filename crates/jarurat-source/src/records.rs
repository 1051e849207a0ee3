//! Source record wire types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while fetching or decoding the source collection.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch patients data")]
    Status(u16),

    #[error("Malformed patients payload: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// A raw user record as returned by the collection endpoint.
///
/// Unknown fields (`username`, `website`, `company`, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceUser {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: SourceAddress,
}

/// Postal address nested inside a [`SourceUser`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceAddress {
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
}

impl SourceAddress {
    /// Single-line form: `"{suite}, {street}, {city}"`.
    pub fn one_line(&self) -> String {
        format!("{}, {}, {}", self.suite, self.street, self.city)
    }
}

/// Parse the collection payload (a JSON array of users).
pub fn parse_users(json: &str) -> SourceResult<Vec<SourceUser>> {
    let users: Vec<SourceUser> = serde_json::from_str(json)?;
    Ok(users)
}
