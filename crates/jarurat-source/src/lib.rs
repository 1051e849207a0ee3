//! Inbound data source for the patient dashboard.
//!
//! This crate owns the wire shape of the remote user collection and the
//! client that fetches it. Transforming source users into patient records
//! is left to `jarurat-core`.

pub mod client;
pub mod records;

pub use client::*;
pub use records::*;
