//! Domain models for the patient dashboard.

mod form;
mod patient;
mod status;
mod view;

pub use form::*;
pub use patient::*;
pub use status::*;
pub use view::*;
