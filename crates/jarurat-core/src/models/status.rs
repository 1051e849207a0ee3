//! Lifecycle markers surfaced to the presentation layer.

use serde::{Deserialize, Serialize};

use super::PatientForm;

/// State of the one-shot initial load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoadStatus {
    /// Load not started yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Store populated from the source
    Loaded,
    /// Load failed; the store stays empty
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Open/closed state of the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AddFormState {
    #[default]
    Closed,
    /// Open; `draft` holds the inputs of the last rejected submission.
    Open { draft: Option<PatientForm> },
}

impl AddFormState {
    pub fn is_open(&self) -> bool {
        matches!(self, AddFormState::Open { .. })
    }

    /// Label of the control that toggles the form.
    pub fn toggle_label(&self) -> &'static str {
        if self.is_open() {
            "Cancel"
        } else {
            "+ Add New Patient"
        }
    }
}
