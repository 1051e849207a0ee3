//! Dashboard state container.
//!
//! Owns the store, the search query, the selection, the creation form and
//! the load status. Every mutation goes through a method on [`Dashboard`];
//! the visible list is derived on demand and never stored.

mod store;

pub use store::*;

use tracing::{debug, info, warn};

use crate::filter::filter_patients;
use crate::models::{
    AddFormState, LoadStatus, PatientCard, PatientDetail, PatientForm, PatientRecord,
};
use crate::validation::{validate_form, ValidationResult};

/// Status line shown while the initial load is in flight.
pub const LOADING_MESSAGE: &str = "Loading patients...";
/// Status line shown when the visible list is empty.
pub const EMPTY_MESSAGE: &str = "No patients found matching your search.";

/// In-memory dashboard state.
#[derive(Debug, Default)]
pub struct Dashboard {
    store: PatientStore,
    ids: IdGenerator,
    query: String,
    selection: Option<PatientRecord>,
    add_form: AddFormState,
    load_status: LoadStatus,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Store
    // =========================================================================

    /// All records, most recent creations first, then source order.
    pub fn patients(&self) -> &[PatientRecord] {
        self.store.records()
    }

    pub fn patient(&self, id: u64) -> Option<&PatientRecord> {
        self.store.get(id)
    }

    /// Serialize the store as a JSON array.
    pub fn patients_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self.store.records())
    }

    // =========================================================================
    // Load lifecycle
    // =========================================================================

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Move from `Idle` to `Loading`.
    ///
    /// Returns false if a load has already started, in which case the
    /// caller must not fetch.
    pub fn begin_load(&mut self) -> bool {
        if self.load_status != LoadStatus::Idle {
            debug!(status = ?self.load_status, "load already started, skipping");
            return false;
        }
        self.load_status = LoadStatus::Loading;
        true
    }

    /// Replace the store with loaded records and mark the load done.
    pub fn complete_load(&mut self, records: Vec<PatientRecord>) {
        if !self.load_status.is_loading() {
            warn!(status = ?self.load_status, "ignoring load completion outside of loading state");
            return;
        }
        let received = records.len();
        let dropped = self.store.replace_all(records);
        info!(received, dropped, "patients loaded");
        self.load_status = LoadStatus::Loaded;
    }

    /// Mark the load failed. The store is left untouched.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        if !self.load_status.is_loading() {
            warn!(status = ?self.load_status, "ignoring load failure outside of loading state");
            return;
        }
        let message = message.into();
        warn!(%message, "patient load failed");
        self.load_status = LoadStatus::Failed(message);
    }

    /// Inline status text for the patient list, if any.
    pub fn status_message(&self) -> Option<String> {
        match &self.load_status {
            LoadStatus::Loading => Some(LOADING_MESSAGE.to_string()),
            LoadStatus::Failed(message) => Some(format!("Error: {}", message)),
            _ if self.visible_patients().is_empty() => Some(EMPTY_MESSAGE.to_string()),
            _ => None,
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Records matching the current query, in store order.
    pub fn visible_patients(&self) -> Vec<&PatientRecord> {
        filter_patients(self.store.records(), &self.query)
    }

    pub fn patient_cards(&self) -> Vec<PatientCard> {
        self.visible_patients().into_iter().map(PatientCard::from).collect()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> Option<&PatientRecord> {
        self.selection.as_ref()
    }

    pub fn selected_detail(&self) -> Option<PatientDetail> {
        self.selection.as_ref().map(PatientDetail::from)
    }

    /// Show `record` in the detail view, replacing any prior selection.
    pub fn select(&mut self, record: &PatientRecord) {
        self.selection = Some(record.clone());
    }

    /// Select the stored record with `id`.
    ///
    /// Unknown ids leave the selection unchanged and return `None`.
    pub fn select_by_id(&mut self, id: u64) -> Option<PatientDetail> {
        let record = self.store.get(id)?.clone();
        let detail = PatientDetail::from(&record);
        self.selection = Some(record);
        Some(detail)
    }

    pub fn dismiss(&mut self) {
        self.selection = None;
    }

    // =========================================================================
    // Creation form
    // =========================================================================

    pub fn add_form(&self) -> &AddFormState {
        &self.add_form
    }

    /// Flip the form between open and closed. Returns whether it is now open.
    pub fn toggle_add_form(&mut self) -> bool {
        self.add_form = match self.add_form {
            AddFormState::Closed => AddFormState::Open { draft: None },
            AddFormState::Open { .. } => AddFormState::Closed,
        };
        self.add_form.is_open()
    }

    /// Close the form and discard any retained input.
    pub fn close_add_form(&mut self) {
        self.add_form = AddFormState::Closed;
    }

    /// Validate `form` and prepend the new record.
    ///
    /// On success the query is cleared and the form closed. On failure the
    /// store is unchanged and, if the form is open, the input is kept as
    /// its draft.
    pub fn submit_new_patient(&mut self, form: PatientForm) -> ValidationResult<PatientRecord> {
        let validated = match validate_form(&form) {
            Ok(validated) => validated,
            Err(err) => {
                debug!(error = %err, "new patient rejected");
                if self.add_form.is_open() {
                    self.add_form = AddFormState::Open { draft: Some(form) };
                }
                return Err(err);
            }
        };

        let id = self.ids.next_id(&self.store);
        let record = validated.into_record(id);
        self.store.prepend(record.clone());
        self.query.clear();
        self.add_form = AddFormState::Closed;

        info!(id, total = self.store.len(), "patient created");
        Ok(record)
    }
}
