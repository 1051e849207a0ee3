//! Jarurat Care Core Library
//!
//! State machine behind the patient records dashboard.
//!
//! # Architecture
//!
//! ```text
//!   PatientSource (HTTP)
//!          │  one-shot load
//!          ▼
//!   ┌──────────────┐   query    ┌──────────────┐
//!   │ PatientStore │──────────▶ │ visible list │──▶ presentation layer
//!   └──────▲───────┘  (derived) └──────────────┘          │
//!          │                                              │
//!          └──── submit_new_patient ◀── select / dismiss ◀┘
//! ```
//!
//! The store changes only on load completion and on accepted submissions.
//! Everything the presentation layer shows is derived from [`Dashboard`].
//!
//! # Modules
//!
//! - [`dashboard`]: State container, store and id generation
//! - [`filter`]: Case-insensitive name search
//! - [`validation`]: Creation form rules
//! - [`loader`]: One-shot initial load
//! - [`models`]: Domain and view types
//! - [`config`]: Endpoint and timeout settings
//! - [`logging`]: `tracing` subscriber setup
//! - [`text`]: Input whitespace rules

pub mod config;
pub mod dashboard;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod models;
pub mod text;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{Dashboard, PatientStore};
pub use filter::filter_patients;
pub use loader::{load_patients, LoadError};
pub use models::{
    AddFormState, LoadStatus, PatientCard, PatientDetail, PatientForm, PatientRecord,
};
pub use validation::{validate_form, ValidationError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use jarurat_source::{HttpSource, PatientSource, SourceError};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DashboardError {
    #[error("{}", ValidationError::MissingName)]
    MissingName,

    #[error("{}", ValidationError::InvalidAge)]
    InvalidAge,

    #[error("{}", ValidationError::InvalidContact)]
    InvalidContact,

    #[error("{}", ValidationError::InvalidEmail)]
    InvalidEmail,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<ValidationError> for DashboardError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::MissingName => DashboardError::MissingName,
            ValidationError::InvalidAge => DashboardError::InvalidAge,
            ValidationError::InvalidContact => DashboardError::InvalidContact,
            ValidationError::InvalidEmail => DashboardError::InvalidEmail,
        }
    }
}

impl From<LoadError> for DashboardError {
    fn from(e: LoadError) -> Self {
        DashboardError::Load(e.to_string())
    }
}

impl From<ConfigError> for DashboardError {
    fn from(e: ConfigError) -> Self {
        DashboardError::Config(e.to_string())
    }
}

impl From<SourceError> for DashboardError {
    fn from(e: SourceError) -> Self {
        DashboardError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Serialization(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DashboardError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DashboardError::Load(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a dashboard backed by the default collection endpoint.
#[uniffi::export]
pub fn open_dashboard() -> Result<Arc<PatientDashboardCore>, DashboardError> {
    PatientDashboardCore::from_config(DashboardConfig::default())
}

/// Create a dashboard from a JSON config (missing fields take defaults).
#[uniffi::export]
pub fn open_dashboard_with_config(
    config_json: String,
) -> Result<Arc<PatientDashboardCore>, DashboardError> {
    let config = DashboardConfig::from_json_str(&config_json)?;
    PatientDashboardCore::from_config(config)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe dashboard wrapper for FFI.
///
/// All mutations are serialized through one mutex, which is released while
/// the initial load is waiting on the network.
#[derive(uniffi::Object)]
pub struct PatientDashboardCore {
    dashboard: Arc<Mutex<Dashboard>>,
    source: Arc<dyn PatientSource>,
}

impl PatientDashboardCore {
    fn from_config(config: DashboardConfig) -> Result<Arc<Self>, DashboardError> {
        config.validate()?;
        // No-op when the host already installed a subscriber
        logging::init_logging(config.log_filter.clone());
        let source = HttpSource::new(&config.endpoint, config.request_timeout())?;
        Ok(Self::with_source(Arc::new(source)))
    }

    /// Create a dashboard over any source (used by tests and embedders).
    pub fn with_source(source: Arc<dyn PatientSource>) -> Arc<Self> {
        Arc::new(Self {
            dashboard: Arc::new(Mutex::new(Dashboard::new())),
            source,
        })
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl PatientDashboardCore {
    /// Run the initial load. Only the first call fetches.
    pub async fn load_patients(&self) -> Result<FfiLoadStatus, DashboardError> {
        let status = loader::load_patients(&self.dashboard, self.source.as_ref()).await?;
        Ok(status.into())
    }
}

#[uniffi::export]
impl PatientDashboardCore {
    // =========================================================================
    // Load Status
    // =========================================================================

    pub fn load_status(&self) -> Result<FfiLoadStatus, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard.load_status().clone().into())
    }

    /// Inline status line for the patient list, if any.
    pub fn status_message(&self) -> Result<Option<String>, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard.status_message())
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Update the search query (called on every keystroke).
    pub fn set_search_query(&self, query: String) -> Result<(), DashboardError> {
        let mut dashboard = self.dashboard.lock()?;
        dashboard.set_query(query);
        Ok(())
    }

    pub fn search_query(&self) -> Result<String, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard.query().to_string())
    }

    /// Records matching the current query.
    pub fn visible_patients(&self) -> Result<Vec<FfiPatient>, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard
            .visible_patients()
            .into_iter()
            .map(|p| p.clone().into())
            .collect())
    }

    /// Grid cards for the records matching the current query.
    pub fn patient_cards(&self) -> Result<Vec<FfiPatientCard>, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard.patient_cards().into_iter().map(|c| c.into()).collect())
    }

    /// JSON snapshot of the whole store.
    pub fn patients_json(&self) -> Result<String, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard.patients_json()?)
    }

    // =========================================================================
    // Detail View
    // =========================================================================

    /// Show the record with `id` in the detail view.
    pub fn view_details(&self, id: u64) -> Result<FfiPatientDetail, DashboardError> {
        let mut dashboard = self.dashboard.lock()?;
        let detail = dashboard
            .select_by_id(id)
            .ok_or_else(|| DashboardError::NotFound(format!("patient {}", id)))?;
        Ok(detail.into())
    }

    pub fn selected_patient(&self) -> Result<Option<FfiPatientDetail>, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard.selected_detail().map(|d| d.into()))
    }

    pub fn dismiss_details(&self) -> Result<(), DashboardError> {
        let mut dashboard = self.dashboard.lock()?;
        dashboard.dismiss();
        Ok(())
    }

    // =========================================================================
    // Creation Form
    // =========================================================================

    /// Open or close the creation form. Returns whether it is now open.
    pub fn toggle_add_form(&self) -> Result<bool, DashboardError> {
        let mut dashboard = self.dashboard.lock()?;
        Ok(dashboard.toggle_add_form())
    }

    pub fn is_add_form_open(&self) -> Result<bool, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard.add_form().is_open())
    }

    pub fn add_form_label(&self) -> Result<String, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(dashboard.add_form().toggle_label().to_string())
    }

    /// Inputs of the last rejected submission, for re-populating the form.
    pub fn form_draft(&self) -> Result<Option<FfiPatientForm>, DashboardError> {
        let dashboard = self.dashboard.lock()?;
        Ok(match dashboard.add_form() {
            AddFormState::Open { draft: Some(form) } => Some(form.clone().into()),
            _ => None,
        })
    }

    /// Validate and add a new patient at the top of the list.
    pub fn submit_new_patient(&self, form: FfiPatientForm) -> Result<FfiPatient, DashboardError> {
        let mut dashboard = self.dashboard.lock()?;
        let record = dashboard.submit_new_patient(form.into())?;
        Ok(record.into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient record.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPatient {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub notes: String,
}

impl From<PatientRecord> for FfiPatient {
    fn from(record: PatientRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            age: record.age,
            contact: record.contact,
            email: record.email,
            address: record.address,
            notes: record.notes,
        }
    }
}

/// FFI-safe raw form input.
#[derive(Debug, Clone, Default, PartialEq, uniffi::Record)]
pub struct FfiPatientForm {
    pub name: String,
    pub age: String,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub notes: String,
}

impl From<FfiPatientForm> for PatientForm {
    fn from(form: FfiPatientForm) -> Self {
        PatientForm {
            name: form.name,
            age: form.age,
            contact: form.contact,
            email: form.email,
            address: form.address,
            notes: form.notes,
        }
    }
}

impl From<PatientForm> for FfiPatientForm {
    fn from(form: PatientForm) -> Self {
        Self {
            name: form.name,
            age: form.age,
            contact: form.contact,
            email: form.email,
            address: form.address,
            notes: form.notes,
        }
    }
}

/// FFI-safe detail view.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPatientDetail {
    pub id: u64,
    pub name: String,
    pub age: String,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub notes: String,
}

impl From<PatientDetail> for FfiPatientDetail {
    fn from(detail: PatientDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name,
            age: detail.age,
            contact: detail.contact,
            email: detail.email,
            address: detail.address,
            notes: detail.notes,
        }
    }
}

/// FFI-safe grid card.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPatientCard {
    pub id: u64,
    pub initials: String,
    pub name: String,
    pub summary: String,
}

impl From<PatientCard> for FfiPatientCard {
    fn from(card: PatientCard) -> Self {
        Self {
            id: card.id,
            initials: card.initials,
            name: card.name,
            summary: card.summary,
        }
    }
}

/// FFI-safe load status.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiLoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed { message: String },
}

impl From<LoadStatus> for FfiLoadStatus {
    fn from(status: LoadStatus) -> Self {
        match status {
            LoadStatus::Idle => FfiLoadStatus::Idle,
            LoadStatus::Loading => FfiLoadStatus::Loading,
            LoadStatus::Loaded => FfiLoadStatus::Loaded,
            LoadStatus::Failed(message) => FfiLoadStatus::Failed { message },
        }
    }
}
