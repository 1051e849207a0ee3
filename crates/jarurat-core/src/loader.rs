//! One-shot initial load from the patient source.

use std::sync::Mutex;

use jarurat_source::{PatientSource, SourceError, SourceUser};
use thiserror::Error;
use tracing::info;

use crate::dashboard::Dashboard;
use crate::models::{LoadStatus, PatientRecord};

/// Load failure, collapsed to the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SourceError> for LoadError {
    fn from(e: SourceError) -> Self {
        LoadError::new(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for LoadError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        LoadError::new(format!("Lock poisoned: {}", e))
    }
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Transform source users into patient records, keeping source order.
pub fn to_patient_records(users: &[SourceUser]) -> Vec<PatientRecord> {
    users
        .iter()
        .enumerate()
        .map(|(index, user)| PatientRecord::from_source(index, user))
        .collect()
}

/// Run the initial load against `source` and return the resulting status.
///
/// Only the first call fetches; later calls return the current status
/// without touching the source. The lock is never held across the fetch,
/// so search and form actions stay usable while it is pending. Source
/// failures end up in [`LoadStatus::Failed`]; the only `Err` is a poisoned
/// lock.
pub async fn load_patients<S>(dashboard: &Mutex<Dashboard>, source: &S) -> LoadResult<LoadStatus>
where
    S: PatientSource + ?Sized,
{
    {
        let mut state = dashboard.lock()?;
        if !state.begin_load() {
            return Ok(state.load_status().clone());
        }
    }

    info!(source = source.name(), "loading patients");
    let fetched = source.fetch_users().await;

    let mut state = dashboard.lock()?;
    match fetched {
        Ok(users) => state.complete_load(to_patient_records(&users)),
        Err(e) => state.fail_load(LoadError::from(e).message),
    }
    Ok(state.load_status().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarurat_source::{SourceAddress, StaticResponse, StaticSource};

    fn user(id: u64, name: &str) -> SourceUser {
        SourceUser {
            id,
            name: name.into(),
            email: format!("{}@example.com", id),
            phone: "555-0100".into(),
            address: SourceAddress {
                suite: "Apt. 1".into(),
                street: "Main St".into(),
                city: "Springfield".into(),
            },
        }
    }

    #[test]
    fn test_to_patient_records_ages() {
        let users: Vec<_> = (0..25).map(|i| user(i + 1, "X")).collect();
        let records = to_patient_records(&users);
        let ages: Vec<u32> = records.iter().map(|r| r.age).collect();
        assert_eq!(ages[0], 20);
        assert_eq!(ages[1], 23);
        assert_eq!(ages[19], 77);
        assert_eq!(ages[20], 20);
        assert!(ages.iter().all(|a| (20..=79).contains(a)));
    }

    #[tokio::test]
    async fn test_load_success() {
        let dashboard = Mutex::new(Dashboard::new());
        let source = StaticSource::users(vec![user(1, "Leanne"), user(2, "Ervin")]);

        let status = load_patients(&dashboard, &source).await.unwrap();
        assert_eq!(status, LoadStatus::Loaded);

        let state = dashboard.lock().unwrap();
        assert_eq!(state.patients().len(), 2);
        assert_eq!(state.patients()[1].address, "Apt. 1, Main St, Springfield");
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let dashboard = Mutex::new(Dashboard::new());
        let source = StaticSource::users(vec![user(1, "Leanne")]);

        load_patients(&dashboard, &source).await.unwrap();
        let status = load_patients(&dashboard, &source).await.unwrap();
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_status_not_error() {
        let dashboard = Mutex::new(Dashboard::new());
        let source = StaticSource::new(StaticResponse::Status(500));

        let status = load_patients(&dashboard, &source).await.unwrap();
        assert_eq!(status, LoadStatus::Failed("Failed to fetch patients data".into()));
        assert!(dashboard.lock().unwrap().patients().is_empty());
    }

    #[test]
    fn test_load_error_from_source() {
        let err = LoadError::from(SourceError::Unavailable("offline".into()));
        assert_eq!(err.to_string(), "offline");
    }
}
