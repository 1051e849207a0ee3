//! Clients that produce the source user collection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::records::{parse_users, SourceError, SourceResult, SourceUser};

/// A provider of source user records.
#[async_trait]
pub trait PatientSource: Send + Sync {
    /// Fetch the full collection, in source order.
    async fn fetch_users(&self) -> SourceResult<Vec<SourceUser>>;

    /// Human-readable source name for logs.
    fn name(&self) -> &str;
}

/// Fetches users with a single GET against a collection endpoint.
pub struct HttpSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for `endpoint` with a per-request timeout.
    pub fn new(endpoint: &str, timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PatientSource for HttpSource {
    async fn fetch_users(&self) -> SourceResult<Vec<SourceUser>> {
        debug!(endpoint = %self.endpoint, "requesting source users");

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "source returned non-success status"
            );
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_users(&body)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Canned outcome served by a [`StaticSource`].
#[derive(Debug, Clone)]
pub enum StaticResponse {
    /// Serve these users.
    Users(Vec<SourceUser>),
    /// Serve a raw body, decoded like an HTTP payload.
    Body(String),
    /// Fail as if the endpoint answered with this status.
    Status(u16),
    /// Fail as if the network were down.
    Unreachable(String),
}

/// In-memory source for tests and offline use.
pub struct StaticSource {
    response: StaticResponse,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(response: StaticResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn users(users: Vec<SourceUser>) -> Self {
        Self::new(StaticResponse::Users(users))
    }

    pub fn unreachable(message: &str) -> Self {
        Self::new(StaticResponse::Unreachable(message.to_string()))
    }

    /// Number of times `fetch_users` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PatientSource for StaticSource {
    async fn fetch_users(&self) -> SourceResult<Vec<SourceUser>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            StaticResponse::Users(users) => Ok(users.clone()),
            StaticResponse::Body(body) => parse_users(body),
            StaticResponse::Status(code) => Err(SourceError::Status(*code)),
            StaticResponse::Unreachable(message) => Err(SourceError::Unavailable(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::SourceAddress;

    fn user(id: u64, name: &str) -> SourceUser {
        SourceUser {
            id,
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
            address: SourceAddress::default(),
        }
    }

    #[tokio::test]
    async fn test_static_source_serves_users() {
        let source = StaticSource::users(vec![user(1, "A"), user(2, "B")]);
        let users = source.fetch_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(source.calls(), 1);
        assert_eq!(source.name(), "static");
    }

    #[tokio::test]
    async fn test_static_source_failures() {
        let down = StaticSource::unreachable("connection refused");
        let err = down.fetch_users().await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");

        let bad = StaticSource::new(StaticResponse::Body("<html>".into()));
        assert!(matches!(bad.fetch_users().await, Err(SourceError::JsonParse(_))));

        let status = StaticSource::new(StaticResponse::Status(500));
        assert!(matches!(status.fetch_users().await, Err(SourceError::Status(500))));
    }

    #[test]
    fn test_http_source_new() {
        let source = HttpSource::new("http://localhost:9/users", Duration::from_secs(1)).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:9/users");
        assert_eq!(source.name(), "http");
    }
}
