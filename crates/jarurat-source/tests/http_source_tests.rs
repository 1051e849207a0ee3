//! HttpSource tests against a local one-shot HTTP server.

use std::time::Duration;

use jarurat_source::{HttpSource, PatientSource, SourceError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single canned response and return the endpoint URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        // Read until the end of the request headers
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    format!("http://{}/users", addr)
}

#[tokio::test]
async fn test_fetch_users_success() {
    let body = r#"[
        {"id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz", "phone": "1-770-736-8031",
         "address": {"suite": "Apt. 556", "street": "Kulas Light", "city": "Gwenborough", "zipcode": "92998"}},
        {"id": 2, "name": "Ervin Howell", "email": "Shanna@melissa.tv", "phone": "010-692-6593",
         "address": {"suite": "Suite 879", "street": "Victor Plains", "city": "Wisokyburgh"}}
    ]"#;
    let endpoint = serve_once("200 OK", body).await;
    let source = HttpSource::new(&endpoint, Duration::from_secs(5)).unwrap();

    let users = source.fetch_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Leanne Graham");
    assert_eq!(users[1].id, 2);
    assert_eq!(users[1].address.city, "Wisokyburgh");
}

#[tokio::test]
async fn test_fetch_users_non_success_status() {
    let endpoint = serve_once("404 Not Found", "{}").await;
    let source = HttpSource::new(&endpoint, Duration::from_secs(5)).unwrap();

    let err = source.fetch_users().await.unwrap_err();
    assert!(matches!(err, SourceError::Status(404)));
    assert_eq!(err.to_string(), "Failed to fetch patients data");
}

#[tokio::test]
async fn test_fetch_users_malformed_payload() {
    let endpoint = serve_once("200 OK", "not json").await;
    let source = HttpSource::new(&endpoint, Duration::from_secs(5)).unwrap();

    let err = source.fetch_users().await.unwrap_err();
    assert!(matches!(err, SourceError::JsonParse(_)));
}

#[tokio::test]
async fn test_fetch_users_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = format!("http://{}/users", addr);
    let source = HttpSource::new(&endpoint, Duration::from_secs(5)).unwrap();
    let err = source.fetch_users().await.unwrap_err();
    assert!(matches!(err, SourceError::Http(_)));
    assert!(!err.to_string().is_empty());
}
