//! Integration tests for [`HttpOracle`] against a one-shot local HTTP stub.

use std::time::Duration;

use assert_matches::assert_matches;
use cartaporte_core::manifest::Manifest;
use cartaporte_oracle::{ComplianceOracle, HttpOracle, OracleConfig, OracleError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one request with the given status line and JSON body.
/// Returns the base URL and a handle resolving to the raw request text.
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{addr}"), handle)
}

/// Read headers plus a `content-length` body.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn manifest() -> Manifest {
    Manifest {
        version: "3.1".to_string(),
        identifier: "CCC1A2B3-C4D5-4E6F-8A9B-0C1D2E3F4A5B".to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: successful verdict
// ---------------------------------------------------------------------------

#[tokio::test]
async fn decodes_verdict_and_posts_manifest() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"valid":false,"errors":["RFC not registered"],"warnings":[],"score":95}"#,
    )
    .await;
    let mut config = OracleConfig::new(url);
    config.api_key = Some("token-123".to_string());
    let oracle = HttpOracle::new(config).unwrap();

    let verdict = oracle.verify(&manifest()).await.unwrap();

    assert!(!verdict.valid);
    assert_eq!(verdict.errors, vec!["RFC not registered"]);
    assert_eq!(verdict.score, 95.0);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /validate "));
    assert!(request.to_lowercase().contains("authorization: bearer token-123"));
    assert!(request.contains("CCC1A2B3-C4D5-4E6F-8A9B-0C1D2E3F4A5B"));
}

// ---------------------------------------------------------------------------
// Test: failure modes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_is_error() {
    let (url, _server) = serve_once("401 Unauthorized", r#"{"error":"expired token"}"#).await;
    let oracle = HttpOracle::new(OracleConfig::new(url)).unwrap();

    let err = oracle.verify(&manifest()).await.unwrap_err();

    assert_matches!(err, OracleError::Status { status: 401, .. });
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let (url, _server) = serve_once("200 OK", r#"{"ok":true}"#).await;
    let oracle = HttpOracle::new(OracleConfig::new(url)).unwrap();

    let err = oracle.verify(&manifest()).await.unwrap_err();

    assert_matches!(err, OracleError::Decode(_));
}

#[tokio::test]
async fn unreachable_authority_is_request_error() {
    // Bind then drop to obtain a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = OracleConfig::new(format!("http://{addr}"));
    config.timeout = Duration::from_secs(2);
    let oracle = HttpOracle::new(config).unwrap();

    let err = oracle.verify(&manifest()).await.unwrap_err();

    assert_matches!(err, OracleError::Request(_));
}
