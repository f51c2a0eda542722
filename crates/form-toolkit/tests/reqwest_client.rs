//! `ReqwestClient` against a one-shot local HTTP listener
//!
//! Run with `cargo test -p form-toolkit --features reqwest`.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;

use form_toolkit::{submit_form, FormSnapshot, HttpClient, ReqwestClient, SubmissionConfig, SubmitError};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Accepts one connection, answers with `status` and `body`, and sends
/// back the raw request text
fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/submit", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        tx.send(request).unwrap();
    });

    (url, rx)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).into_owned();
        let Some(end) = text.find("\r\n\r\n") else {
            continue;
        };
        let head = text[..end].to_ascii_lowercase();
        if head.contains("transfer-encoding: chunked") {
            if text.ends_with("0\r\n\r\n") {
                return text;
            }
            continue;
        }
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            return text;
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn signup() -> FormSnapshot {
    vec![("name", "Ada"), ("email", "ada@example.com")].into_iter().collect()
}

#[tokio::test]
async fn test_posts_multipart_with_accept_header() {
    let (url, request) = serve_once("201 Created", r#"{"success":true}"#);
    let client = ReqwestClient::default();

    let response = client.post_form(&url, &signup()).await.unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.body, r#"{"success":true}"#);

    let request = request.recv().unwrap();
    let lowered = request.to_ascii_lowercase();
    assert!(lowered.starts_with("post /submit http/1.1"), "{request}");
    assert!(lowered.contains("accept: application/json"), "{request}");
    assert!(lowered.contains("content-type: multipart/form-data"), "{request}");
    assert!(request.contains(r#"name="name""#), "{request}");
    assert!(request.contains(r#"name="email""#), "{request}");
    assert!(request.contains("ada@example.com"), "{request}");
}

#[tokio::test]
async fn test_configured_accept_header() {
    let (url, request) = serve_once("200 OK", "{}");
    let config = SubmissionConfig {
        accept: "application/vnd.api+json".to_string(),
    };
    let client = ReqwestClient::new(&config);

    client.post_form(&url, &signup()).await.unwrap();

    let request = request.recv().unwrap().to_ascii_lowercase();
    assert!(request.contains("accept: application/vnd.api+json"), "{request}");
}

#[tokio::test]
async fn test_submit_form_parses_json_under_error_status() {
    let (url, _request) = serve_once("422 Unprocessable Entity", r#"{"success":false,"field":"email"}"#);
    let client = ReqwestClient::default();

    let body = submit_form(&client, &url, &signup()).await;
    assert_eq!(body, Some(json!({"success": false, "field": "email"})));
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let url = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/submit", listener.local_addr().unwrap())
    };
    let client = ReqwestClient::default();

    assert!(matches!(
        client.post_form(&url, &signup()).await,
        Err(SubmitError::Transport(_))
    ));
    assert_eq!(submit_form(&client, &url, &signup()).await, None);
}
