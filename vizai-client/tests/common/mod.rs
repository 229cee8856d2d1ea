//! Loopback HTTP stub used by the transport integration tests.
//!
//! Each [`StubServer`] answers exactly one request with a canned status and
//! body, then records what it received so tests can assert on it.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// What the stub saw on the wire.
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct StubServer {
    pub url: String,
    captured: Receiver<CapturedRequest>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Start a server that replies once with `status` and a JSON `body`.
    pub fn reply(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let (tx, rx) = mpsc::channel();
        let body = body.to_string();

        let handle = thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                let captured = serve_one(stream, status, &body);
                let _ = tx.send(captured);
            }
        });

        Self {
            url: format!("http://{}/generate", addr),
            captured: rx,
            handle: Some(handle),
        }
    }

    /// Block until the single request has been handled.
    pub fn captured(mut self) -> CapturedRequest {
        let request = self
            .captured
            .recv_timeout(Duration::from_secs(10))
            .expect("stub server received no request");
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        request
    }
}

fn serve_one(stream: TcpStream, status: u16, body: &str) -> CapturedRequest {
    stream
        .set_read_timeout(Some(Duration::from_secs(10)))
        .expect("set read timeout");
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut captured = CapturedRequest::default();

    reader
        .read_line(&mut captured.request_line)
        .expect("read request line");
    captured.request_line = captured.request_line.trim_end().to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let (name, value) = (name.trim().to_string(), value.trim().to_string());
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            captured.headers.push((name, value));
        }
    }

    let mut buf = vec![0u8; content_length];
    reader.read_exact(&mut buf).expect("read request body");
    captured.body = String::from_utf8_lossy(&buf).into_owned();

    let response = format!(
        concat!(
            "HTTP/1.1 {} Stub\r\n",
            "Content-Type: application/json\r\n",
            "Content-Length: {}\r\n",
            "Connection: close\r\n\r\n{}"
        ),
        status,
        body.len(),
        body
    );
    // The client may hang up early (body limit tests), so write errors are ignored.
    let mut stream = stream;
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();

    captured
}

/// An address nothing is listening on.
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{}/generate", addr)
}
