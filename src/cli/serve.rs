// HTTP serving of a guide
//
// Every request is rendered from the in-memory guide; nothing is written
// to disk. One thread per connection, the guide is only read.

use crate::error::{Error, Result};
use crate::guide::Guide;
use crate::paths::append_slash;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_HOST: &str = "127.0.0.1";

/// Turn a `port` or `host:port` argument into a bind address
pub fn parse_address(arg: &str) -> Result<String> {
    let (host, port) = match arg.rsplit_once(':') {
        Some((host, port)) => (host, port),
        None => (DEFAULT_HOST, arg),
    };
    let host = if host.is_empty() { DEFAULT_HOST } else { host };

    let port: u16 = port
        .parse()
        .map_err(|_| Error::other(format!("Invalid port: {}", port)))?;

    Ok(format!("{}:{}", host, port))
}

/// Serve the guide until the process is stopped
pub fn serve(guide: Arc<Guide>, address: &str) -> Result<()> {
    let listener = TcpListener::bind(address)
        .map_err(|e| Error::other(format!("Failed to bind to {}: {}", address, e)))?;

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let guide = Arc::clone(&guide);
                std::thread::spawn(move || {
                    if let Err(e) = handle_request(stream, &guide) {
                        warn!(error = %e, "request failed");
                    }
                });
            }
            Err(e) => warn!(error = %e, "connection error"),
        }
    }

    Ok(())
}

/// An HTTP response ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    fn text(status: u16, reason: &'static str) -> Self {
        Self {
            status,
            reason,
            content_type: "text/plain; charset=utf-8",
            location: None,
            body: reason.as_bytes().to_vec(),
        }
    }

    fn redirect(location: String) -> Self {
        Self {
            location: Some(location),
            ..Self::text(301, "Moved Permanently")
        }
    }
}

/// Answer one request against the guide
pub fn respond(guide: &Guide, method: &str, target: &str) -> Response {
    if method != "GET" {
        return Response::text(405, "Method Not Allowed");
    }

    let path = urlparse(target);
    let slashed = append_slash(&path);
    if slashed != path {
        return Response::redirect(slashed);
    }

    match guide.render(&path) {
        Ok(rendered) => {
            debug!(status = 200, path = %path, "served");
            Response {
                status: 200,
                reason: "OK",
                content_type: guess_content_type(&path),
                location: None,
                body: rendered.into_bytes(),
            }
        }
        Err(e) => {
            warn!(path = %path, error = %e, "render failed");
            if e.is_not_found() {
                Response::text(404, "Not Found")
            } else {
                Response::text(500, "Internal Server Error")
            }
        }
    }
}

/// Handle a single HTTP request
fn handle_request(mut stream: TcpStream, guide: &Guide) -> Result<()> {
    let mut buffer = [0; 4096];
    let n = stream.read(&mut buffer)?;
    let request = String::from_utf8_lossy(&buffer[..n]);

    // Parse request line
    let request_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = request_line.split_whitespace().collect();

    let response = match parts.as_slice() {
        [method, target, ..] => respond(guide, method, target),
        _ => Response::text(400, "Bad Request"),
    };

    send_response(&mut stream, &response)
}

/// Send an HTTP response
fn send_response(stream: &mut TcpStream, response: &Response) -> Result<()> {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n",
        response.status,
        response.reason,
        response.content_type,
        response.body.len()
    );
    if let Some(location) = &response.location {
        head.push_str(&format!("Location: {}\r\n", location));
    }
    head.push_str("Connection: close\r\n\r\n");

    stream.write_all(head.as_bytes())?;
    stream.write_all(&response.body)?;
    stream.flush()?;

    Ok(())
}

/// Guess content type from the request path's extension
fn guess_content_type(path: &str) -> &'static str {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        None | Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Strip the query string and decode percent escapes
fn urlparse(s: &str) -> String {
    let path = s.split('?').next().unwrap_or(s);

    let mut bytes = Vec::with_capacity(path.len());
    let raw = path.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' && i + 2 < raw.len() {
            let decoded = std::str::from_utf8(&raw[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                bytes.push(byte);
                i += 3;
                continue;
            }
        }
        bytes.push(raw[i]);
        i += 1;
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
