//! Request-line, status-line and header-block parsing
//!
//! Each reader consumes exactly one logical element from the stream, so
//! the framer can take over at the body boundary. Request lines are
//! parsed strictly; status lines and header blocks are lenient, matching
//! what peers in this protocol family actually send.

use std::fmt;
use std::io::BufRead;

use super::{Error, HeaderMap, Result, HTTP_INTERNAL_SERVER_ERROR};

/// HTTP methods permitted on the RPC interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Parse method from string; anything outside GET/POST is rejected.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            _ => None,
        }
    }

    /// Convert method to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed HTTP request line.
///
/// `proto` is the minor version of "HTTP/1.x", or 0 when the protocol
/// token was absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub uri: String,
    pub proto: u32,
}

/// A parsed HTTP status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub proto: u32,
    pub status: u16,
}

/// Read one line, terminated by LF, tolerant of a trailing CR.
pub fn read_line(reader: &mut impl BufRead) -> std::io::Result<String> {
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read and parse an HTTP request line.
///
/// Format: METHOD URI [PROTO]
/// Example: POST / HTTP/1.1
///
/// Fails with [`Error::MalformedRequest`] if fewer than two tokens are
/// present, the method is not GET/POST, or the URI is not an absolute
/// path. A missing protocol token yields version 0, not a failure.
pub fn read_request_line(reader: &mut impl BufRead) -> Result<RequestLine> {
    let line = read_line(reader)?;
    let words: Vec<&str> = line.split(' ').collect();

    if words.len() < 2 {
        return Err(Error::MalformedRequest(format!(
            "expected method and URI, got {:?}",
            line
        )));
    }

    let method = Method::from_token(words[0])
        .ok_or_else(|| Error::MalformedRequest(format!("method not allowed: {}", words[0])))?;

    // The URI must be an absolute path, relative to the current host.
    let uri = words[1];
    if uri.is_empty() || !uri.starts_with('/') {
        return Err(Error::MalformedRequest(format!(
            "URI is not an absolute path: {:?}",
            uri
        )));
    }

    let proto = words.get(2).map_or(0, |w| parse_proto(w));

    Ok(RequestLine {
        method,
        uri: uri.to_string(),
        proto,
    })
}

/// Read and parse an HTTP status line, best effort.
///
/// An unparsable line degrades to status 500 and protocol version 0
/// instead of failing the caller; this is a transport diagnostic path,
/// not a hard parse boundary. Only stream-level I/O errors propagate.
pub fn read_status_line(reader: &mut impl BufRead) -> Result<StatusLine> {
    let line = read_line(reader)?;
    let words: Vec<&str> = line.split(' ').collect();

    if words.len() < 2 {
        return Ok(StatusLine {
            proto: 0,
            status: HTTP_INTERNAL_SERVER_ERROR,
        });
    }

    Ok(StatusLine {
        proto: parse_proto(&line),
        status: words[1].parse().unwrap_or(HTTP_INTERNAL_SERVER_ERROR),
    })
}

/// Read a header block up to and including the terminating empty line.
///
/// Each line is split at the first colon; lines without one are skipped
/// silently. Returns the headers and the declared content length (0 when
/// the header is absent or unparsable; may be negative for a hostile
/// peer, which the framer rejects).
pub fn read_headers(reader: &mut impl BufRead) -> Result<(HeaderMap, i64)> {
    let mut headers = HeaderMap::new();
    let mut content_length = 0i64;

    loop {
        let line = read_line(reader)?;
        if line.is_empty() {
            break;
        }
        let Some((name, value)) = HeaderMap::parse_line(&line) else {
            continue;
        };
        if name == "content-length" {
            content_length = value.parse().unwrap_or(0);
        }
        headers.insert(name, value);
    }

    Ok((headers, content_length))
}

/// Extract the minor version digit following "HTTP/1." anywhere in `s`,
/// or 0 when the tag is absent or followed by no digits.
fn parse_proto(s: &str) -> u32 {
    match s.find("HTTP/1.") {
        Some(pos) => {
            let rest = &s[pos + 7..];
            let digits = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
            digits.parse().unwrap_or(0)
        }
        None => 0,
    }
}
