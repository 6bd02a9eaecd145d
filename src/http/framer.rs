//! HTTP message framing
//!
//! Symmetric build/read operations for the byte sequences that carry
//! JSON-RPC bodies. Outbound messages are assembled into a buffer in one
//! pass; inbound messages are read headers-first so an oversized body can
//! be rejected before a single body byte is consumed.

use std::io::BufRead;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use super::parser::read_headers;
use super::{reason_phrase, Error, HeaderMap, Result, CRLF, HTTP_UNAUTHORIZED};

/// RFC 1123 date, always rendered in UTC.
const RFC1123: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] +0000"
);

fn rfc1123_time() -> String {
    OffsetDateTime::now_utc()
        .format(&RFC1123)
        .unwrap_or_default()
}

/// Fixed page returned on authentication failure. Exactly 296 bytes, so
/// an unauthorized reply has the same size whatever the request was.
const UNAUTHORIZED_BODY: &str = concat!(
    "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\"\r\n",
    "\"http://www.w3.org/TR/1999/REC-html401-19991224/loose.dtd\">\r\n",
    "<HTML>\r\n",
    "<HEAD>\r\n",
    "<TITLE>Error</TITLE>\r\n",
    "<META HTTP-EQUIV='Content-Type' CONTENT='text/html; charset=ISO-8859-1'>\r\n",
    "</HEAD>\r\n",
    "<BODY><H1>401 Unauthorized.</H1></BODY>\r\n",
    "</HTML>\r\n",
);

fn push_header(buf: &mut Vec<u8>, name: &str, value: &str) {
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(CRLF.as_bytes());
}

/// Build the outbound POST request carrying a JSON-RPC body.
///
/// The request line and header order are fixed; peers only rely on this
/// being well-formed HTTP, not on the order itself.
pub fn build_request(user_agent: &str, body: &[u8], extra_headers: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(body.len() + 256);

    buf.extend_from_slice(b"POST / HTTP/1.1\r\n");
    push_header(&mut buf, "User-Agent", user_agent);
    push_header(&mut buf, "Host", "127.0.0.1");
    push_header(&mut buf, "Content-Type", "application/json");
    push_header(&mut buf, "Content-Length", &body.len().to_string());
    push_header(&mut buf, "Connection", "close");
    push_header(&mut buf, "Accept", "application/json");
    for (name, value) in extra_headers {
        push_header(&mut buf, name, value);
    }
    buf.extend_from_slice(CRLF.as_bytes());
    buf.extend_from_slice(body);

    buf
}

/// Build an HTTP reply around a JSON-RPC body.
///
/// A 401 status returns the canned fixed-size page and ignores `body` and
/// `keep_alive` entirely, so authentication failures cannot be told apart
/// by response size.
pub fn build_reply(status: u16, body: &[u8], keep_alive: bool, server_ident: &str) -> Vec<u8> {
    if status == HTTP_UNAUTHORIZED {
        return format!(
            "HTTP/1.0 401 Authorization Required\r\n\
             Date: {}\r\n\
             Server: {}\r\n\
             WWW-Authenticate: Basic realm=\"jsonrpc\"\r\n\
             Content-Type: text/html\r\n\
             Content-Length: 296\r\n\
             \r\n\
             {}",
            rfc1123_time(),
            server_ident,
            UNAUTHORIZED_BODY,
        )
        .into_bytes();
    }

    let mut buf = format!(
        "HTTP/1.1 {} {}\r\n\
         Date: {}\r\n\
         Connection: {}\r\n\
         Content-Length: {}\r\n\
         Content-Type: application/json\r\n\
         Server: {}\r\n\
         \r\n",
        status,
        reason_phrase(status),
        rfc1123_time(),
        if keep_alive { "keep-alive" } else { "close" },
        body.len(),
        server_ident,
    )
    .into_bytes();
    buf.extend_from_slice(body);

    buf
}

/// Read one message off the stream: header block, then exactly the
/// declared number of body bytes.
///
/// Fails with [`Error::TooLarge`] before reading any body byte when the
/// declared length is negative or exceeds `max_body_size`; a short read
/// surfaces as [`Error::Io`]. On return the `connection` header is
/// normalized to `keep-alive` or `close` (per `proto` when the peer sent
/// neither), which callers use to decide whether to reuse the connection.
pub fn read_message(
    reader: &mut impl BufRead,
    proto: u32,
    max_body_size: usize,
) -> Result<(HeaderMap, Vec<u8>)> {
    let (mut headers, declared) = read_headers(reader)?;

    if declared < 0 || declared as u64 > max_body_size as u64 {
        return Err(Error::TooLarge {
            declared,
            limit: max_body_size,
        });
    }

    let mut body = vec![0u8; declared as usize];
    if !body.is_empty() {
        reader.read_exact(&mut body)?;
    }

    let negotiated = matches!(headers.get("connection"), Some("close") | Some("keep-alive"));
    if !negotiated {
        headers.insert("connection", if proto >= 1 { "keep-alive" } else { "close" });
    }

    Ok((headers, body))
}
