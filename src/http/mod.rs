//! Minimal HTTP framing for the JSON-RPC control plane.
//!
//! This is not a general HTTP stack. The header block is used for the
//! length field and to stay compatible with other JSON-RPC
//! implementations, nothing more: no chunked encoding, no pipelining,
//! no header folding.

pub mod framer;
pub mod headers;
pub mod parser;

pub use framer::{build_reply, build_request, read_message};
pub use headers::HeaderMap;
pub use parser::{
    read_headers, read_request_line, read_status_line, Method, RequestLine, StatusLine,
};

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP framing errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unparsable request line. The caller must close the connection.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Declared body length is negative or above the configured maximum.
    /// Raised before any body byte is consumed.
    #[error("message too large: declared {declared} bytes, limit {limit}")]
    TooLarge { declared: i64, limit: usize },
}

/// CRLF line ending
pub const CRLF: &str = "\r\n";

pub const HTTP_OK: u16 = 200;
pub const HTTP_BAD_REQUEST: u16 = 400;
pub const HTTP_UNAUTHORIZED: u16 = 401;
pub const HTTP_FORBIDDEN: u16 = 403;
pub const HTTP_NOT_FOUND: u16 = 404;
pub const HTTP_INTERNAL_SERVER_ERROR: u16 = 500;

/// Reason phrase for the status codes the reply builder emits.
/// Unrecognized codes get an empty phrase, not an error.
pub(crate) fn reason_phrase(status: u16) -> &'static str {
    match status {
        HTTP_OK => "OK",
        HTTP_BAD_REQUEST => "Bad Request",
        HTTP_FORBIDDEN => "Forbidden",
        HTTP_NOT_FOUND => "Not Found",
        HTTP_INTERNAL_SERVER_ERROR => "Internal Server Error",
        _ => "",
    }
}
