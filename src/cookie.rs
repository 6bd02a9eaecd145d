//! RPC authentication cookie
//!
//! A random credential persisted next to the node's data and handed to
//! local RPC clients out of band. Generated once at startup before the
//! listener accepts connections, removed at shutdown. The server compares
//! it against incoming Authorization headers; that comparison happens
//! elsewhere.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::rngs::OsRng;
use rand::RngCore;

/// Result type for cookie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Cookie file errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Username baked into the cookie. Arbitrary; it only exists so the
/// credential is recognizable in logs.
pub const COOKIEAUTH_USER: &str = "__cookie__";

/// Default name for the auth cookie file, relative to the data directory.
pub const COOKIEAUTH_FILE: &str = ".cookie";

const COOKIE_SIZE: usize = 32;
const TMP_SUFFIX: &str = ".tmp";

/// Resolved location of the cookie file.
///
/// The data directory and any override come from the configuration layer
/// as opaque values; this type only joins paths.
#[derive(Debug, Clone)]
pub struct CookiePaths {
    file: PathBuf,
}

impl CookiePaths {
    /// Resolve the cookie location against the node's data directory.
    /// An absolute override is used as-is, a relative one is joined to
    /// the data directory, and no override means [`COOKIEAUTH_FILE`].
    pub fn new(data_dir: &Path, override_path: Option<&Path>) -> Self {
        let file = match override_path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => data_dir.join(p),
            None => data_dir.join(COOKIEAUTH_FILE),
        };
        CookiePaths { file }
    }

    /// Final path of the credential file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Sibling path the credential is staged at before the rename.
    fn temp_file(&self) -> PathBuf {
        let mut s = self.file.as_os_str().to_os_string();
        s.push(TMP_SUFFIX);
        PathBuf::from(s)
    }
}

/// Generate a fresh cookie and install it atomically.
///
/// Draws 32 random bytes, hex-encodes them behind the fixed user label,
/// writes the line to the temporary sibling and renames it over the final
/// path, so a concurrent reader never observes a partial credential. Any
/// write or rename failure leaves no credential in place.
pub fn generate(paths: &CookiePaths) -> Result<String> {
    let mut secret = [0u8; COOKIE_SIZE];
    OsRng.fill_bytes(&mut secret);
    let cookie = format!("{}:{}", COOKIEAUTH_USER, hex::encode(secret));

    let tmp = paths.temp_file();
    fs::write(&tmp, &cookie)?;
    fs::rename(&tmp, paths.file())?;
    info!(
        "generated RPC authentication cookie {}",
        paths.file().display()
    );

    Ok(cookie)
}

/// Read the cookie back. Only the first line counts; no shape validation
/// beyond what the downstream comparison needs.
pub fn read(paths: &CookiePaths) -> Result<String> {
    let file = fs::File::open(paths.file())?;
    let mut cookie = String::new();
    std::io::BufReader::new(file).read_line(&mut cookie)?;
    while cookie.ends_with('\n') || cookie.ends_with('\r') {
        cookie.pop();
    }
    Ok(cookie)
}

/// Remove the cookie file, best effort. Failure is logged, never
/// escalated; at shutdown there is nothing left to do about it.
pub fn delete(paths: &CookiePaths) {
    if let Err(e) = fs::remove_file(paths.file()) {
        warn!(
            "unable to remove auth cookie file {}: {}",
            paths.file().display(),
            e
        );
    }
}
