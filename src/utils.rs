//! Utility functions for form bodies, response inspection and paths

use crate::types::Params;
use std::path::{Path, PathBuf};

/// Marker the server puts in a non-JSON reply when it refuses this client version
pub const UPGRADE_MARKER: &str = " upgrade ";

/// Encode parameters as an `application/x-www-form-urlencoded` body
///
/// Keys are emitted in sorted order so the same mapping always gives the same
/// body. An empty mapping gives an empty string.
///
/// # Examples
///
/// ```
/// use training_client::types::Params;
/// use training_client::utils::encode_form;
///
/// let mut params = Params::new();
/// params.insert("user".to_string(), "a b".to_string());
/// params.insert("password".to_string(), "x&y".to_string());
/// assert_eq!(encode_form(&params), "password=x%26y&user=a+b");
/// ```
#[must_use]
pub fn encode_form(params: &Params) -> String {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for key in keys {
        serializer.append_pair(key, &params[key]);
    }
    serializer.finish()
}

/// Decode an `application/x-www-form-urlencoded` body into parameters
///
/// When a key appears more than once the last value wins.
#[must_use]
pub fn decode_form(body: &str) -> Params {
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

/// Check whether a response body carries the server's upgrade notice
#[must_use]
pub fn signals_upgrade(body: &[u8]) -> bool {
    String::from_utf8_lossy(body).contains(UPGRADE_MARKER)
}

/// Directory where a staging file for `path` must live
///
/// Staging next to the destination keeps the final rename on one filesystem.
/// A bare file name stages in the current directory.
#[must_use]
pub fn staging_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// File name reported for an uploaded file: the last component of its path
#[must_use]
pub fn upload_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
