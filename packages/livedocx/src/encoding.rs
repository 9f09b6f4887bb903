//! Base64 payloads and local file access shared by the proxies.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{Error, Result};

pub(crate) fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode a payload from the service, ignoring line breaks.
pub(crate) fn decode(payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload.split_whitespace().collect();
    Ok(STANDARD.decode(compact)?)
}

pub(crate) fn decode_all(payloads: Vec<String>) -> Result<Vec<Vec<u8>>> {
    payloads.iter().map(|p| decode(p)).collect()
}

/// Read a local file that must exist and be non-empty.
pub(crate) fn read_required(path: &Path) -> Result<Vec<u8>> {
    match std::fs::read(path) {
        Ok(data) if !data.is_empty() => Ok(data),
        _ => Err(Error::FileNotFound {
            path: path.to_path_buf(),
        }),
    }
}

/// The last component of `name`, which is how the service stores files.
pub(crate) fn basename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}
