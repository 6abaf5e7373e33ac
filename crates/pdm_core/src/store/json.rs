//! File-backed load/save for JSON collection documents.

use super::{StoreError, StoreResult};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

const INDENT: &[u8] = b"    ";

/// How a document was obtained by [`load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The document existed and parsed.
    Loaded,
    /// No document existed; the default was written.
    Initialized,
    /// The document was unparsable; the default replaced it.
    Recovered { reason: String },
}

/// Loaded document plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub status: LoadStatus,
}

/// Serializes `data` to `path`, replacing any previous content.
///
/// Missing parent directories are created.
pub fn save<T: Serialize + ?Sized>(path: &Path, data: &T) -> StoreResult<()> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    data.serialize(&mut serializer)
        .map_err(|source| StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    buffer.push(b'\n');

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, buffer).map_err(|source| {
        error!(
            "event=store_save module=store status=error path={} error={}",
            path.display(),
            source
        );
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Loads the document at `path`, falling back to `default`.
///
/// # Side effects
/// - Writes `default` to `path` when the file is missing.
/// - Overwrites an unparsable file with `default` and reports
///   [`LoadStatus::Recovered`].
///
/// # Errors
/// - Returns `StoreError::Io` when the file exists but cannot be read, or the
///   default cannot be written.
pub fn load<T>(path: &Path, default: T) -> StoreResult<Loaded<T>>
where
    T: Serialize + DeserializeOwned,
{
    let started_at = Instant::now();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            save(path, &default)?;
            info!(
                "event=store_load module=store status=initialized path={} duration_ms={}",
                path.display(),
                started_at.elapsed().as_millis()
            );
            return Ok(Loaded {
                data: default,
                status: LoadStatus::Initialized,
            });
        }
        Err(source) => {
            error!(
                "event=store_load module=store status=error path={} error={}",
                path.display(),
                source
            );
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_json::from_str::<T>(&text) {
        Ok(data) => {
            info!(
                "event=store_load module=store status=ok path={} duration_ms={}",
                path.display(),
                started_at.elapsed().as_millis()
            );
            Ok(Loaded {
                data,
                status: LoadStatus::Loaded,
            })
        }
        Err(parse_err) => {
            warn!(
                "event=store_load module=store status=recovered path={} line={} column={}",
                path.display(),
                parse_err.line(),
                parse_err.column()
            );
            save(path, &default)?;
            Ok(Loaded {
                data: default,
                status: LoadStatus::Recovered {
                    reason: parse_err.to_string(),
                },
            })
        }
    }
}
