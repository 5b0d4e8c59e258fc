#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset (de)serialization and file persistence.
//!
//! Stateless free functions: [`decode`]/[`encode`] translate between the
//! JSON text payload and the typed [`Dataset`], [`load`]/[`save`] add the
//! single blocking file read/write around them. Every failure surfaces as a
//! typed [`DatasetError`]; the only silent fallbacks in the system are the
//! per-field parse defaults inside the record model.

use std::path::Path;

use camera_map_camera_models::Dataset;

/// Errors that can occur while decoding, encoding, or persisting a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Input file does not exist.
    #[error("file not found: {0}")]
    NotFound(String),

    /// Payload is malformed or schema-incompatible JSON.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller passed an unusable argument.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what went wrong.
        message: String,
    },
}

/// Decodes a JSON text payload into a [`Dataset`].
///
/// # Errors
///
/// Returns [`DatasetError::InvalidArgument`] when `text` is empty or
/// whitespace-only, and [`DatasetError::Decode`] when the JSON is malformed
/// or not an object-shaped payload.
pub fn decode(text: &str) -> Result<Dataset, DatasetError> {
    if text.trim().is_empty() {
        return Err(DatasetError::InvalidArgument {
            message: "dataset text must not be empty".to_string(),
        });
    }
    Ok(serde_json::from_str(text)?)
}

/// Encodes a [`Dataset`] as pretty-printed JSON with the canonical upstream
/// field names, suitable for a round trip through [`decode`].
///
/// # Errors
///
/// Returns [`DatasetError::Decode`] if serialization fails.
pub fn encode(dataset: &Dataset) -> Result<String, DatasetError> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

/// Reads and decodes a dataset file.
///
/// # Errors
///
/// Returns [`DatasetError::NotFound`] when `path` does not exist,
/// [`DatasetError::Io`] when the read fails, and the [`decode`] errors for a
/// bad payload.
pub fn load(path: &Path) -> Result<Dataset, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.display().to_string()));
    }

    let text = std::fs::read_to_string(path)?;
    let dataset = decode(&text)?;
    log::info!(
        "Loaded {} camera records from {}",
        dataset.records().len(),
        path.display()
    );
    Ok(dataset)
}

/// Encodes a dataset and writes it to `path`.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] when the write fails, or an encode error.
pub fn save(dataset: &Dataset, path: &Path) -> Result<(), DatasetError> {
    let text = encode(dataset)?;
    std::fs::write(path, text)?;
    log::info!(
        "Saved {} camera records to {}",
        dataset.records().len(),
        path.display()
    );
    Ok(())
}
