//! JSON fetch-result loading

use std::fs;
use std::path::Path;

use crate::data::FetchResult;
use crate::error::DataError;

/// Decode a fetch result from a JSON string
pub fn parse_fetch_result(json: &str) -> Result<FetchResult, DataError> {
    let fetch: FetchResult = serde_json::from_str(json)?;

    if fetch.main_item.id.trim().is_empty() {
        return Err(DataError::MissingFocalItem);
    }

    Ok(fetch)
}

/// Read and decode a fetch result saved to disk
pub fn load_fetch_result(path: impl AsRef<Path>) -> Result<FetchResult, DataError> {
    let path = path.as_ref();
    log::info!("Reading fetch result: {}", path.display());

    let json = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let fetch = parse_fetch_result(&json)?;
    log::debug!(
        "Fetch result for {} carries {} relations",
        fetch.main_item.id,
        fetch.relations.len()
    );

    Ok(fetch)
}
