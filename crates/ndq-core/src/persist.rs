//! JSON file output for raw and normalized records.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;

/// Write `value` as pretty-printed JSON, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut encoded = serde_json::to_string_pretty(value)?;
    encoded.push('\n');
    fs::write(path, encoded)?;
    Ok(())
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, RawSymbolRecord, Symbol, UtcDateTime};
    use serde_json::json;

    #[test]
    fn raw_record_survives_a_file_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("aapl_raw.json");
        let record = RawSymbolRecord::new(
            Symbol::parse("AAPL").expect("valid symbol"),
            UtcDateTime::parse("2024-05-01T12:00:00Z").expect("valid timestamp"),
        )
        .with_payload(Category::Info, json!({"companyName": "Apple Inc."}));

        write_json_file(&path, &record).expect("written");
        let restored: RawSymbolRecord = read_json_file(&path).expect("read back");

        assert_eq!(restored, record);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = read_json_file::<RawSymbolRecord>(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CoreError::Io(_))));
    }

    #[test]
    fn malformed_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").expect("written");

        let result = read_json_file::<RawSymbolRecord>(&path);
        assert!(matches!(result, Err(CoreError::Serialization(_))));
    }
}
