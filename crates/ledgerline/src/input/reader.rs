//! CSV and JSON row readers.
//!
//! The table core consumes [`RowRecord`]s and has no opinion on where they
//! come from; this module is the convenience collaborator for the common
//! case of a CSV export (or a JSON array of records).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::record::{RawCell, RowRecord};
use super::source::SourceMetadata;
use crate::error::{Result, TableError};

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the input has a header row.
    pub has_header: bool,
    /// Quote character.
    pub quote: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            quote: b'"',
        }
    }
}

/// Reads delimited text into row-records.
pub struct RowReader {
    config: ReaderConfig,
}

impl RowReader {
    /// Create a reader with the default configuration.
    pub fn new() -> Self {
        Self {
            config: ReaderConfig::default(),
        }
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file, returning its rows and provenance metadata.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<(Vec<RowRecord>, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| TableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| TableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let rows = self.read_bytes(&contents)?;
        let column_count = rows.first().map(|r| r.len()).unwrap_or(0);
        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            rows.len(),
            column_count,
        );

        Ok((rows, metadata))
    }

    /// Read delimited text already in memory.
    pub fn read_str(&self, text: &str) -> Result<Vec<RowRecord>> {
        self.read_bytes(text.as_bytes())
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<RowRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        // With has_headers(false) the csv crate still exposes the first
        // record through headers() and re-yields it from records().
        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            (0..reader.headers()?.len())
                .map(|i| format!("column_{}", i + 1))
                .collect()
        };

        if headers.is_empty() {
            return Err(TableError::EmptyData("no columns found".to_string()));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = RowRecord::with_capacity(headers.len());
            for (i, name) in headers.iter().enumerate() {
                // Short rows are padded with nulls; surplus fields dropped.
                let cell = match record.get(i) {
                    Some(value) => RawCell::from(value),
                    None => RawCell::Null,
                };
                row.insert(name.clone(), cell);
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(TableError::EmptyData("no data rows found".to_string()));
        }

        Ok(rows)
    }
}

impl Default for RowReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserialize rows from a JSON array of records.
pub fn rows_from_json(text: &str) -> Result<Vec<RowRecord>> {
    let rows: Vec<RowRecord> = serde_json::from_str(text)?;
    if rows.is_empty() {
        return Err(TableError::EmptyData("no rows in JSON input".to_string()));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_str() {
        let reader = RowReader::new();
        let rows = reader
            .read_str("id,bank,fy_2024\n1,ADIB,12.5\n2,FAB,na\n")
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("bank"), Some(&RawCell::from("ADIB")));
        assert_eq!(rows[1].get("fy_2024"), Some(&RawCell::from("na")));
    }

    #[test]
    fn test_short_rows_padded() {
        let reader = RowReader::new();
        let rows = reader.read_str("id,bank,category\n1,ADIB\n").unwrap();

        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0].get("category"), Some(&RawCell::Null));
    }

    #[test]
    fn test_empty_input_fails() {
        let reader = RowReader::new();
        assert!(matches!(
            reader.read_str(""),
            Err(TableError::EmptyData(_))
        ));
        assert!(matches!(
            reader.read_str("id,bank\n"),
            Err(TableError::EmptyData(_))
        ));
    }

    #[test]
    fn test_rows_from_json() {
        let rows = rows_from_json(
            r#"[{"id": "1", "bank": "ADIB", "fy_2024": 12.5, "fy_2023": null}]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("fy_2024"), Some(&RawCell::Number(12.5)));
        assert_eq!(rows[0].get("fy_2023"), Some(&RawCell::Null));
    }

    #[test]
    fn test_read_path_metadata() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"id,bank,category\n1,ADIB,P&L\n2,FAB,KPI\n")
            .unwrap();

        let reader = RowReader::new();
        let (rows, metadata) = reader.read_path(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(metadata.row_count, 2);
        assert_eq!(metadata.column_count, 3);
        assert!(metadata.hash.starts_with("sha256:"));
    }
}
