//! Dataset sources
//!
//! - One delimited file per table, header row required
//! - Header names matched case-insensitively, extra columns ignored
//! - Any missing file or malformed record fails the whole load (FATAL)
//!
//! A source never returns a partial dataset.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::observability::ObservationScope;

use super::errors::{DatasetError, DatasetResult};
use super::records::{ClaimRecord, FoodListingRecord, ProviderRecord, ReceiverRecord, TableRecord};
use super::table::{Table, TableName};
use super::types::Dataset;

/// Anything that can produce the four tables
pub trait DatasetSource {
    /// Short description for logs (a directory, a URL)
    fn describe(&self) -> String;

    /// Reads all four tables, or fails without producing any
    fn read(&self) -> DatasetResult<Dataset>;
}

/// File names of the four tables within a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub providers: String,
    pub receivers: String,
    pub food_listings: String,
    pub claims: String,
}

impl SourceFiles {
    pub fn get(&self, table: TableName) -> &str {
        match table {
            TableName::Providers => &self.providers,
            TableName::Receivers => &self.receivers,
            TableName::FoodListings => &self.food_listings,
            TableName::Claims => &self.claims,
        }
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            providers: "providers_data.csv".to_string(),
            receivers: "receivers_data.csv".to_string(),
            food_listings: "food_listings_data.csv".to_string(),
            claims: "claims_data.csv".to_string(),
        }
    }
}

/// Flat-file source: four delimited files in one directory
#[derive(Debug, Clone)]
pub struct CsvSource {
    data_dir: PathBuf,
    files: SourceFiles,
    delimiter: u8,
}

impl CsvSource {
    /// Source over `data_dir` with default file names and `,` delimiter
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            files: SourceFiles::default(),
            delimiter: b',',
        }
    }

    pub fn with_files(mut self, files: SourceFiles) -> Self {
        self.files = files;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of one table's file
    pub fn path_for(&self, table: TableName) -> PathBuf {
        self.data_dir.join(self.files.get(table))
    }

    fn read_table<R: TableRecord>(&self, hasher: &mut crc32fast::Hasher) -> DatasetResult<Table> {
        let path = self.path_for(R::TABLE);
        let scope = ObservationScope::new("DATASET_READ", R::TABLE.as_str());

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = if e.kind() == ErrorKind::NotFound {
                    DatasetError::missing_source(&path)
                } else {
                    DatasetError::unreadable(&path, e)
                };
                scope.fail(err.message());
                return Err(err);
            }
        };
        hasher.update(&bytes);

        match parse_table::<R>(&path, &bytes, self.delimiter) {
            Ok(table) => {
                scope.complete_with_rows(table.len());
                Ok(table)
            }
            Err(err) => {
                scope.fail(err.message());
                Err(err)
            }
        }
    }
}

impl DatasetSource for CsvSource {
    fn describe(&self) -> String {
        self.data_dir.display().to_string()
    }

    fn read(&self) -> DatasetResult<Dataset> {
        let mut hasher = crc32fast::Hasher::new();

        let providers = self.read_table::<ProviderRecord>(&mut hasher)?;
        let receivers = self.read_table::<ReceiverRecord>(&mut hasher)?;
        let food_listings = self.read_table::<FoodListingRecord>(&mut hasher)?;
        let claims = self.read_table::<ClaimRecord>(&mut hasher)?;

        Ok(Dataset::new(providers, receivers, food_listings, claims)
            .with_fingerprint(hasher.finalize()))
    }
}

/// Parses one delimited file into a table.
///
/// `path` is only used in error messages. Line numbers are physical lines,
/// so a quoted field spanning several lines is counted in full.
pub fn parse_table<R: TableRecord>(
    path: &Path,
    bytes: &[u8],
    delimiter: u8,
) -> DatasetResult<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| DatasetError::malformed_header(path, e.to_string()))?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(DatasetError::malformed_header(path, "header row is empty"));
    }

    let missing: Vec<&str> = R::REQUIRED
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::malformed_header(
            path,
            format!("missing column(s): {}", missing.join(", ")),
        ));
    }

    reader.set_headers(headers.clone());

    let mut table = Table::new(R::TABLE.as_str(), R::COLUMNS.iter().copied());
    let mut seen = HashSet::new();
    // Header is line 1
    let mut next_line = 2;

    for result in reader.records() {
        let raw = result.map_err(|e| {
            let line = e.position().map_or(next_line, |p| p.line());
            DatasetError::malformed_record(path, line, e.to_string())
        })?;
        let line = raw.position().map_or(next_line, |p| p.line());
        next_line = line + 1;

        let record: R = raw
            .deserialize(Some(&headers))
            .map_err(|e| DatasetError::malformed_record(path, line, e.to_string()))?;

        record
            .validate()
            .map_err(|reason| DatasetError::malformed_record(path, line, reason))?;

        if !seen.insert(record.identity()) {
            return Err(DatasetError::duplicate_identity(
                path,
                line,
                R::IDENTITY,
                record.identity(),
            ));
        }

        table.push_row(record.into_row());
    }

    Ok(table)
}
