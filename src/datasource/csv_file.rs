//! Product dataset stored as CSV.
//!
//! Expected header: `product_id,daily_sales,stock_available,days_to_expiry`.
//! Extra columns are ignored.

use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{DataSourceError, ProductDataSource};
use crate::domain::ProductRecord;

#[derive(Debug, Clone)]
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductDataSource for CsvDataSource {
    fn load_products(&self) -> Result<Vec<ProductRecord>, DataSourceError> {
        let file = std::fs::File::open(&self.path)
            .map_err(|e| DataSourceError::Io(format!("{}: {}", self.path.display(), e)))?;
        let records = parse_records(file)?;
        debug!(path = %self.path.display(), rows = records.len(), "loaded product dataset");
        Ok(records)
    }
}

/// Decode dataset rows from any CSV reader.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<ProductRecord>, DataSourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<ProductRecord>().enumerate() {
        let record = row.map_err(|e| DataSourceError::ParseError {
            row: i + 1,
            message: e.to_string(),
        })?;
        out.push(record);
    }

    if out.is_empty() {
        return Err(DataSourceError::Empty);
    }
    Ok(out)
}
