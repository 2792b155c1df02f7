//! Data sources feeding the pricing engines: product datasets for the
//! recommender and NFC tag payloads for spot quotes.

use crate::domain::ProductRecord;
use std::fmt;

pub mod csv_file;
pub mod mock;
pub mod nfc;

pub use csv_file::CsvDataSource;
pub use mock::MockDataSource;
pub use nfc::{parse_payload, NfcPayload, PayloadError};

/// Source of historical product rows.
///
/// Implementations return rows in dataset order; the row position is the
/// recommender's state index.
pub trait ProductDataSource: Send + Sync + fmt::Debug {
    fn load_products(&self) -> Result<Vec<ProductRecord>, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSourceError {
    /// The dataset file could not be opened or read.
    Io(String),
    /// A row could not be decoded.
    ParseError { row: usize, message: String },
    /// The dataset has a header but no rows.
    Empty,
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::Io(msg) => write!(f, "IO error: {}", msg),
            DataSourceError::ParseError { row, message } => {
                write!(f, "Parse error at row {}: {}", row, message)
            }
            DataSourceError::Empty => write!(f, "Dataset is empty"),
        }
    }
}

impl std::error::Error for DataSourceError {}
