//! Mock data source for testing without files.

use super::{DataSourceError, ProductDataSource};
use crate::domain::ProductRecord;

/// Mock data source that returns predefined rows.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    products: Vec<ProductRecord>,
    failure: Option<DataSourceError>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product row.
    pub fn with_product(mut self, record: ProductRecord) -> Self {
        self.products.push(record);
        self
    }

    /// Add multiple product rows.
    pub fn with_products(mut self, records: Vec<ProductRecord>) -> Self {
        self.products.extend(records);
        self
    }

    /// Make every load fail with `err`.
    pub fn with_failure(mut self, err: DataSourceError) -> Self {
        self.failure = Some(err);
        self
    }
}

impl ProductDataSource for MockDataSource {
    fn load_products(&self) -> Result<Vec<ProductRecord>, DataSourceError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_returns_rows_in_order() {
        let mock = MockDataSource::new()
            .with_product(ProductRecord::new("A", 1.0, 1.0, 1.0))
            .with_products(vec![ProductRecord::new("B", 2.0, 2.0, 2.0)]);
        let rows = mock.load_products().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id, "A");
        assert_eq!(rows[1].product_id, "B");
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockDataSource::new().with_failure(DataSourceError::Empty);
        assert_eq!(mock.load_products(), Err(DataSourceError::Empty));
    }
}
