//! Static product catalog loaded from a local JSON file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TrendlensError};
use crate::product::Product;

/// Parsed contents of the catalog file: `{ "products": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    /// Read and parse the catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TrendlensError::Catalog(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(contents)?;
        Ok(catalog)
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Clone the product with the given id, or report it missing.
    pub fn select(&self, id: i64) -> Result<Product> {
        self.find(id)
            .cloned()
            .ok_or(TrendlensError::ProductNotFound(id))
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
