use async_trait::async_trait;
use log::info;
use std::fs;

use super::{ ProductStore, StoreError };
use crate::models::product::Product;

/// Fixed in-process catalog. Lookups preserve insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryProductStore {
    products: Vec<Product>,
}

impl MemoryProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Loads a catalog from a JSON array of product documents.
    pub fn from_json_file(path: &str) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&content)?;
        info!("Loaded {} products from '{}'", products.len(), path);
        Ok(Self::new(products))
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_by_domain(&self, domain: &str) -> Result<Vec<Product>, StoreError> {
        Ok(
            self.products
                .iter()
                .filter(|p| p.domain == domain)
                .cloned()
                .collect()
        )
    }
}
