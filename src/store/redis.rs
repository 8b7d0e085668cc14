use async_trait::async_trait;
use log::debug;
use redis::{ AsyncCommands, Client };
use std::time::Duration;

use super::{ with_deadline, ProductStore, StoreError };
use crate::models::product::Product;

/// Catalogs kept as Redis lists, one per domain at `{prefix}{domain}`. Each
/// element is a product JSON document; list order is catalog order.
pub struct RedisProductStore {
    client: Client,
    key_prefix: String,
    timeout: Duration,
}

impl RedisProductStore {
    pub fn new(url: &str, key_prefix: &str, timeout: Duration) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::open(url)?,
            key_prefix: key_prefix.to_string(),
            timeout,
        })
    }

    fn key(&self, domain: &str) -> String {
        format!("{}{}", self.key_prefix, domain)
    }

    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        with_deadline(self.timeout, self.client.get_multiplexed_async_connection()).await
    }
}

pub(crate) fn decode_products(entries: &[String]) -> Result<Vec<Product>, StoreError> {
    entries
        .iter()
        .map(|entry| serde_json::from_str::<Product>(entry).map_err(StoreError::from))
        .collect()
}

#[async_trait]
impl ProductStore for RedisProductStore {
    async fn find_by_domain(&self, domain: &str) -> Result<Vec<Product>, StoreError> {
        let mut conn = self.get_connection().await?;
        let key = self.key(domain);
        let entries: Vec<String> = with_deadline(self.timeout, conn.lrange(&key, 0, -1)).await?;
        debug!("Redis list '{}' holds {} products", key, entries.len());
        decode_products(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_entries_in_list_order() {
        let entries = vec![
            r#"{"domain":"shop.example","slug":"b","title":"B","price":{"regular":10}}"#.to_string(),
            r#"{"domain":"shop.example","slug":"a","title":"A"}"#.to_string()
        ];

        let products = decode_products(&entries).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].slug, "b");
        assert_eq!(products[0].price.as_ref().unwrap().regular, Some(10.0));
        assert_eq!(products[1].slug, "a");
    }

    #[test]
    fn malformed_entry_is_a_decode_error() {
        let entries = vec!["not json".to_string()];
        assert!(matches!(decode_products(&entries), Err(StoreError::Decode(_))));
    }

    #[test]
    fn key_uses_prefix() {
        let store = RedisProductStore::new(
            "redis://127.0.0.1:6379",
            "products:",
            Duration::from_secs(1)
        ).unwrap();
        assert_eq!(store.key("shop.example"), "products:shop.example");
    }
}
