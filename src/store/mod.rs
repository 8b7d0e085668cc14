mod memory;
mod mongodb;
mod redis;

pub use self::memory::MemoryProductStore;
pub use self::mongodb::MongoProductStore;
pub use self::redis::RedisProductStore;

use async_trait::async_trait;
use log::{ info, warn };
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::cli::Args;
use crate::models::product::Product;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] ::mongodb::error::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Product document decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Product catalog file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Product store timed out after {0:?}")]
    Timeout(Duration),

    #[error("Product store configuration error: {0}")]
    Config(String),
}

/// Read-only access to storefront catalogs.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product whose `domain` equals `domain`, in the backend's native
    /// order. Implementations must not re-sort.
    async fn find_by_domain(&self, domain: &str) -> Result<Vec<Product>, StoreError>;

    /// Releases backend resources. Called once, at shutdown.
    async fn close(&self) {}
}

pub async fn create_product_store(args: &Args) -> Result<Arc<dyn ProductStore>, StoreError> {
    match args.store_type.to_lowercase().as_str() {
        "mongodb" | "mongo" => {
            let store = MongoProductStore::connect(
                &args.mongo_uri,
                &args.mongo_database,
                &args.mongo_collection,
                args.request_timeout()
            ).await?;
            Ok(Arc::new(store))
        }
        "redis" => {
            let store = RedisProductStore::new(
                &args.redis_url,
                &args.redis_product_prefix,
                args.request_timeout()
            )?;
            Ok(Arc::new(store))
        }
        "memory" => {
            let store = match &args.memory_catalog_path {
                Some(path) => MemoryProductStore::from_json_file(path)?,
                None => {
                    warn!("No --memory-catalog-path given; the in-memory catalog is empty");
                    MemoryProductStore::default()
                }
            };
            Ok(Arc::new(store))
        }
        _ => Err(StoreError::Config(format!("Unsupported product store type: {}", args.store_type))),
    }
}

/// Runs one backend call under `timeout`, mapping expiry to `StoreError::Timeout`.
pub(crate) async fn with_deadline<T, E, F>(timeout: Duration, call: F) -> Result<T, StoreError>
    where F: Future<Output = Result<T, E>>, StoreError: From<E>
{
    tokio::time
        ::timeout(timeout, call).await
        .map_err(|_| StoreError::Timeout(timeout))?
        .map_err(StoreError::from)
}

pub async fn initialize_product_store(args: &Args) -> Result<Arc<dyn ProductStore>, StoreError> {
    match args.store_type.to_lowercase().as_str() {
        "mongodb" | "mongo" => {
            info!(
                "Products will be read from MongoDB collection {}.{}",
                args.mongo_database,
                args.mongo_collection
            )
        }
        "redis" => {
            info!("Products will be read from Redis lists prefixed '{}'", args.redis_product_prefix)
        }
        "memory" => {
            info!(
                "Products will be read from the in-memory catalog {}",
                args.memory_catalog_path.as_deref().unwrap_or("(empty)")
            )
        }
        other => info!("Products will be read from the '{}' store", other),
    }
    create_product_store(args).await
}
