use async_trait::async_trait;
use futures::TryStreamExt;
use log::{ debug, info };
use mongodb::{ bson::doc, options::ClientOptions, Client, Collection };
use std::time::Duration;

use super::{ with_deadline, ProductStore, StoreError };
use crate::models::product::Product;

pub struct MongoProductStore {
    client: Client,
    collection: Collection<Product>,
    timeout: Duration,
}

impl MongoProductStore {
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        timeout: Duration
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        client.database(database).run_command(doc! { "ping": 1 }).await?;
        info!("Connected to MongoDB database '{}'", database);

        let collection = client.database(database).collection::<Product>(collection);
        Ok(Self { client, collection, timeout })
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn find_by_domain(&self, domain: &str) -> Result<Vec<Product>, StoreError> {
        let products: Vec<Product> = with_deadline(self.timeout, async {
            let cursor = self.collection.find(doc! { "domain": domain }).await?;
            cursor.try_collect::<Vec<Product>>().await
        }).await?;
        debug!("MongoDB returned {} products for '{}'", products.len(), domain);
        Ok(products)
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB connection closed");
    }
}
