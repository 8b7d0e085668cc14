pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod server;
pub mod store;

use agent::SalesAgent;
use cli::Args;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.listen_addr());
    info!("Product Store Type: {}", args.store_type);
    match args.store_type.to_lowercase().as_str() {
        "mongodb" | "mongo" => {
            info!("MongoDB Database: {}", args.mongo_database);
            info!("MongoDB Collection: {}", args.mongo_collection);
        }
        "redis" => {
            info!("Redis URL: {}", args.redis_url);
            info!("Redis Product Prefix: {}", args.redis_product_prefix);
        }
        _ => {}
    }
    info!("Chat Model: {}", args.chat_model);
    info!("Chat Base URL: {}", args.chat_base_url);
    info!("Chat Max Tokens: {}", args.chat_max_tokens);
    info!("Chat Temperature: {}", args.chat_temperature);
    info!("Request Timeout: {}s", args.request_timeout_secs);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let agent = SalesAgent::new(&args).await?;
    let addr = args.listen_addr();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, agent, args.clone());
    server.run().await?;

    Ok(())
}
