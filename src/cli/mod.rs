use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Server Args ---
    /// Host address for the HTTP server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0")]
    pub server_addr: String,

    /// Port for the HTTP server to listen on.
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    // --- Product Store Args ---
    /// Product store type (mongodb, redis, memory)
    #[arg(long, env = "STORE_TYPE", default_value = "mongodb")]
    pub store_type: String,

    /// MongoDB connection string (e.g., mongodb://127.0.0.1:27017)
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://127.0.0.1:27017")]
    pub mongo_uri: String,

    /// MongoDB database holding the product collection.
    #[arg(long, env = "MONGO_DATABASE", default_value = "test")]
    pub mongo_database: String,

    /// MongoDB collection holding product documents.
    #[arg(long, env = "MONGO_COLLECTION", default_value = "products")]
    pub mongo_collection: String,

    /// Redis URL for the product store (e.g., redis://127.0.0.1:6379)
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Prefix for Redis product list keys. The full key is `{prefix}{domain}`.
    #[arg(long, env = "REDIS_PRODUCT_PREFIX", default_value = "products:")]
    pub redis_product_prefix: String,

    /// JSON file (array of product documents) that seeds the `memory` store.
    #[arg(long, env = "MEMORY_CATALOG_PATH")]
    pub memory_catalog_path: Option<String>,

    // --- Chat LLM Provider Args ---
    /// API Key for the chat completion provider.
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub chat_api_key: String,

    /// Model name for chat completion.
    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-3.5-turbo")]
    pub chat_model: String,

    /// Base URL for the chat completion API. `/v1/chat/completions` is appended.
    #[arg(long, env = "CHAT_BASE_URL", default_value = "https://api.openai.com")]
    pub chat_base_url: String,

    /// Upper bound on generated tokens per reply.
    #[arg(long, env = "CHAT_MAX_TOKENS", default_value = "300")]
    pub chat_max_tokens: u32,

    /// Sampling temperature sent with every completion request.
    #[arg(long, env = "CHAT_TEMPERATURE", default_value = "1.0")]
    pub chat_temperature: f32,

    /// Timeout in seconds for outbound calls (product store and completion API).
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "60")]
    pub request_timeout_secs: u64,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Optional path to the TLS certificate file (PEM format) for enabling HTTPS. Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format) for enabling HTTPS. Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.port)
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}
