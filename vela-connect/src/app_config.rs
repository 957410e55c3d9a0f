use serde::Deserialize;
use std::env;
use vela_shared::pii::Masked;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub shopify: ShopifyConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShopifyConfig {
    /// Shop handle, i.e. the `{shop_name}` in `{shop_name}.myshopify.com`.
    pub shop_name: String,
    pub access_token: Masked<String>,
    pub api_version: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub api_key: Masked<String>,
    pub base_url: String,
    pub model: String,
}

impl Config {
    /// Layered load: config/default, then the RUN_MODE overlay and an
    /// optional local file, then `VELA__` prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("VELA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
