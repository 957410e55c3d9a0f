pub mod app_config;
pub mod llm;
pub mod shopify;

pub use llm::CompletionClient;
pub use shopify::ShopifyClient;
