use async_trait::async_trait;
use vela_core::extract::ExtractedInfo;
use vela_core::gateway::OrderDirectory;
use vela_core::lookup::{match_order, LookupResult};
use vela_shared::models::OrdersEnvelope;
use vela_shared::pii::Masked;

use crate::app_config::ShopifyConfig;

/// Client for the Shopify admin orders API.
///
/// One GET per lookup, filtered by status `any` and the `#`-prefixed order
/// name. Candidates are re-validated locally because the name filter is
/// advisory upstream.
pub struct ShopifyClient {
    http: reqwest::Client,
    shop_name: String,
    access_token: Masked<String>,
    api_version: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Shopify API error: {status}\n{body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode Shopify response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ShopifyClient {
    pub fn new(http: reqwest::Client, config: ShopifyConfig) -> Self {
        Self {
            http,
            shop_name: config.shop_name,
            access_token: config.access_token,
            api_version: config.api_version,
        }
    }

    fn orders_url(&self, order_id: &str) -> String {
        // %23 is the url-encoded `#` the admin API expects in the name filter.
        format!(
            "https://{}.myshopify.com/admin/api/{}/orders.json?status=any&name=%23{}",
            self.shop_name, self.api_version, order_id
        )
    }

    async fn search_orders(&self, info: &ExtractedInfo) -> Result<LookupResult, UpstreamError> {
        let url = self.orders_url(&info.order_id);
        tracing::debug!(url = %url, "querying Shopify orders API");

        let response = self
            .http
            .get(&url)
            .header("X-Shopify-Access-Token", self.access_token.expose().as_str())
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = %status, body = %body, "Shopify orders API response");

        if !status.is_success() {
            return Err(UpstreamError::Status { status, body });
        }

        let envelope: OrdersEnvelope = serde_json::from_str(&body)?;

        match match_order(&envelope.orders, &info.order_id) {
            Some(order) => {
                tracing::debug!(
                    order_id = order.id,
                    order_number = order.order_number,
                    "matching order found"
                );
                Ok(LookupResult::found(order.clone()))
            }
            None => Ok(LookupResult::not_found(info.clone())),
        }
    }
}

#[async_trait]
impl OrderDirectory for ShopifyClient {
    async fn find_order(&self, info: Option<&ExtractedInfo>) -> LookupResult {
        let Some(info) = info else {
            return LookupResult::missing_id();
        };

        tracing::debug!(order_id = %info.order_id, "searching for order number");
        match self.search_orders(info).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, "error searching orders");
                LookupResult::failed(err.to_string(), info.clone())
            }
        }
    }
}
