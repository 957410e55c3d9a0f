use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw order object as returned by the Shopify admin orders API.
///
/// Only the fields the service consumes are modeled; unknown upstream fields
/// are ignored. `shipping_address` is carried opaquely since the service
/// never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyOrder {
    pub id: i64,
    pub order_number: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub total_price: String,
    #[serde(default)]
    pub fulfillment_status: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub customer: Option<ShopifyCustomer>,
    #[serde(default)]
    pub shipping_address: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyCustomer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Envelope for the orders listing endpoint.
#[derive(Debug, Deserialize)]
pub struct OrdersEnvelope {
    #[serde(default)]
    pub orders: Vec<ShopifyOrder>,
}

/// Outward projection of a matched order. camelCase keys are part of the
/// API contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: i64,
    pub order_number: i64,
    pub created_at: DateTime<Utc>,
    pub total_price: String,
    pub fulfillment_status: Option<String>,
    pub customer: CustomerSummary,
    pub shipping_address: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub email: Option<String>,
    pub name: String,
}

impl From<&ShopifyOrder> for OrderRecord {
    fn from(order: &ShopifyOrder) -> Self {
        let name = order
            .customer
            .as_ref()
            .map(|customer| {
                format!(
                    "{} {}",
                    customer.first_name.as_deref().unwrap_or(""),
                    customer.last_name.as_deref().unwrap_or("")
                )
                .trim()
                .to_string()
            })
            .unwrap_or_default();

        Self {
            id: order.id,
            order_number: order.order_number,
            created_at: order.created_at,
            total_price: order.total_price.clone(),
            fulfillment_status: order.fulfillment_status.clone(),
            customer: CustomerSummary {
                email: order.email.clone(),
                name,
            },
            shipping_address: order.shipping_address.clone(),
        }
    }
}
