use serde::{Deserialize, Serialize};
use vela_shared::models::ShopifyOrder;

use crate::extract::ExtractedInfo;

/// Outcome of one order lookup.
///
/// Invariant: a missing order always carries an error describing why; a
/// present order carries no error.
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub order: Option<ShopifyOrder>,
    pub error: Option<LookupError>,
}

/// Lookup failure surfaced as data, never as a raised error. The search
/// criteria that produced the miss ride along for diagnostics when they
/// exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupError {
    pub message: String,
    #[serde(rename = "searchCriteria", skip_serializing_if = "Option::is_none")]
    pub search_criteria: Option<ExtractedInfo>,
}

impl LookupResult {
    pub fn found(order: ShopifyOrder) -> Self {
        Self {
            order: Some(order),
            error: None,
        }
    }

    /// No identifier was available to search with.
    pub fn missing_id() -> Self {
        Self {
            order: None,
            error: Some(LookupError {
                message: "No order ID provided".to_string(),
                search_criteria: None,
            }),
        }
    }

    /// The upstream answered but nothing matched the requested id.
    pub fn not_found(criteria: ExtractedInfo) -> Self {
        Self {
            order: None,
            error: Some(LookupError {
                message: format!("Order #{} not found", criteria.order_id),
                search_criteria: Some(criteria),
            }),
        }
    }

    /// Transport or upstream failure, converted to data at the boundary.
    pub fn failed(message: String, criteria: ExtractedInfo) -> Self {
        Self {
            order: None,
            error: Some(LookupError {
                message,
                search_criteria: Some(criteria),
            }),
        }
    }
}

/// Re-validate upstream candidates against the requested id.
///
/// The name filter sent to the API is advisory; the response can contain
/// mismatched or multiple orders. A candidate matches when its numeric
/// order number stringifies to the requested id or its display name equals
/// `#<id>`. First structural match wins; upstream ordering is preserved.
pub fn match_order<'a>(orders: &'a [ShopifyOrder], requested_id: &str) -> Option<&'a ShopifyOrder> {
    let display_name = format!("#{requested_id}");
    orders
        .iter()
        .find(|order| order.order_number.to_string() == requested_id || order.name == display_name)
}
